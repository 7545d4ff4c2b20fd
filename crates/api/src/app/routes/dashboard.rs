use std::sync::Arc;

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};

use billdesk_infra::queries;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/cards", get(cards))
        .route("/revenue", get(revenue))
        .route("/latest-invoices", get(latest_invoices))
}

pub async fn cards(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match queries::fetch_card_data(services.store.as_ref()).await {
        Ok(cards) => (StatusCode::OK, Json(dto::card_data_to_json(&cards))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn revenue(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match queries::fetch_revenue(services.store.as_ref()).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "items": rows.iter().map(dto::revenue_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn latest_invoices(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match queries::fetch_latest_invoices(services.store.as_ref()).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "items": rows.iter().map(dto::latest_invoice_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
