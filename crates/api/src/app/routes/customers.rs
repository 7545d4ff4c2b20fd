use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use billdesk_infra::queries;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(list_customers))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    query: String,
}

/// Full customer list, or the name/email-filtered table when `query` is set.
pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<ListParams>,
) -> axum::response::Response {
    let store = services.store.as_ref();

    let result = if params.query.is_empty() {
        queries::fetch_customers(store).await
    } else {
        queries::fetch_filtered_customers(store, &params.query).await
    };

    match result {
        Ok(customers) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "items": customers.iter().map(dto::customer_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
