use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use billdesk_core::InvoiceId;
use billdesk_infra::{actions, queries};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route(
            "/:id",
            get(get_invoice).post(update_invoice).delete(delete_invoice),
        )
        .route("/:id/edit", get(edit_invoice))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    query: String,
    #[serde(default = "default_page")]
    page: u64,
}

fn default_page() -> u64 {
    1
}

fn parse_invoice_id(raw: &str) -> Result<InvoiceId, axum::response::Response> {
    raw.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id")
    })
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<ListParams>,
) -> axum::response::Response {
    let store = services.store.as_ref();

    let items = match queries::fetch_filtered_invoices(store, &params.query, params.page).await {
        Ok(rows) => rows,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let total_pages = match queries::fetch_invoices_pages(store, &params.query).await {
        Ok(pages) => pages,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "items": items.iter().map(dto::invoice_row_to_json).collect::<Vec<_>>(),
            "total_pages": total_pages,
        })),
    )
        .into_response()
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<HashMap<String, String>>,
) -> axum::response::Response {
    match actions::create_invoice(services.store.as_ref(), services.cache.as_ref(), &form).await {
        Ok(_) => Redirect::to(actions::INVOICES_ROUTE).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_invoice_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match queries::fetch_invoice_by_id(services.store.as_ref(), id).await {
        Ok(Some(invoice)) => (StatusCode::OK, Json(dto::invoice_to_json(&invoice))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Edit-view payload: the invoice plus the full customer list, loaded
/// concurrently. Absent invoice means 404.
pub async fn edit_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_invoice_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let store = services.store.as_ref();

    let (invoice, customers) = tokio::join!(
        queries::fetch_invoice_by_id(store, id),
        queries::fetch_customers(store),
    );

    match (invoice, customers) {
        (Ok(Some(invoice)), Ok(customers)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "invoice": dto::invoice_to_json(&invoice),
                "customers": customers.iter().map(dto::customer_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        (Ok(None), Ok(_)) => {
            errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found")
        }
        (Err(e), _) => errors::domain_error_to_response(e),
        (_, Err(e)) => errors::domain_error_to_response(e),
    }
}

pub async fn update_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> axum::response::Response {
    let id = match parse_invoice_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match actions::update_invoice(services.store.as_ref(), services.cache.as_ref(), id, &form)
        .await
    {
        Ok(()) => Redirect::to(actions::INVOICES_ROUTE).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Delete does not navigate; it is invoked from within the list view.
pub async fn delete_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_invoice_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match actions::delete_invoice(services.store.as_ref(), services.cache.as_ref(), id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
