use axum::{routing::get, Router};

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod system;

/// Full routing tree.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/invoices", invoices::router())
        .nest("/customers", customers::router())
        .nest("/dashboard", dashboard::router())
        .merge(auth::router())
}
