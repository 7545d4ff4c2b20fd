//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: store/cache/auth wiring
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: response JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app() -> Router {
    let services = Arc::new(services::build_services().await);
    build_app_with(services)
}

/// Router over explicit services. Black-box tests inject a seeded in-memory
/// store through this.
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    routes::router().layer(Extension(services))
}
