use std::sync::Arc;

use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::json;

use billdesk_auth::{login_error_message, Credentials};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/login", post(login))
}

/// Sign-in touchpoint: the only auth concern this core owns is mapping the
/// failure category to its fixed user-facing string.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Form(credentials): Form<Credentials>,
) -> axum::response::Response {
    match services.auth.sign_in(&credentials).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response(),
        Err(e) => errors::json_error(
            StatusCode::UNAUTHORIZED,
            "auth_error",
            login_error_message(&e),
        ),
    }
}
