//! `billdesk-auth` — credential sign-in boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. The dashboard
//! core's only touchpoint with authentication is translating a categorized
//! sign-in failure into one of two fixed user-facing strings.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Submitted login credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Categorized sign-in failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The credentials themselves were wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Anything else the provider reports (outage, misconfiguration, ...).
    #[error("authentication failed: {0}")]
    Provider(String),
}

/// Authentication provider boundary.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<(), AuthError>;
}

/// Map a sign-in failure to its fixed user-facing string.
pub fn login_error_message(err: &AuthError) -> &'static str {
    match err {
        AuthError::InvalidCredentials => "Invalid credentials.",
        AuthError::Provider(_) => "Something went wrong.",
    }
}

/// Single-user provider backed by environment variables.
///
/// Dev/test convenience only; real deployments plug in their own
/// [`CredentialProvider`].
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    email: String,
    password: String,
}

impl StaticCredentialProvider {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Read `DASHBOARD_USER` / `DASHBOARD_PASSWORD` from the environment.
    pub fn from_env() -> Self {
        let email =
            std::env::var("DASHBOARD_USER").unwrap_or_else(|_| "user@billdesk.dev".to_string());
        let password = std::env::var("DASHBOARD_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("DASHBOARD_PASSWORD not set; using insecure dev default");
            "dev-password".to_string()
        });
        Self { email, password }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<(), AuthError> {
        if credentials.email == self.email && credentials.password == self.password {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
