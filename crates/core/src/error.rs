//! Unified domain error model.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Structured, field-addressable validation report.
///
/// Keys are the wire names of the submitted form fields; each maps to the
/// human-readable messages for that field. `message` is the top-level summary
/// attached by the operation that rejected the submission.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for one field (empty slice if the field passed).
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Domain-level error.
///
/// Three kinds, matching how callers recover: validation failures are surfaced
/// back to the form, data-access failures are fatal for the operation, and
/// not-found is only an error for mutations — single-entity fetches report an
/// absent row as `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User input failed schema/business rules; recovered locally.
    #[error("{}", .0.message.as_deref().unwrap_or("validation failed"))]
    Validation(FieldErrors),

    /// The persistence layer failed; logged and re-raised as a generic
    /// message, fatal for the requested operation.
    #[error("{0}")]
    DataAccess(String),

    /// A mutation targeted a record that does not exist.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }

    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_collect_per_field_messages() {
        let mut errors = FieldErrors::new();
        errors.push("amount", "Please enter an amount greater than $0");
        errors.push("status", "Please choose status");
        errors.push("amount", "second message");

        assert_eq!(errors.field("amount").len(), 2);
        assert_eq!(errors.field("status").len(), 1);
        assert!(errors.field("customerId").is_empty());
    }

    #[test]
    fn validation_error_displays_top_level_message() {
        let errors =
            FieldErrors::single("amount", "nope").with_message("Missing Fields. Failed to Create Invoice.");
        let err = DomainError::validation(errors);
        assert_eq!(err.to_string(), "Missing Fields. Failed to Create Invoice.");
    }
}
