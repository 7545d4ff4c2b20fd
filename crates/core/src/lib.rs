//! `billdesk-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainError, DomainResult, FieldErrors};
pub use id::{CustomerId, InvoiceId, ParseIdError};
pub use money::Money;
