//! Persistence contract for the dashboard.
//!
//! The query and mutation layers depend only on this contract, never on a
//! specific engine. Implementations are passed in explicitly so tests can
//! substitute the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use billdesk_core::{InvoiceId, Money};
use billdesk_customers::Customer;
use billdesk_invoicing::{Invoice, InvoiceDraft, InvoiceStatus};

use crate::read_model::{InvoiceWithCustomer, Revenue};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Store operation error (infrastructure-level).
///
/// Mapped to the domain error model at the query/mutation boundary; handlers
/// never see engine-specific failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying engine failed (connection, query, lock).
    #[error("database error: {0}")]
    Database(String),

    /// A mutation targeted a row that does not exist.
    #[error("row not found")]
    NotFound,
}

/// Entity-scoped find/count/create/update/delete operations.
///
/// Substring filters are case-insensitive in every implementation: a query
/// matches an invoice when the customer's name contains it, the customer's
/// email contains it, or the status text contains it. An empty query matches
/// everything.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// One page of invoices joined with their customer, newest first.
    async fn invoices_page(
        &self,
        query: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<InvoiceWithCustomer>, StoreError>;

    /// Number of invoices matching `query`.
    async fn invoices_count(&self, query: &str) -> Result<u64, StoreError>;

    /// Single invoice lookup; an absent id is `Ok(None)`, never an error.
    async fn invoice_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError>;

    /// The `limit` most recent invoices joined with their customer.
    async fn latest_invoices(&self, limit: u64) -> Result<Vec<InvoiceWithCustomer>, StoreError>;

    async fn customers(&self) -> Result<Vec<Customer>, StoreError>;

    /// Customers whose name or email contains `query`.
    async fn customers_filtered(&self, query: &str) -> Result<Vec<Customer>, StoreError>;

    async fn customers_count(&self) -> Result<u64, StoreError>;

    /// Sum of invoice amounts with the given status.
    async fn amount_total(&self, status: InvoiceStatus) -> Result<Money, StoreError>;

    async fn revenue(&self) -> Result<Vec<Revenue>, StoreError>;

    async fn insert_invoice(
        &self,
        draft: InvoiceDraft,
        date: DateTime<Utc>,
    ) -> Result<Invoice, StoreError>;

    /// Update customer/amount/status by id; the date is never modified.
    /// `NotFound` if the id does not exist.
    async fn update_invoice(&self, id: InvoiceId, draft: InvoiceDraft) -> Result<(), StoreError>;

    /// Delete by id. `NotFound` if the id does not exist (or was already
    /// deleted).
    async fn delete_invoice(&self, id: InvoiceId) -> Result<(), StoreError>;
}
