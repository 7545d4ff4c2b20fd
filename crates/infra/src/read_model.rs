//! Read-model row types served to dashboard views.

use chrono::{DateTime, Utc};
use serde::Serialize;

use billdesk_core::{CustomerId, InvoiceId, Money};
use billdesk_invoicing::InvoiceStatus;

/// Invoice row joined with its customer, for list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceWithCustomer {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: Money,
    pub status: InvoiceStatus,
    pub date: DateTime<Utc>,
}

/// Precomputed per-month revenue aggregate. Read-only from this core's
/// perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revenue {
    pub month: String,
    pub revenue: Money,
}

/// Dashboard card aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardData {
    pub invoice_count: u64,
    pub customer_count: u64,
    pub paid_total: Money,
    pub pending_total: Money,
}
