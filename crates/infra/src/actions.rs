//! Mutation layer: create/update/delete invoices.
//!
//! Every operation takes the raw form submission, validates it through
//! [`InvoiceForm`], and on success invalidates the invoice-list route so
//! dependent views refetch. Error reporting is two-tier: validation failures
//! are structured and field-addressable, data-access failures are opaque
//! generic messages.

use std::collections::HashMap;

use chrono::Utc;

use billdesk_core::{DomainError, DomainResult, InvoiceId};
use billdesk_invoicing::{Invoice, InvoiceForm};

use crate::cache::Revalidate;
use crate::store::{DashboardStore, StoreError};

/// Route key for the invoice list; every successful mutation marks it stale.
pub const INVOICES_ROUTE: &str = "/dashboard/invoices";

fn mutation_failed(op: &'static str, err: StoreError) -> DomainError {
    match err {
        StoreError::NotFound => DomainError::NotFound,
        other => {
            tracing::error!(error = %other, "database error");
            DomainError::data_access(format!("failed to {op} invoice"))
        }
    }
}

/// Create an invoice from a raw form submission.
///
/// The stored date is the current timestamp. On validation failure nothing is
/// mutated and the structured field errors are returned.
pub async fn create_invoice(
    store: &dyn DashboardStore,
    cache: &dyn Revalidate,
    form: &HashMap<String, String>,
) -> DomainResult<Invoice> {
    let draft = InvoiceForm::parse(form).map_err(|errors| {
        DomainError::Validation(errors.with_message("Missing Fields. Failed to Create Invoice."))
    })?;

    let invoice = store
        .insert_invoice(draft, Utc::now())
        .await
        .map_err(|e| mutation_failed("create new", e))?;

    cache.invalidate(INVOICES_ROUTE);
    Ok(invoice)
}

/// Update an existing invoice's customer/amount/status. The date is never
/// modified. Unknown ids report [`DomainError::NotFound`].
pub async fn update_invoice(
    store: &dyn DashboardStore,
    cache: &dyn Revalidate,
    id: InvoiceId,
    form: &HashMap<String, String>,
) -> DomainResult<()> {
    let draft = InvoiceForm::parse(form).map_err(|errors| {
        DomainError::Validation(errors.with_message("Missing Fields. Failed to Update Invoice."))
    })?;

    store
        .update_invoice(id, draft)
        .await
        .map_err(|e| mutation_failed("update", e))?;

    cache.invalidate(INVOICES_ROUTE);
    Ok(())
}

/// Delete by id and invalidate the list route.
///
/// Deleting an id that no longer exists reports [`DomainError::NotFound`];
/// the second delete of the same id is a surfaced error, not a silent no-op.
pub async fn delete_invoice(
    store: &dyn DashboardStore,
    cache: &dyn Revalidate,
    id: InvoiceId,
) -> DomainResult<()> {
    store
        .delete_invoice(id)
        .await
        .map_err(|e| mutation_failed("delete", e))?;

    cache.invalidate(INVOICES_ROUTE);
    Ok(())
}
