//! Response JSON mapping helpers.
//!
//! Currency leaves the API in two shapes, both derived from the stored minor
//! units: single-invoice responses carry decimal dollars (for the edit form),
//! dashboard panels carry a formatted currency string.

use serde_json::{json, Value};

use billdesk_customers::Customer;
use billdesk_infra::{CardData, InvoiceWithCustomer, Revenue};
use billdesk_invoicing::Invoice;

/// Single invoice, amount converted to decimal dollars.
pub fn invoice_to_json(invoice: &Invoice) -> Value {
    json!({
        "id": invoice.id.to_string(),
        "customerId": invoice.customer_id.to_string(),
        "amount": invoice.amount.to_major_units(),
        "status": invoice.status.as_str(),
        "date": invoice.date.to_rfc3339(),
    })
}

/// Invoice list row, amount in minor units.
pub fn invoice_row_to_json(row: &InvoiceWithCustomer) -> Value {
    json!({
        "id": row.id.to_string(),
        "customerId": row.customer_id.to_string(),
        "name": row.name,
        "email": row.email,
        "imageUrl": row.image_url,
        "amount": row.amount.minor_units(),
        "status": row.status.as_str(),
        "date": row.date.to_rfc3339(),
    })
}

/// "Latest invoices" panel row, amount as a formatted currency string.
pub fn latest_invoice_to_json(row: &InvoiceWithCustomer) -> Value {
    json!({
        "id": row.id.to_string(),
        "name": row.name,
        "email": row.email,
        "imageUrl": row.image_url,
        "amount": row.amount.to_string(),
    })
}

pub fn customer_to_json(customer: &Customer) -> Value {
    json!({
        "id": customer.id.to_string(),
        "name": customer.name,
        "email": customer.email,
        "imageUrl": customer.image_url,
    })
}

pub fn card_data_to_json(cards: &CardData) -> Value {
    json!({
        "numberOfInvoices": cards.invoice_count,
        "numberOfCustomers": cards.customer_count,
        "totalPaidInvoices": cards.paid_total.to_string(),
        "totalPendingInvoices": cards.pending_total.to_string(),
    })
}

pub fn revenue_to_json(row: &Revenue) -> Value {
    json!({
        "month": row.month,
        "revenue": row.revenue.to_major_units(),
    })
}
