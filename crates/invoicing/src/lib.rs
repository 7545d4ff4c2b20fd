//! `billdesk-invoicing` — the invoice entity and form validation.

pub mod form;
pub mod invoice;

pub use form::{InvoiceForm, MSG_AMOUNT_GT_ZERO, MSG_CHOOSE_STATUS, MSG_SELECT_CUSTOMER};
pub use invoice::{Invoice, InvoiceDraft, InvoiceStatus, ParseStatusError};
