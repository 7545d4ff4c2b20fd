//! Form validation: untrusted string fields into a typed [`InvoiceDraft`].
//!
//! Input is the raw key/value map of a form submission. Every failing field is
//! reported together; there is no partial success, and the caller re-renders
//! the form with the preserved messages.

use std::collections::HashMap;

use billdesk_core::{CustomerId, FieldErrors, Money};

use crate::invoice::{InvoiceDraft, InvoiceStatus};

pub const FIELD_CUSTOMER_ID: &str = "customerId";
pub const FIELD_AMOUNT: &str = "amount";
pub const FIELD_STATUS: &str = "status";

pub const MSG_SELECT_CUSTOMER: &str = "Please select a customer.";
pub const MSG_AMOUNT_GT_ZERO: &str = "Please enter an amount greater than $0";
pub const MSG_CHOOSE_STATUS: &str = "Please choose status";

/// Schema for the create/update invoice form.
pub struct InvoiceForm;

impl InvoiceForm {
    /// Parse and validate a raw form submission.
    ///
    /// Rules:
    /// - `customerId`: present, non-empty, a valid id
    /// - `amount`: decimal dollars, strictly greater than 0; stored as cents
    /// - `status`: exactly `pending` or `paid`
    pub fn parse(fields: &HashMap<String, String>) -> Result<InvoiceDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_id = match fields.get(FIELD_CUSTOMER_ID).map(|raw| raw.trim()) {
            Some(raw) if !raw.is_empty() => match raw.parse::<CustomerId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(FIELD_CUSTOMER_ID, MSG_SELECT_CUSTOMER);
                    None
                }
            },
            _ => {
                errors.push(FIELD_CUSTOMER_ID, MSG_SELECT_CUSTOMER);
                None
            }
        };

        let amount = match fields
            .get(FIELD_AMOUNT)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
        {
            Some(dollars) if dollars.is_finite() && dollars > 0.0 => {
                Some(Money::from_major_units(dollars))
            }
            _ => {
                errors.push(FIELD_AMOUNT, MSG_AMOUNT_GT_ZERO);
                None
            }
        };

        let status = match fields
            .get(FIELD_STATUS)
            .and_then(|raw| raw.trim().parse::<InvoiceStatus>().ok())
        {
            Some(status) => Some(status),
            None => {
                errors.push(FIELD_STATUS, MSG_CHOOSE_STATUS);
                None
            }
        };

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) => Ok(InvoiceDraft {
                customer_id,
                amount,
                status,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn customer() -> CustomerId {
        CustomerId::new()
    }

    #[test]
    fn valid_submission_parses_to_draft() {
        let id = customer();
        let draft = InvoiceForm::parse(&form(&[
            ("customerId", &id.to_string()),
            ("amount", "50"),
            ("status", "paid"),
        ]))
        .unwrap();

        assert_eq!(draft.customer_id, id);
        assert_eq!(draft.amount.minor_units(), 5000);
        assert_eq!(draft.status, InvoiceStatus::Paid);
    }

    #[test]
    fn fractional_amount_rounds_to_cents() {
        let draft = InvoiceForm::parse(&form(&[
            ("customerId", &customer().to_string()),
            ("amount", "12.345"),
            ("status", "pending"),
        ]))
        .unwrap();

        assert_eq!(draft.amount.minor_units(), 1235);
    }

    #[test]
    fn negative_amount_reports_field_error() {
        let err = InvoiceForm::parse(&form(&[
            ("customerId", &customer().to_string()),
            ("amount", "-5"),
            ("status", "paid"),
        ]))
        .unwrap_err();

        assert!(err.field(FIELD_AMOUNT)[0].contains("greater than $0"));
        assert!(err.field(FIELD_CUSTOMER_ID).is_empty());
        assert!(err.field(FIELD_STATUS).is_empty());
    }

    #[test]
    fn zero_and_non_numeric_amounts_are_rejected() {
        for bad in ["0", "0.0", "abc", ""] {
            let err = InvoiceForm::parse(&form(&[
                ("customerId", &customer().to_string()),
                ("amount", bad),
                ("status", "paid"),
            ]))
            .unwrap_err();
            assert_eq!(err.field(FIELD_AMOUNT), [MSG_AMOUNT_GT_ZERO]);
        }
    }

    #[test]
    fn missing_fields_are_all_reported_together() {
        let err = InvoiceForm::parse(&form(&[])).unwrap_err();

        assert_eq!(err.field(FIELD_CUSTOMER_ID), [MSG_SELECT_CUSTOMER]);
        assert_eq!(err.field(FIELD_AMOUNT), [MSG_AMOUNT_GT_ZERO]);
        assert_eq!(err.field(FIELD_STATUS), [MSG_CHOOSE_STATUS]);
    }

    #[test]
    fn empty_customer_id_is_rejected() {
        let err = InvoiceForm::parse(&form(&[
            ("customerId", "  "),
            ("amount", "50"),
            ("status", "paid"),
        ]))
        .unwrap_err();

        assert_eq!(err.field(FIELD_CUSTOMER_ID), [MSG_SELECT_CUSTOMER]);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = InvoiceForm::parse(&form(&[
            ("customerId", &customer().to_string()),
            ("amount", "50"),
            ("status", "overdue"),
        ]))
        .unwrap_err();

        assert_eq!(err.field(FIELD_STATUS), [MSG_CHOOSE_STATUS]);
    }
}
