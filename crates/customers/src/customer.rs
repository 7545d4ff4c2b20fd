use serde::{Deserialize, Serialize};

use billdesk_core::CustomerId;

/// Customer entity.
///
/// Lifecycle is read-only from the dashboard core: customers are referenced by
/// zero or more invoices but never created or deleted here. Deleting a
/// customer with live invoice references is restricted at the schema level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub image_url: String,
}
