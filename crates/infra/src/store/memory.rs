//! In-memory store.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use billdesk_core::{InvoiceId, Money};
use billdesk_customers::Customer;
use billdesk_invoicing::{Invoice, InvoiceDraft, InvoiceStatus};

use super::{DashboardStore, StoreError};
use crate::read_model::{InvoiceWithCustomer, Revenue};

#[derive(Debug, Default)]
pub struct MemoryStore {
    customers: RwLock<Vec<Customer>>,
    invoices: RwLock<HashMap<InvoiceId, Invoice>>,
    revenue: RwLock<Vec<Revenue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a customer. Customers are read-only through the store contract;
    /// this inherent method exists for tests and dev wiring only.
    pub fn insert_customer(&self, customer: Customer) -> Result<(), StoreError> {
        let mut customers = self.customers.write().map_err(poisoned)?;
        customers.push(customer);
        Ok(())
    }

    /// Seed a monthly revenue aggregate (tests/dev).
    pub fn insert_revenue(&self, revenue: Revenue) -> Result<(), StoreError> {
        let mut rows = self.revenue.write().map_err(poisoned)?;
        rows.push(revenue);
        Ok(())
    }

    /// All invoices matching `query`, joined with their customer and sorted
    /// newest first. Invoices whose customer is missing are skipped, matching
    /// the inner-join semantics of the SQL implementation.
    fn joined(&self, query: &str) -> Result<Vec<InvoiceWithCustomer>, StoreError> {
        let customers = self.customers.read().map_err(poisoned)?;
        let invoices = self.invoices.read().map_err(poisoned)?;

        let mut rows: Vec<InvoiceWithCustomer> = invoices
            .values()
            .filter_map(|invoice| {
                let customer = customers.iter().find(|c| c.id == invoice.customer_id)?;
                Some(InvoiceWithCustomer {
                    id: invoice.id,
                    customer_id: invoice.customer_id,
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    image_url: customer.image_url.clone(),
                    amount: invoice.amount,
                    status: invoice.status,
                    date: invoice.date,
                })
            })
            .filter(|row| matches(row, query))
            .collect();

        // Date descending; id as a deterministic tie-breaker.
        rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
        Ok(rows)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Database("lock poisoned".to_string())
}

fn matches(row: &InvoiceWithCustomer, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let q = query.to_lowercase();
    row.name.to_lowercase().contains(&q)
        || row.email.to_lowercase().contains(&q)
        || row.status.as_str().contains(&q)
}

#[async_trait]
impl DashboardStore for MemoryStore {
    async fn invoices_page(
        &self,
        query: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<InvoiceWithCustomer>, StoreError> {
        let rows = self.joined(query)?;
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn invoices_count(&self, query: &str) -> Result<u64, StoreError> {
        Ok(self.joined(query)?.len() as u64)
    }

    async fn invoice_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        let invoices = self.invoices.read().map_err(poisoned)?;
        Ok(invoices.get(&id).cloned())
    }

    async fn latest_invoices(&self, limit: u64) -> Result<Vec<InvoiceWithCustomer>, StoreError> {
        self.invoices_page("", 0, limit).await
    }

    async fn customers(&self) -> Result<Vec<Customer>, StoreError> {
        let customers = self.customers.read().map_err(poisoned)?;
        let mut rows = customers.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn customers_filtered(&self, query: &str) -> Result<Vec<Customer>, StoreError> {
        let q = query.to_lowercase();
        let mut rows: Vec<Customer> = self
            .customers
            .read()
            .map_err(poisoned)?
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&q) || c.email.to_lowercase().contains(&q))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn customers_count(&self) -> Result<u64, StoreError> {
        Ok(self.customers.read().map_err(poisoned)?.len() as u64)
    }

    async fn amount_total(&self, status: InvoiceStatus) -> Result<Money, StoreError> {
        let invoices = self.invoices.read().map_err(poisoned)?;
        let mut total = Money::ZERO;
        for invoice in invoices.values().filter(|i| i.status == status) {
            total = total
                .checked_add(invoice.amount)
                .ok_or_else(|| StoreError::Database("amount total overflow".to_string()))?;
        }
        Ok(total)
    }

    async fn revenue(&self) -> Result<Vec<Revenue>, StoreError> {
        Ok(self.revenue.read().map_err(poisoned)?.clone())
    }

    async fn insert_invoice(
        &self,
        draft: InvoiceDraft,
        date: DateTime<Utc>,
    ) -> Result<Invoice, StoreError> {
        let invoice = Invoice {
            id: InvoiceId::new(),
            customer_id: draft.customer_id,
            amount: draft.amount,
            status: draft.status,
            date,
        };
        let mut invoices = self.invoices.write().map_err(poisoned)?;
        invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn update_invoice(&self, id: InvoiceId, draft: InvoiceDraft) -> Result<(), StoreError> {
        let mut invoices = self.invoices.write().map_err(poisoned)?;
        let invoice = invoices.get_mut(&id).ok_or(StoreError::NotFound)?;
        invoice.customer_id = draft.customer_id;
        invoice.amount = draft.amount;
        invoice.status = draft.status;
        Ok(())
    }

    async fn delete_invoice(&self, id: InvoiceId) -> Result<(), StoreError> {
        let mut invoices = self.invoices.write().map_err(poisoned)?;
        invoices.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}
