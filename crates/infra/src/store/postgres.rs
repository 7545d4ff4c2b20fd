//! Postgres-backed store implementation.
//!
//! Substring filters use `ILIKE`, matching the case-insensitive semantics of
//! the in-memory store. Expected tables are in `schema.sql` at the crate root;
//! `invoices.customer_id` carries `ON DELETE RESTRICT`, so a customer with
//! live invoices cannot be removed out from under us.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use billdesk_core::{CustomerId, InvoiceId, Money};
use billdesk_customers::Customer;
use billdesk_invoicing::{Invoice, InvoiceDraft, InvoiceStatus};

use super::{DashboardStore, StoreError};
use crate::read_model::{InvoiceWithCustomer, Revenue};

/// Shared-pool Postgres store.
///
/// `PgPool` handles thread-safe connection management; the store is cheap to
/// clone and share across request handlers.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: Arc<PgPool>,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn map_sqlx_error(op: &'static str, e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        other => StoreError::Database(format!("{op}: {other}")),
    }
}

fn like_pattern(query: &str) -> String {
    format!("%{query}%")
}

fn parse_status(raw: &str) -> Result<InvoiceStatus, StoreError> {
    raw.parse::<InvoiceStatus>()
        .map_err(|e| StoreError::Database(format!("unexpected status value: {e}")))
}

fn row_to_invoice(row: &PgRow) -> Result<Invoice, StoreError> {
    let err = |e| map_sqlx_error("decode invoice", e);
    let status: String = row.try_get("status").map_err(err)?;
    Ok(Invoice {
        id: InvoiceId::from_uuid(row.try_get::<Uuid, _>("id").map_err(err)?),
        customer_id: CustomerId::from_uuid(row.try_get::<Uuid, _>("customer_id").map_err(err)?),
        amount: Money::from_minor_units(row.try_get::<i64, _>("amount").map_err(err)?),
        status: parse_status(&status)?,
        date: row.try_get::<DateTime<Utc>, _>("date").map_err(err)?,
    })
}

fn row_to_joined(row: &PgRow) -> Result<InvoiceWithCustomer, StoreError> {
    let invoice = row_to_invoice(row)?;
    let err = |e| map_sqlx_error("decode invoice row", e);
    Ok(InvoiceWithCustomer {
        id: invoice.id,
        customer_id: invoice.customer_id,
        name: row.try_get("name").map_err(err)?,
        email: row.try_get("email").map_err(err)?,
        image_url: row.try_get("image_url").map_err(err)?,
        amount: invoice.amount,
        status: invoice.status,
        date: invoice.date,
    })
}

fn row_to_customer(row: &PgRow) -> Result<Customer, StoreError> {
    let err = |e| map_sqlx_error("decode customer", e);
    Ok(Customer {
        id: CustomerId::from_uuid(row.try_get::<Uuid, _>("id").map_err(err)?),
        name: row.try_get("name").map_err(err)?,
        email: row.try_get("email").map_err(err)?,
        image_url: row.try_get("image_url").map_err(err)?,
    })
}

const JOINED_SELECT: &str = r#"
    SELECT i.id, i.customer_id, i.amount, i.status, i.date,
           c.name, c.email, c.image_url
    FROM invoices i
    JOIN customers c ON c.id = i.customer_id
"#;

const INVOICE_FILTER: &str = r#"
    ($1 = '' OR c.name ILIKE $2 OR c.email ILIKE $2 OR i.status ILIKE $2)
"#;

#[async_trait]
impl DashboardStore for PostgresStore {
    #[instrument(skip(self), err)]
    async fn invoices_page(
        &self,
        query: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<InvoiceWithCustomer>, StoreError> {
        let sql = format!(
            "{JOINED_SELECT} WHERE {INVOICE_FILTER} \
             ORDER BY i.date DESC, i.id DESC LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query(&sql)
            .bind(query)
            .bind(like_pattern(query))
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("invoices_page", e))?;

        rows.iter().map(row_to_joined).collect()
    }

    #[instrument(skip(self), err)]
    async fn invoices_count(&self, query: &str) -> Result<u64, StoreError> {
        let sql = format!(
            "SELECT COUNT(*) AS count FROM invoices i \
             JOIN customers c ON c.id = i.customer_id WHERE {INVOICE_FILTER}"
        );
        let row = sqlx::query(&sql)
            .bind(query)
            .bind(like_pattern(query))
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("invoices_count", e))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| map_sqlx_error("invoices_count", e))?;
        Ok(count as u64)
    }

    async fn invoice_by_id(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        let row = sqlx::query(
            "SELECT id, customer_id, amount, status, date FROM invoices WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("invoice_by_id", e))?;

        row.as_ref().map(row_to_invoice).transpose()
    }

    async fn latest_invoices(&self, limit: u64) -> Result<Vec<InvoiceWithCustomer>, StoreError> {
        let sql = format!("{JOINED_SELECT} ORDER BY i.date DESC, i.id DESC LIMIT $1");
        let rows = sqlx::query(&sql)
            .bind(limit as i64)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("latest_invoices", e))?;

        rows.iter().map(row_to_joined).collect()
    }

    async fn customers(&self) -> Result<Vec<Customer>, StoreError> {
        let rows =
            sqlx::query("SELECT id, name, email, image_url FROM customers ORDER BY name ASC")
                .fetch_all(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("customers", e))?;

        rows.iter().map(row_to_customer).collect()
    }

    async fn customers_filtered(&self, query: &str) -> Result<Vec<Customer>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, email, image_url FROM customers \
             WHERE name ILIKE $1 OR email ILIKE $1 ORDER BY name ASC",
        )
        .bind(like_pattern(query))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("customers_filtered", e))?;

        rows.iter().map(row_to_customer).collect()
    }

    async fn customers_count(&self) -> Result<u64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM customers")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("customers_count", e))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| map_sqlx_error("customers_count", e))?;
        Ok(count as u64)
    }

    async fn amount_total(&self, status: InvoiceStatus) -> Result<Money, StoreError> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT AS total FROM invoices WHERE status = $1",
        )
        .bind(status.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("amount_total", e))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| map_sqlx_error("amount_total", e))?;
        Ok(Money::from_minor_units(total))
    }

    async fn revenue(&self) -> Result<Vec<Revenue>, StoreError> {
        let rows = sqlx::query("SELECT month, revenue FROM revenue")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("revenue", e))?;

        rows.iter()
            .map(|row| {
                let err = |e| map_sqlx_error("decode revenue", e);
                Ok(Revenue {
                    month: row.try_get("month").map_err(err)?,
                    revenue: Money::from_minor_units(
                        row.try_get::<i64, _>("revenue").map_err(err)?,
                    ),
                })
            })
            .collect()
    }

    #[instrument(skip(self, draft), err)]
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

        sqlx::query(
            "INSERT INTO invoices (id, customer_id, amount, status, date) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(invoice.id.as_uuid())
        .bind(invoice.customer_id.as_uuid())
        .bind(invoice.amount.minor_units())
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_invoice", e))?;

        Ok(invoice)
    }

    #[instrument(skip(self, draft), err)]
    async fn update_invoice(&self, id: InvoiceId, draft: InvoiceDraft) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE invoices SET customer_id = $2, amount = $3, status = $4 WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(draft.customer_id.as_uuid())
        .bind(draft.amount.minor_units())
        .bind(draft.status.as_str())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_invoice", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn delete_invoice(&self, id: InvoiceId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_invoice", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
