//! Read-side operations over the store contract.
//!
//! Any underlying data-access failure is logged and re-raised as a generic
//! domain error; callers treat that as fatal for the requested page and do
//! not retry.

use billdesk_core::{DomainError, DomainResult, InvoiceId};
use billdesk_customers::Customer;
use billdesk_invoicing::{Invoice, InvoiceStatus};

use crate::read_model::{CardData, InvoiceWithCustomer, Revenue};
use crate::store::{DashboardStore, StoreError};

/// Fixed page size for the invoice list.
pub const INVOICES_PER_PAGE: u64 = 6;

/// Number of invoices on the "latest" dashboard panel.
pub const LATEST_INVOICES: u64 = 5;

fn fetch_failed(what: &str, err: StoreError) -> DomainError {
    tracing::error!(error = %err, "database error");
    DomainError::data_access(format!("failed to fetch {what}"))
}

/// One page of invoices joined with their customer, newest first.
///
/// Pages are 1-based; the offset is `(page - 1) * 6`. An empty query applies
/// no filter, otherwise matching is the case-insensitive name/email/status
/// substring test documented on [`DashboardStore`].
pub async fn fetch_filtered_invoices(
    store: &dyn DashboardStore,
    query: &str,
    page: u64,
) -> DomainResult<Vec<InvoiceWithCustomer>> {
    let offset = page.saturating_sub(1) * INVOICES_PER_PAGE;
    store
        .invoices_page(query, offset, INVOICES_PER_PAGE)
        .await
        .map_err(|e| fetch_failed("invoices", e))
}

/// Total number of pages for the query, `ceil(count / 6)`. Count-only.
pub async fn fetch_invoices_pages(store: &dyn DashboardStore, query: &str) -> DomainResult<u64> {
    let count = store
        .invoices_count(query)
        .await
        .map_err(|e| fetch_failed("invoices", e))?;
    Ok(count.div_ceil(INVOICES_PER_PAGE))
}

/// Single invoice lookup. An absent id is `Ok(None)`, never an error.
pub async fn fetch_invoice_by_id(
    store: &dyn DashboardStore,
    id: InvoiceId,
) -> DomainResult<Option<Invoice>> {
    store
        .invoice_by_id(id)
        .await
        .map_err(|e| fetch_failed("invoice", e))
}

pub async fn fetch_customers(store: &dyn DashboardStore) -> DomainResult<Vec<Customer>> {
    store
        .customers()
        .await
        .map_err(|e| fetch_failed("all customers", e))
}

pub async fn fetch_filtered_customers(
    store: &dyn DashboardStore,
    query: &str,
) -> DomainResult<Vec<Customer>> {
    store
        .customers_filtered(query)
        .await
        .map_err(|e| fetch_failed("customer table", e))
}

/// Dashboard card aggregates.
///
/// The four sub-queries are independent; they are issued concurrently and
/// awaited jointly.
pub async fn fetch_card_data(store: &dyn DashboardStore) -> DomainResult<CardData> {
    let (invoices, customers, paid, pending) = tokio::join!(
        store.invoices_count(""),
        store.customers_count(),
        store.amount_total(InvoiceStatus::Paid),
        store.amount_total(InvoiceStatus::Pending),
    );

    Ok(CardData {
        invoice_count: invoices.map_err(|e| fetch_failed("card data", e))?,
        customer_count: customers.map_err(|e| fetch_failed("card data", e))?,
        paid_total: paid.map_err(|e| fetch_failed("card data", e))?,
        pending_total: pending.map_err(|e| fetch_failed("card data", e))?,
    })
}

/// The 5 most recent invoices joined with their customer.
pub async fn fetch_latest_invoices(
    store: &dyn DashboardStore,
) -> DomainResult<Vec<InvoiceWithCustomer>> {
    store
        .latest_invoices(LATEST_INVOICES)
        .await
        .map_err(|e| fetch_failed("the latest invoices", e))
}

pub async fn fetch_revenue(store: &dyn DashboardStore) -> DomainResult<Vec<Revenue>> {
    store
        .revenue()
        .await
        .map_err(|e| fetch_failed("revenue data", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use billdesk_core::{CustomerId, Money};
    use billdesk_invoicing::InvoiceDraft;
    use chrono::{TimeZone, Utc};

    fn acme() -> Customer {
        Customer {
            id: CustomerId::new(),
            name: "Acme".to_string(),
            email: "a@x.com".to_string(),
            image_url: "/customers/acme.png".to_string(),
        }
    }

    async fn store_with_invoices(n: usize) -> (MemoryStore, CustomerId) {
        let store = MemoryStore::new();
        let customer = acme();
        let customer_id = customer.id;
        store.insert_customer(customer).unwrap();
        for day in 1..=n {
            let draft = InvoiceDraft {
                customer_id,
                amount: Money::from_minor_units(100 * day as i64),
                status: if day % 2 == 0 {
                    InvoiceStatus::Paid
                } else {
                    InvoiceStatus::Pending
                },
            };
            let date = Utc.with_ymd_and_hms(2024, 3, day as u32, 9, 0, 0).unwrap();
            store.insert_invoice(draft, date).await.unwrap();
        }
        (store, customer_id)
    }

    #[tokio::test]
    async fn pages_hold_at_most_six_rows() {
        let (store, _) = store_with_invoices(8).await;

        let first = fetch_filtered_invoices(&store, "", 1).await.unwrap();
        assert_eq!(first.len(), 6);

        let second = fetch_filtered_invoices(&store, "", 2).await.unwrap();
        assert_eq!(second.len(), 2);

        let third = fetch_filtered_invoices(&store, "", 3).await.unwrap();
        assert!(third.is_empty());
    }

    #[tokio::test]
    async fn page_count_is_ceiling_of_count_over_page_size() {
        let (store, _) = store_with_invoices(8).await;
        assert_eq!(fetch_invoices_pages(&store, "").await.unwrap(), 2);
        assert_eq!(fetch_invoices_pages(&store, "nomatch").await.unwrap(), 0);

        let (exact, _) = store_with_invoices(6).await;
        assert_eq!(fetch_invoices_pages(&exact, "").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_query_equals_unfiltered_window() {
        let (store, _) = store_with_invoices(8).await;

        let unfiltered = store.invoices_page("", 0, INVOICES_PER_PAGE).await.unwrap();
        let filtered = fetch_filtered_invoices(&store, "", 1).await.unwrap();
        assert_eq!(filtered, unfiltered);
    }

    #[tokio::test]
    async fn lowercase_query_matches_capitalized_customer() {
        let (store, _) = store_with_invoices(3).await;

        let rows = fetch_filtered_invoices(&store, "acme", 1).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.name == "Acme"));
    }

    #[tokio::test]
    async fn missing_invoice_is_none_not_an_error() {
        let (store, _) = store_with_invoices(1).await;
        let found = fetch_invoice_by_id(&store, InvoiceId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fetched_invoice_amount_converts_back_to_dollars() {
        let (store, customer_id) = store_with_invoices(0).await;
        let created = store
            .insert_invoice(
                InvoiceDraft {
                    customer_id,
                    amount: Money::from_major_units(50.0),
                    status: InvoiceStatus::Paid,
                },
                Utc::now(),
            )
            .await
            .unwrap();

        let fetched = fetch_invoice_by_id(&store, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.amount.minor_units(), 5000);
        assert_eq!(fetched.amount.to_major_units(), 50.0);
    }

    #[tokio::test]
    async fn card_data_aggregates_counts_and_totals() {
        let (store, _) = store_with_invoices(4).await;

        let cards = fetch_card_data(&store).await.unwrap();
        assert_eq!(cards.invoice_count, 4);
        assert_eq!(cards.customer_count, 1);
        // Paid: days 2 and 4; pending: days 1 and 3.
        assert_eq!(cards.paid_total, Money::from_minor_units(600));
        assert_eq!(cards.pending_total, Money::from_minor_units(400));
    }

    #[tokio::test]
    async fn latest_invoices_returns_five_newest() {
        let (store, _) = store_with_invoices(7).await;

        let latest = fetch_latest_invoices(&store).await.unwrap();
        assert_eq!(latest.len(), 5);
        assert!(latest.windows(2).all(|w| w[0].date >= w[1].date));
        // Day 7 is the newest seeded invoice.
        assert_eq!(latest[0].amount, Money::from_minor_units(700));
    }

    #[tokio::test]
    async fn revenue_returns_seeded_aggregates() {
        let (store, _) = store_with_invoices(0).await;
        store
            .insert_revenue(Revenue {
                month: "Jan".to_string(),
                revenue: Money::from_minor_units(200_000),
            })
            .unwrap();

        let rows = fetch_revenue(&store).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, "Jan");
    }
}
