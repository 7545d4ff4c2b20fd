//! `billdesk-infra` — persistence contract, query/mutation layers, and the
//! route cache.
//!
//! Layout:
//! - `store/`: the `DashboardStore` contract plus in-memory and Postgres
//!   implementations
//! - `queries`: read-side operations (filtered pages, aggregates)
//! - `actions`: mutations (create/update/delete) with cache invalidation
//! - `cache`: named route invalidation
//! - `read_model`: joined/aggregate row types served to views

pub mod actions;
pub mod cache;
pub mod queries;
pub mod read_model;
pub mod store;

pub use cache::{Revalidate, RouteCache};
pub use read_model::{CardData, InvoiceWithCustomer, Revenue};
pub use store::{DashboardStore, MemoryStore, PostgresStore, StoreError};
