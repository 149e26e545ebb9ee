//! Transaction routes - the sortable transaction table
//!
//! Features:
//! - Transaction list page with the provider count shown verbatim
//! - Sortable table fragment, capped at the first 20 rows
//! - HTMX partial page updates
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{api_transactions, htmx_transactions_table};

pub use page::page_transactions;
