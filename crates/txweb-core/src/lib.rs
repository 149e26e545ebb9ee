//! Core data model and table rendering for txweb
//!
//! This crate owns the transaction record model and the sortable
//! bounded table: a grouped header, a single global sort state, and a
//! display window of at most the first 20 sorted rows.

pub mod error;
pub mod models;
pub mod table;

pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::{Dataset, FieldValue, Transaction};
pub use table::{
    Accessor, ColumnDef, ColumnGroup, HeaderCell, HeaderGroup, RenderedTable, SortDirection,
    SortState, TableSpec, DISPLAY_WINDOW,
};
