//! # Callboard Reports
//!
//! The reporting engine behind the call-center dashboard: an immutable record
//! store with CSV ingestion, a fingerprint-keyed store cache, a filter engine,
//! the four summary aggregations (monthly, weekday, hourly, duration bucket),
//! and the KPI metrics reduction.
//!
//! The engine is synchronous and side-effect free past ingestion: each
//! recomputation pass borrows the store, filters it into a view, and rebuilds
//! every summary table from scratch.

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod metrics;
pub mod pipeline;
pub mod store;

pub use aggregate::{
    duration_summary, hourly_summary, monthly_summary, weekday_summary, DurationRow, HourlyRow,
    MonthlyRow, WeekdayRow, HOUR_ORDER,
};
pub use cache::{CacheStats, StoreCache};
pub use filter::{apply, FilterSelection, FilteredView, Selection};
pub use metrics::Metrics;
pub use pipeline::{build_snapshot, DashboardSnapshot};
pub use store::{CsvIngestOptions, RecordStore};
