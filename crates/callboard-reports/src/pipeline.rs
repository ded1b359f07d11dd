//! One synchronous recomputation pass: filter, aggregate, reduce.

use crate::aggregate::{
    duration_summary, hourly_summary, monthly_summary, weekday_summary, DurationRow, HourlyRow,
    MonthlyRow, WeekdayRow,
};
use crate::filter::{apply, FilterSelection};
use crate::metrics::Metrics;
use crate::store::RecordStore;
use serde::Serialize;
use tracing::{info, instrument};

/// Everything the presentation layer needs for one render pass.
///
/// Rebuilt from scratch on every filter change; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Monthly answered/unanswered/service-level counts, calendar order.
    pub monthly: Vec<MonthlyRow>,
    /// Weekday answered/unanswered counts, Monday first.
    pub weekday: Vec<WeekdayRow>,
    /// Hourly answered/unanswered counts, hour 1 first and hour 0 last.
    pub hourly: Vec<HourlyRow>,
    /// Duration-bucket distribution, largest share first.
    pub duration: Vec<DurationRow>,
    /// Headline KPIs derived from the monthly summary.
    pub metrics: Metrics,
    /// True when no record matched the selection; the caller should render a
    /// "no data" notice instead of numeric output.
    pub no_matching_rows: bool,
}

/// Runs one full recomputation pass over the store.
///
/// Deterministic: the same store and selection always produce the same
/// snapshot. An empty match degrades to empty tables and zero metrics.
#[instrument(skip_all)]
pub fn build_snapshot(store: &RecordStore, selection: &FilterSelection) -> DashboardSnapshot {
    let view = apply(store, selection);

    let monthly = monthly_summary(&view);
    let weekday = weekday_summary(&view);
    let hourly = hourly_summary(&view);
    let duration = duration_summary(&view);
    let metrics = Metrics::compute(&monthly, &view);
    let no_matching_rows = view.is_empty();

    info!(
        matched = view.len(),
        no_matching_rows, "built dashboard snapshot"
    );

    DashboardSnapshot {
        monthly,
        weekday,
        hourly,
        duration,
        metrics,
        no_matching_rows,
    }
}
