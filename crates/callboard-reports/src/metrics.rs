//! Scalar KPI reduction over the monthly summary and the filtered view.

use crate::aggregate::MonthlyRow;
use crate::filter::FilteredView;
use callboard_common::{round2, CallDuration};
use serde::Serialize;
use tracing::{debug, instrument};

/// Headline metrics for the current filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// Sum of `total` over the monthly rows.
    pub total_calls: u32,
    /// Sum of answered counts over the monthly rows.
    pub total_answered: u32,
    /// Sum of unanswered counts over the monthly rows.
    pub total_unanswered: u32,
    /// Sum of service-level counts over the monthly rows.
    pub total_service_level: u32,
    /// Share of answered calls that met the 20-second service level,
    /// rounded to two decimals; 0 when nothing was answered.
    pub service_level_pct: f64,
    /// Total handling time over all filtered rows as `HH:MM:SS`, hours
    /// unbounded.
    pub total_handling_time: String,
}

impl Metrics {
    /// Reduces the monthly summary into scalar KPIs.
    ///
    /// The handling-time total is summed straight from the filtered rows, not
    /// from the monthly table, so rows outside the answered/unanswered
    /// statuses still contribute their duration.
    #[instrument(skip_all)]
    pub fn compute(monthly: &[MonthlyRow], view: &FilteredView<'_>) -> Self {
        let total_calls: u32 = monthly.iter().map(|row| row.total).sum();
        let total_answered: u32 = monthly.iter().map(|row| row.answered).sum();
        let total_unanswered: u32 = monthly.iter().map(|row| row.unanswered).sum();
        let total_service_level: u32 = monthly.iter().map(|row| row.service_level).sum();

        let service_level_pct = if total_answered > 0 {
            round2(f64::from(total_service_level) / f64::from(total_answered) * 100.0)
        } else {
            0.0
        };

        let handling_time: CallDuration = view.iter().map(|record| record.duration).sum();

        let metrics = Self {
            total_calls,
            total_answered,
            total_unanswered,
            total_service_level,
            service_level_pct,
            total_handling_time: handling_time.to_string(),
        };
        debug!(
            total_calls = metrics.total_calls,
            service_level_pct = metrics.service_level_pct,
            "computed metrics"
        );
        metrics
    }

    /// The all-zero metrics of an empty filtered set.
    pub fn empty() -> Self {
        Self {
            total_calls: 0,
            total_answered: 0,
            total_unanswered: 0,
            total_service_level: 0,
            service_level_pct: 0.0,
            total_handling_time: "00:00:00".to_string(),
        }
    }
}
