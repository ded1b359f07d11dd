//! The four summary aggregations over a filtered view.
//!
//! Each aggregation groups records into `HashMap` counts, outer-joins the
//! per-status maps on the union of their keys, and emits rows in the
//! dimension's canonical order. Categories absent from the data are omitted
//! from the output, never zero-filled.

use crate::filter::FilteredView;
use callboard_common::{round2, CallRecord, CallStatus, DurationBucket, Month, Weekday};
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, instrument};

/// Canonical hour order: the operational day starts at 01:00, so hour 0
/// (midnight) sorts last.
pub const HOUR_ORDER: [u8; 24] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 0,
];

/// One month of answered/unanswered/service-level counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRow {
    /// Month label.
    pub month: Month,
    /// Calls with status "Atendida".
    pub answered: u32,
    /// Calls with status "Não atendida agente".
    pub unanswered: u32,
    /// `answered + unanswered`; other statuses are excluded.
    pub total: u32,
    /// Calls answered within the 20-second service level.
    pub service_level: u32,
}

/// One weekday of answered/unanswered counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayRow {
    /// Weekday label.
    pub weekday: Weekday,
    /// Calls with status "Atendida".
    pub answered: u32,
    /// Calls with status "Não atendida agente".
    pub unanswered: u32,
}

/// One hour of answered/unanswered counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyRow {
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Calls with status "Atendida".
    pub answered: u32,
    /// Calls with status "Não atendida agente".
    pub unanswered: u32,
}

/// One duration bucket's share of the filtered rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationRow {
    /// Bucket label.
    pub bucket: DurationBucket,
    /// Rows in this bucket.
    pub count: u32,
    /// `count / total filtered rows * 100`, rounded to two decimals.
    /// Independent rounding means the column need not sum to exactly 100.
    pub percentage: f64,
}

fn count_matching<K, F>(view: &FilteredView<'_>, mut key: F) -> HashMap<K, u32>
where
    K: Eq + Hash,
    F: FnMut(&CallRecord) -> Option<K>,
{
    let mut counts = HashMap::new();
    for record in view.iter() {
        if let Some(key) = key(record) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}

/// Aggregates answered, unanswered, and service-level counts per month.
///
/// The three count maps are joined on the union of their keys; a month
/// present in any of them appears with the missing counts as zero. Output is
/// in calendar order, months absent from all three maps omitted.
#[instrument(skip_all)]
pub fn monthly_summary(view: &FilteredView<'_>) -> Vec<MonthlyRow> {
    let answered = count_matching(view, |record| {
        (record.status == CallStatus::Answered).then_some(record.month)
    });
    let unanswered = count_matching(view, |record| {
        (record.status == CallStatus::NotAnsweredByAgent).then_some(record.month)
    });
    let service_level = count_matching(view, |record| {
        record.met_service_level.then_some(record.month)
    });

    let rows: Vec<MonthlyRow> = Month::ALL
        .iter()
        .copied()
        .filter(|month| {
            answered.contains_key(month)
                || unanswered.contains_key(month)
                || service_level.contains_key(month)
        })
        .map(|month| {
            let answered_count = answered.get(&month).copied().unwrap_or(0);
            let unanswered_count = unanswered.get(&month).copied().unwrap_or(0);
            MonthlyRow {
                month,
                answered: answered_count,
                unanswered: unanswered_count,
                total: answered_count + unanswered_count,
                service_level: service_level.get(&month).copied().unwrap_or(0),
            }
        })
        .collect();

    debug!(rows = rows.len(), "aggregated monthly summary");
    rows
}

/// Aggregates answered and unanswered counts per weekday, Monday first.
#[instrument(skip_all)]
pub fn weekday_summary(view: &FilteredView<'_>) -> Vec<WeekdayRow> {
    let answered = count_matching(view, |record| {
        (record.status == CallStatus::Answered).then_some(record.weekday)
    });
    let unanswered = count_matching(view, |record| {
        (record.status == CallStatus::NotAnsweredByAgent).then_some(record.weekday)
    });

    let rows: Vec<WeekdayRow> = Weekday::ALL
        .iter()
        .copied()
        .filter(|weekday| answered.contains_key(weekday) || unanswered.contains_key(weekday))
        .map(|weekday| WeekdayRow {
            weekday,
            answered: answered.get(&weekday).copied().unwrap_or(0),
            unanswered: unanswered.get(&weekday).copied().unwrap_or(0),
        })
        .collect();

    debug!(rows = rows.len(), "aggregated weekday summary");
    rows
}

/// Aggregates answered and unanswered counts per hour of day.
///
/// Records with an unknown hour are excluded. Output follows [`HOUR_ORDER`]:
/// 1 through 23, then 0.
#[instrument(skip_all)]
pub fn hourly_summary(view: &FilteredView<'_>) -> Vec<HourlyRow> {
    let answered = count_matching(view, |record| {
        if record.status == CallStatus::Answered {
            record.hour
        } else {
            None
        }
    });
    let unanswered = count_matching(view, |record| {
        if record.status == CallStatus::NotAnsweredByAgent {
            record.hour
        } else {
            None
        }
    });

    let rows: Vec<HourlyRow> = HOUR_ORDER
        .iter()
        .copied()
        .filter(|hour| answered.contains_key(hour) || unanswered.contains_key(hour))
        .map(|hour| HourlyRow {
            hour,
            answered: answered.get(&hour).copied().unwrap_or(0),
            unanswered: unanswered.get(&hour).copied().unwrap_or(0),
        })
        .collect();

    debug!(rows = rows.len(), "aggregated hourly summary");
    rows
}

/// Counts filtered rows per duration bucket and derives each bucket's share.
///
/// Rows are ordered by count descending for display; the canonical bucket
/// order breaks ties. Percentages are rounded independently.
#[instrument(skip_all)]
pub fn duration_summary(view: &FilteredView<'_>) -> Vec<DurationRow> {
    let counts = count_matching(view, |record| Some(record.duration_bucket));
    let total = view.len();

    let mut rows: Vec<DurationRow> = DurationBucket::ALL
        .iter()
        .copied()
        .filter_map(|bucket| {
            counts.get(&bucket).copied().map(|count| DurationRow {
                bucket,
                count,
                percentage: if total > 0 {
                    round2(f64::from(count) / total as f64 * 100.0)
                } else {
                    0.0
                },
            })
        })
        .collect();

    // Stable sort: equal counts keep the canonical bucket order.
    rows.sort_by(|a, b| b.count.cmp(&a.count));

    debug!(rows = rows.len(), "aggregated duration summary");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{apply, FilterSelection};
    use crate::store::RecordStore;
    use callboard_common::CallDuration;
    use chrono::NaiveDate;

    fn record(
        month: Month,
        weekday: Weekday,
        hour: Option<u8>,
        status: CallStatus,
        met_service_level: bool,
        bucket: DurationBucket,
    ) -> CallRecord {
        CallRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            hour,
            duration: CallDuration::from_secs(120),
            destination: "Ana".to_string(),
            month,
            weekday,
            status,
            met_service_level,
            duration_bucket: bucket,
        }
    }

    fn view_over(store: &RecordStore) -> FilteredView<'_> {
        let selection = FilterSelection::all_within(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        );
        apply(store, &selection)
    }

    #[test]
    fn monthly_counts_join_on_the_union_of_keys() {
        let store = RecordStore::new(vec![
            // Janeiro: both statuses.
            record(Month::January, Weekday::Monday, Some(9), CallStatus::Answered, true, DurationBucket::Short),
            record(Month::January, Weekday::Monday, Some(9), CallStatus::NotAnsweredByAgent, false, DurationBucket::Short),
            // Março: only unanswered.
            record(Month::March, Weekday::Monday, Some(9), CallStatus::NotAnsweredByAgent, false, DurationBucket::Short),
        ]);

        let rows = monthly_summary(&view_over(&store));
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].month, Month::January);
        assert_eq!(rows[0].answered, 1);
        assert_eq!(rows[0].unanswered, 1);
        assert_eq!(rows[0].total, 2);
        assert_eq!(rows[0].service_level, 1);

        assert_eq!(rows[1].month, Month::March);
        assert_eq!(rows[1].answered, 0);
        assert_eq!(rows[1].unanswered, 1);
        assert_eq!(rows[1].total, 1);
        assert_eq!(rows[1].service_level, 0);
    }

    #[test]
    fn monthly_janeiro_scenario() {
        let mut records = Vec::new();
        for i in 0..3 {
            records.push(record(
                Month::January,
                Weekday::Monday,
                Some(9),
                CallStatus::Answered,
                i < 2,
                DurationBucket::Short,
            ));
        }
        for _ in 0..2 {
            records.push(record(
                Month::January,
                Weekday::Monday,
                Some(9),
                CallStatus::NotAnsweredByAgent,
                false,
                DurationBucket::Short,
            ));
        }
        // Padding rows in another month so the table has 10 rows total.
        for _ in 0..5 {
            records.push(record(
                Month::June,
                Weekday::Friday,
                Some(14),
                CallStatus::Other("Abandonada".to_string()),
                false,
                DurationBucket::Medium,
            ));
        }
        let store = RecordStore::new(records);

        let rows = monthly_summary(&view_over(&store));
        let janeiro = rows.iter().find(|row| row.month == Month::January).unwrap();
        assert_eq!(janeiro.answered, 3);
        assert_eq!(janeiro.unanswered, 2);
        assert_eq!(janeiro.total, 5);
        assert_eq!(janeiro.service_level, 2);
    }

    #[test]
    fn other_statuses_do_not_create_monthly_rows() {
        let store = RecordStore::new(vec![record(
            Month::May,
            Weekday::Wednesday,
            Some(9),
            CallStatus::Other("Abandonada".to_string()),
            false,
            DurationBucket::Short,
        )]);

        assert!(monthly_summary(&view_over(&store)).is_empty());
    }

    #[test]
    fn months_come_out_in_calendar_order_regardless_of_input_order() {
        let store = RecordStore::new(vec![
            record(Month::December, Weekday::Monday, Some(9), CallStatus::Answered, false, DurationBucket::Short),
            record(Month::February, Weekday::Monday, Some(9), CallStatus::Answered, false, DurationBucket::Short),
            record(Month::July, Weekday::Monday, Some(9), CallStatus::Answered, false, DurationBucket::Short),
        ]);

        let months: Vec<Month> = monthly_summary(&view_over(&store))
            .iter()
            .map(|row| row.month)
            .collect();
        assert_eq!(months, vec![Month::February, Month::July, Month::December]);
    }

    #[test]
    fn weekday_rows_follow_monday_first_order() {
        let store = RecordStore::new(vec![
            record(Month::January, Weekday::Sunday, Some(9), CallStatus::Answered, false, DurationBucket::Short),
            record(Month::January, Weekday::Tuesday, Some(9), CallStatus::NotAnsweredByAgent, false, DurationBucket::Short),
            record(Month::January, Weekday::Tuesday, Some(9), CallStatus::Answered, false, DurationBucket::Short),
        ]);

        let rows = weekday_summary(&view_over(&store));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].weekday, Weekday::Tuesday);
        assert_eq!(rows[0].answered, 1);
        assert_eq!(rows[0].unanswered, 1);
        assert_eq!(rows[1].weekday, Weekday::Sunday);
        assert_eq!(rows[1].answered, 1);
        assert_eq!(rows[1].unanswered, 0);
    }

    #[test]
    fn hour_zero_sorts_last() {
        let store = RecordStore::new(vec![
            record(Month::January, Weekday::Monday, Some(0), CallStatus::Answered, false, DurationBucket::Short),
            record(Month::January, Weekday::Monday, Some(23), CallStatus::Answered, false, DurationBucket::Short),
        ]);

        let hours: Vec<u8> = hourly_summary(&view_over(&store))
            .iter()
            .map(|row| row.hour)
            .collect();
        assert_eq!(hours, vec![23, 0]);
    }

    #[test]
    fn unknown_hours_are_excluded_from_hourly_counts() {
        let store = RecordStore::new(vec![
            record(Month::January, Weekday::Monday, None, CallStatus::Answered, false, DurationBucket::Short),
            record(Month::January, Weekday::Monday, Some(8), CallStatus::Answered, false, DurationBucket::Short),
        ]);

        let rows = hourly_summary(&view_over(&store));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hour, 8);
        assert_eq!(rows[0].answered, 1);
    }

    #[test]
    fn duration_rows_sort_by_count_descending_with_percentages() {
        let mut records = Vec::new();
        for _ in 0..6 {
            records.push(record(Month::January, Weekday::Monday, Some(9), CallStatus::Answered, false, DurationBucket::Medium));
        }
        for _ in 0..3 {
            records.push(record(Month::January, Weekday::Monday, Some(9), CallStatus::Answered, false, DurationBucket::Short));
        }
        records.push(record(Month::January, Weekday::Monday, Some(9), CallStatus::Answered, false, DurationBucket::Long));
        let store = RecordStore::new(records);

        let rows = duration_summary(&view_over(&store));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].bucket, DurationBucket::Medium);
        assert_eq!(rows[0].count, 6);
        assert_eq!(rows[0].percentage, 60.0);
        assert_eq!(rows[1].bucket, DurationBucket::Short);
        assert_eq!(rows[1].percentage, 30.0);
        assert_eq!(rows[2].bucket, DurationBucket::Long);
        assert_eq!(rows[2].percentage, 10.0);
    }

    #[test]
    fn duration_percentages_round_independently() {
        let mut records = Vec::new();
        for _ in 0..1 {
            records.push(record(Month::January, Weekday::Monday, Some(9), CallStatus::Answered, false, DurationBucket::Short));
        }
        for _ in 0..1 {
            records.push(record(Month::January, Weekday::Monday, Some(9), CallStatus::Answered, false, DurationBucket::Medium));
        }
        records.push(record(Month::January, Weekday::Monday, Some(9), CallStatus::Answered, false, DurationBucket::Long));
        let store = RecordStore::new(records);

        let rows = duration_summary(&view_over(&store));
        for row in &rows {
            assert_eq!(row.percentage, 33.33);
        }
        let sum: f64 = rows.iter().map(|row| row.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.5);
    }

    #[test]
    fn empty_view_yields_empty_summaries() {
        let store = RecordStore::new(Vec::new());
        let view = view_over(&store);

        assert!(monthly_summary(&view).is_empty());
        assert!(weekday_summary(&view).is_empty());
        assert!(hourly_summary(&view).is_empty());
        assert!(duration_summary(&view).is_empty());
    }

    #[test]
    fn aggregations_are_deterministic() {
        let store = RecordStore::new(vec![
            record(Month::January, Weekday::Monday, Some(9), CallStatus::Answered, true, DurationBucket::Short),
            record(Month::February, Weekday::Tuesday, Some(10), CallStatus::NotAnsweredByAgent, false, DurationBucket::Medium),
            record(Month::February, Weekday::Sunday, Some(0), CallStatus::Answered, false, DurationBucket::Long),
        ]);
        let view = view_over(&store);

        assert_eq!(monthly_summary(&view), monthly_summary(&view));
        assert_eq!(weekday_summary(&view), weekday_summary(&view));
        assert_eq!(hourly_summary(&view), hourly_summary(&view));
        assert_eq!(duration_summary(&view), duration_summary(&view));
    }
}
