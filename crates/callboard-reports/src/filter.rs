//! Filter engine: a conjunction of equality and date-range predicates that
//! turns the record store into a borrowed, order-preserving view.

use crate::store::RecordStore;
use callboard_common::{CallRecord, Month, Weekday};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Either every value of a categorical dimension, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection<T> {
    /// No predicate for this dimension ("Todos").
    All,
    /// Exact-match predicate.
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Whether a record value passes this dimension's predicate.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

/// User-selected filters, rebuilt from scratch for every recomputation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Destination/analyst predicate.
    pub destination: Selection<String>,
    /// Month predicate.
    pub month: Selection<Month>,
    /// Weekday predicate.
    pub weekday: Selection<Weekday>,
    /// Inclusive date range; always applied.
    pub date_range: (NaiveDate, NaiveDate),
}

impl FilterSelection {
    /// Selection that keeps every record within the given inclusive range.
    pub fn all_within(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            destination: Selection::All,
            month: Selection::All,
            weekday: Selection::All,
            date_range: (start, end),
        }
    }

    fn keeps(&self, record: &CallRecord) -> bool {
        self.destination.matches(&record.destination)
            && self.month.matches(&record.month)
            && self.weekday.matches(&record.weekday)
            && record.date >= self.date_range.0
            && record.date <= self.date_range.1
    }
}

/// Borrowed view over the records that matched a selection, in source order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a CallRecord>,
}

impl<'a> FilteredView<'a> {
    /// The matched records, in the store's original order.
    pub fn records(&self) -> &[&'a CallRecord] {
        &self.records
    }

    /// Number of matched records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing matched; the caller should surface a "no data" notice
    /// instead of numeric output.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the matched records.
    pub fn iter(&self) -> impl Iterator<Item = &'a CallRecord> + '_ {
        self.records.iter().copied()
    }
}

/// Applies a selection to the store.
///
/// Dimensions set to [`Selection::All`] contribute no predicate; the date
/// range is always applied, inclusive on both ends. Predicates compose as a
/// logical AND. An empty result is not an error.
#[instrument(skip_all)]
pub fn apply<'a>(store: &'a RecordStore, selection: &FilterSelection) -> FilteredView<'a> {
    let records: Vec<&CallRecord> = store
        .records()
        .iter()
        .filter(|record| selection.keeps(record))
        .collect();
    debug!(matched = records.len(), total = store.len(), "applied filter selection");
    FilteredView { records }
}
