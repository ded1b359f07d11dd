//! Call-record domain model and the fixed categorical label sets.
//!
//! The report data carries Portuguese wire labels (month and weekday names,
//! call statuses, duration buckets). Each categorical dimension is a closed
//! enum that serializes as its label and parses strictly back from it, so
//! aggregation output preserves the canonical label sets regardless of input
//! row order.

use crate::error::CallboardError;
use crate::utils::{format_hms, parse_hms};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar month of a call, labelled with the fixed Portuguese month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Month {
    /// Janeiro
    January,
    /// Fevereiro
    February,
    /// Março
    March,
    /// Abril
    April,
    /// Maio
    May,
    /// Junho
    June,
    /// Julho
    July,
    /// Agosto
    August,
    /// Setembro
    September,
    /// Outubro
    October,
    /// Novembro
    November,
    /// Dezembro
    December,
}

impl Month {
    /// All months in canonical calendar order (Janeiro through Dezembro).
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// The Portuguese report label for this month.
    pub const fn label(self) -> &'static str {
        match self {
            Month::January => "Janeiro",
            Month::February => "Fevereiro",
            Month::March => "Março",
            Month::April => "Abril",
            Month::May => "Maio",
            Month::June => "Junho",
            Month::July => "Julho",
            Month::August => "Agosto",
            Month::September => "Setembro",
            Month::October => "Outubro",
            Month::November => "Novembro",
            Month::December => "Dezembro",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Month {
    type Err = CallboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .iter()
            .copied()
            .find(|month| month.label() == s.trim())
            .ok_or_else(|| {
                CallboardError::validation_field(format!("unknown month label '{s}'"), "month")
            })
    }
}

impl TryFrom<String> for Month {
    type Error = CallboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.label().to_string()
    }
}

/// Weekday of a call, labelled with the fixed Portuguese weekday names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Weekday {
    /// Segunda
    Monday,
    /// Terça
    Tuesday,
    /// Quarta
    Wednesday,
    /// Quinta
    Thursday,
    /// Sexta
    Friday,
    /// Sábado
    Saturday,
    /// Domingo
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical order (Segunda through Domingo).
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The Portuguese report label for this weekday.
    pub const fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Segunda",
            Weekday::Tuesday => "Terça",
            Weekday::Wednesday => "Quarta",
            Weekday::Thursday => "Quinta",
            Weekday::Friday => "Sexta",
            Weekday::Saturday => "Sábado",
            Weekday::Sunday => "Domingo",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = CallboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .iter()
            .copied()
            .find(|weekday| weekday.label() == s.trim())
            .ok_or_else(|| {
                CallboardError::validation_field(format!("unknown weekday label '{s}'"), "weekday")
            })
    }
}

impl TryFrom<String> for Weekday {
    type Error = CallboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Weekday> for String {
    fn from(weekday: Weekday) -> Self {
        weekday.label().to_string()
    }
}

/// Outcome status of a call.
///
/// Only `Answered` and `NotAnsweredByAgent` participate in the
/// answered/unanswered counts; any other source value is preserved verbatim
/// and excluded from both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CallStatus {
    /// "Atendida" - the call was answered by an agent.
    Answered,
    /// "Não atendida agente" - the call reached the queue but no agent answered.
    NotAnsweredByAgent,
    /// Any other status label from the source table.
    Other(String),
}

/// Wire label for answered calls.
pub const STATUS_ANSWERED: &str = "Atendida";
/// Wire label for calls not answered by an agent.
pub const STATUS_NOT_ANSWERED_BY_AGENT: &str = "Não atendida agente";

impl CallStatus {
    /// The source label for this status.
    pub fn label(&self) -> &str {
        match self {
            CallStatus::Answered => STATUS_ANSWERED,
            CallStatus::NotAnsweredByAgent => STATUS_NOT_ANSWERED_BY_AGENT,
            CallStatus::Other(label) => label,
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for CallStatus {
    fn from(value: &str) -> Self {
        match value {
            STATUS_ANSWERED => CallStatus::Answered,
            STATUS_NOT_ANSWERED_BY_AGENT => CallStatus::NotAnsweredByAgent,
            other => CallStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for CallStatus {
    fn from(value: String) -> Self {
        CallStatus::from(value.as_str())
    }
}

impl From<CallStatus> for String {
    fn from(status: CallStatus) -> Self {
        status.label().to_string()
    }
}

/// Coarse handling-duration category, precomputed upstream of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DurationBucket {
    /// "Curto (<= 15 min)"
    Short,
    /// "Médio (15-30 min)"
    Medium,
    /// "Longo (> 30 min)"
    Long,
}

impl DurationBucket {
    /// All buckets in canonical order, shortest first.
    pub const ALL: [DurationBucket; 3] = [
        DurationBucket::Short,
        DurationBucket::Medium,
        DurationBucket::Long,
    ];

    /// The Portuguese report label for this bucket.
    pub const fn label(self) -> &'static str {
        match self {
            DurationBucket::Short => "Curto (<= 15 min)",
            DurationBucket::Medium => "Médio (15-30 min)",
            DurationBucket::Long => "Longo (> 30 min)",
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DurationBucket {
    type Err = CallboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DurationBucket::ALL
            .iter()
            .copied()
            .find(|bucket| bucket.label() == s.trim())
            .ok_or_else(|| {
                CallboardError::validation_field(
                    format!("unknown duration bucket label '{s}'"),
                    "duration_bucket",
                )
            })
    }
}

impl TryFrom<String> for DurationBucket {
    type Error = CallboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DurationBucket> for String {
    fn from(bucket: DurationBucket) -> Self {
        bucket.label().to_string()
    }
}

/// Elapsed handling time of a call, in whole seconds.
///
/// Parses from and renders as `HH:MM:SS`; hours are unbounded (a total of
/// 30 hours renders as `30:00:00`, never wrapped at 24).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct CallDuration(u64);

impl CallDuration {
    /// Zero-length duration.
    pub const ZERO: CallDuration = CallDuration(0);

    /// Creates a duration from whole seconds.
    pub const fn from_secs(seconds: u64) -> Self {
        CallDuration(seconds)
    }

    /// The duration as whole seconds.
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// Adds two durations, saturating at `u64::MAX` seconds.
    pub const fn saturating_add(self, other: CallDuration) -> CallDuration {
        CallDuration(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for CallDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hms(self.0))
    }
}

impl FromStr for CallDuration {
    type Err = CallboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hms(s).map(CallDuration).ok_or_else(|| {
            CallboardError::validation_field(format!("invalid duration '{s}'"), "duration")
        })
    }
}

impl TryFrom<String> for CallDuration {
    type Error = CallboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CallDuration> for String {
    fn from(duration: CallDuration) -> Self {
        duration.to_string()
    }
}

impl std::iter::Sum for CallDuration {
    fn sum<I: Iterator<Item = CallDuration>>(iter: I) -> Self {
        iter.fold(CallDuration::ZERO, CallDuration::saturating_add)
    }
}

impl<'a> std::iter::Sum<&'a CallDuration> for CallDuration {
    fn sum<I: Iterator<Item = &'a CallDuration>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// One parsed row of the call-record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    /// Calendar date of the call.
    pub date: NaiveDate,
    /// Hour of day (0-23); `None` when the source value was unparseable.
    pub hour: Option<u8>,
    /// Elapsed handling time.
    pub duration: CallDuration,
    /// Handling analyst/queue label.
    pub destination: String,
    /// Month label of the call.
    pub month: Month,
    /// Weekday label of the call.
    pub weekday: Weekday,
    /// Outcome status.
    pub status: CallStatus,
    /// Whether the call was answered within the 20-second service level.
    pub met_service_level: bool,
    /// Precomputed handling-duration category.
    pub duration_bucket: DurationBucket,
}
