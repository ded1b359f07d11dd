//! Record store: the immutable typed call-record table and its CSV ingestion.

use callboard_common::{
    CallDuration, CallRecord, CallStatus, CallboardError, DurationBucket, Month, Result, Weekday,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Options controlling CSV ingestion.
#[derive(Debug, Clone, Default)]
pub struct CsvIngestOptions {
    /// strftime format for the `Data` column. When unset, `%Y-%m-%d` is tried
    /// first and `%d/%m/%Y` as a fallback.
    pub date_format: Option<String>,
}

/// One raw CSV row, one-to-one with the source columns.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Data")]
    date: String,
    #[serde(rename = "Hora", default)]
    hour: String,
    #[serde(rename = "Tempo")]
    duration: String,
    #[serde(rename = "Destino")]
    destination: String,
    #[serde(rename = "Mes")]
    month: String,
    #[serde(rename = "Dia_Semana")]
    weekday: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Atendida_20s", default)]
    met_service_level: String,
    #[serde(rename = "Duração_Atendimento")]
    duration_bucket: String,
}

impl RawRecord {
    fn into_record(self, row: u64, options: &CsvIngestOptions) -> Result<CallRecord> {
        let date = parse_date(&self.date, options.date_format.as_deref()).ok_or_else(|| {
            CallboardError::ingest_at_row(row, format!("unparseable date '{}'", self.date))
        })?;

        let duration = self.duration.parse::<CallDuration>().map_err(|_| {
            CallboardError::ingest_at_row(row, format!("unparseable duration '{}'", self.duration))
        })?;

        let month = self.month.parse::<Month>().map_err(|_| {
            CallboardError::ingest_at_row(row, format!("unknown month label '{}'", self.month))
        })?;

        let weekday = self.weekday.parse::<Weekday>().map_err(|_| {
            CallboardError::ingest_at_row(row, format!("unknown weekday label '{}'", self.weekday))
        })?;

        let duration_bucket = self.duration_bucket.parse::<DurationBucket>().map_err(|_| {
            CallboardError::ingest_at_row(
                row,
                format!("unknown duration bucket label '{}'", self.duration_bucket),
            )
        })?;

        Ok(CallRecord {
            date,
            hour: parse_hour(&self.hour, row),
            duration,
            destination: self.destination.trim().to_string(),
            month,
            weekday,
            status: CallStatus::from(self.status),
            met_service_level: parse_service_level_flag(&self.met_service_level),
            duration_bucket,
        })
    }
}

fn parse_date(raw: &str, format: Option<&str>) -> Option<NaiveDate> {
    // The source may append a midnight time component; only the date part counts.
    let date_part = raw.trim().split_whitespace().next()?;
    if let Some(format) = format {
        return NaiveDate::parse_from_str(date_part, format).ok();
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d/%m/%Y"))
        .ok()
}

/// Hours outside 0-23 or non-integer values become unknown rather than
/// failing ingestion; the row stays in the table but is excluded from the
/// hourly counts.
fn parse_hour(raw: &str, row: u64) -> Option<u8> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && (0.0..=23.0).contains(&value) => Some(value as u8),
        _ => {
            warn!(row, value = trimmed, "coercing unparseable hour to unknown");
            None
        }
    }
}

/// The source flag is numeric; the call met the service level iff it is
/// exactly 1. Anything else, including unparseable values, counts as false.
fn parse_service_level_flag(raw: &str) -> bool {
    raw.trim()
        .parse::<f64>()
        .map(|value| value == 1.0)
        .unwrap_or(false)
}

/// The parsed call-record table.
///
/// Loaded once per source file and never mutated; filtering borrows records
/// into views instead of copying or removing rows.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<CallRecord>,
}

impl RecordStore {
    /// Creates a store from already-parsed records.
    pub fn new(records: Vec<CallRecord>) -> Self {
        Self { records }
    }

    /// Loads a store from a comma-delimited UTF-8 CSV file with default options.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_csv_with(path, &CsvIngestOptions::default())
    }

    /// Loads a store from a CSV file.
    ///
    /// Unparseable dates, durations, and unknown categorical labels are fatal:
    /// they indicate a corrupt source file and the error names the offending
    /// record. Unparseable hours are coerced to unknown instead.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_csv_with(path: impl AsRef<Path>, options: &CsvIngestOptions) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_path(path)
            .map_err(|e| {
                CallboardError::ingest_with_source(
                    format!("failed to open '{}'", path.display()),
                    e,
                )
            })?;

        let mut records = Vec::new();
        for (index, result) in reader.deserialize::<RawRecord>().enumerate() {
            let row = index as u64 + 1;
            let raw = result.map_err(|e| {
                CallboardError::ingest_with_source(format!("row {row}: malformed CSV record"), e)
            })?;
            records.push(raw.into_record(row, options)?);
        }

        info!(records = records.len(), "loaded call records");
        Ok(Self::new(records))
    }

    /// All records in source order.
    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest call dates, used as the default filter range.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        let span = self.records.iter().fold((first, first), |(min, max), record| {
            (min.min(record.date), max.max(record.date))
        });
        Some(span)
    }

    /// Unique destination labels in first-seen order, for selector options.
    pub fn destinations(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.destination) {
                seen.push(record.destination.clone());
            }
        }
        seen
    }

    /// Months that occur in the data, in canonical calendar order.
    pub fn months_present(&self) -> Vec<Month> {
        Month::ALL
            .iter()
            .copied()
            .filter(|month| self.records.iter().any(|record| record.month == *month))
            .collect()
    }

    /// Weekdays that occur in the data, in canonical Monday-first order.
    pub fn weekdays_present(&self) -> Vec<Weekday> {
        Weekday::ALL
            .iter()
            .copied()
            .filter(|weekday| self.records.iter().any(|record| record.weekday == *weekday))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "Data,Hora,Tempo,Destino,Mes,Dia_Semana,Status,Atendida_20s,Duração_Atendimento\n";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(HEADER.as_bytes()).expect("write header");
        for row in rows {
            file.write_all(row.as_bytes()).expect("write row");
            file.write_all(b"\n").expect("write newline");
        }
        file.flush().expect("flush");
        file
    }

    #[test]
    fn loads_well_formed_rows() {
        let file = write_csv(&[
            "2024-01-15,9,00:05:32,Ana,Janeiro,Segunda,Atendida,1,Curto (<= 15 min)",
            "2024-01-16,14,00:20:00,Bruno,Janeiro,Terça,Não atendida agente,0,Médio (15-30 min)",
        ]);

        let store = RecordStore::load_csv(file.path()).unwrap();
        assert_eq!(store.len(), 2);

        let first = &store.records()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(first.hour, Some(9));
        assert_eq!(first.duration.as_secs(), 332);
        assert_eq!(first.destination, "Ana");
        assert_eq!(first.month, Month::January);
        assert_eq!(first.weekday, Weekday::Monday);
        assert_eq!(first.status, CallStatus::Answered);
        assert!(first.met_service_level);
        assert_eq!(first.duration_bucket, DurationBucket::Short);
    }

    #[test]
    fn malformed_hour_becomes_unknown() {
        let file = write_csv(&[
            "2024-01-15,n/a,00:05:32,Ana,Janeiro,Segunda,Atendida,1,Curto (<= 15 min)",
            "2024-01-15,,00:05:32,Ana,Janeiro,Segunda,Atendida,1,Curto (<= 15 min)",
            "2024-01-15,25,00:05:32,Ana,Janeiro,Segunda,Atendida,1,Curto (<= 15 min)",
        ]);

        let store = RecordStore::load_csv(file.path()).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.records().iter().all(|record| record.hour.is_none()));
    }

    #[test]
    fn malformed_date_is_fatal_with_row_number() {
        let file = write_csv(&[
            "2024-01-15,9,00:05:32,Ana,Janeiro,Segunda,Atendida,1,Curto (<= 15 min)",
            "not-a-date,9,00:05:32,Ana,Janeiro,Segunda,Atendida,1,Curto (<= 15 min)",
        ]);

        let err = RecordStore::load_csv(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Ingest error"));
        assert!(message.contains("row 2"));
        assert!(message.contains("not-a-date"));
    }

    #[test]
    fn malformed_duration_is_fatal() {
        let file = write_csv(&[
            "2024-01-15,9,five minutes,Ana,Janeiro,Segunda,Atendida,1,Curto (<= 15 min)",
        ]);

        let err = RecordStore::load_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("unparseable duration"));
    }

    #[test]
    fn unknown_month_label_is_fatal() {
        let file = write_csv(&[
            "2024-01-15,9,00:05:32,Ana,January,Segunda,Atendida,1,Curto (<= 15 min)",
        ]);

        let err = RecordStore::load_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("unknown month label"));
    }

    #[test]
    fn date_format_override_applies() {
        let file = write_csv(&[
            "15/01/2024,9,00:05:32,Ana,Janeiro,Segunda,Atendida,1,Curto (<= 15 min)",
        ]);

        let options = CsvIngestOptions {
            date_format: Some("%d/%m/%Y".to_string()),
        };
        let store = RecordStore::load_csv_with(file.path(), &options).unwrap();
        assert_eq!(
            store.records()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn date_with_midnight_time_component_parses() {
        let file = write_csv(&[
            "2024-01-15 00:00:00,9,00:05:32,Ana,Janeiro,Segunda,Atendida,1,Curto (<= 15 min)",
        ]);

        let store = RecordStore::load_csv(file.path()).unwrap();
        assert_eq!(
            store.records()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn selector_options_reflect_the_data() {
        let file = write_csv(&[
            "2024-02-01,9,00:05:32,Bruno,Fevereiro,Quinta,Atendida,1,Curto (<= 15 min)",
            "2024-01-15,9,00:05:32,Ana,Janeiro,Segunda,Atendida,1,Curto (<= 15 min)",
            "2024-02-02,9,00:05:32,Bruno,Fevereiro,Sexta,Atendida,0,Curto (<= 15 min)",
        ]);

        let store = RecordStore::load_csv(file.path()).unwrap();
        assert_eq!(store.destinations(), vec!["Bruno", "Ana"]);
        assert_eq!(store.months_present(), vec![Month::January, Month::February]);
        assert_eq!(
            store.weekdays_present(),
            vec![Weekday::Monday, Weekday::Thursday, Weekday::Friday]
        );
        assert_eq!(
            store.date_span(),
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 2).unwrap()
            ))
        );
    }

    #[test]
    fn empty_table_has_no_span() {
        let store = RecordStore::default();
        assert!(store.is_empty());
        assert_eq!(store.date_span(), None);
        assert!(store.destinations().is_empty());
    }
}
