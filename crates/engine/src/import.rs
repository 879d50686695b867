//! CSV account import.
//!
//! The header row is required and indexed by lowercase column name. Only
//! `name` is mandatory; `phone`, `address`, `email`, `decision_maker`,
//! `creator` and `created_at` are picked up when present. Rows are numbered
//! from the header (row 1), so the first data row is row 2.

use std::{collections::HashMap, io::Read};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{EngineError, NewAccount, ResultEngine, ops::Engine};

/// Creator recorded when neither the row nor the caller names one.
const FALLBACK_CREATOR: &str = "Import";

/// Outcome of an import run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub skipped: usize,
    /// Row-numbered messages, one per rejected row.
    pub errors: Vec<String>,
}

struct Columns(HashMap<String, usize>);

impl Columns {
    fn from_header(header: &StringRecord) -> Self {
        let index = header
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_lowercase(), idx))
            .filter(|(name, _)| !name.is_empty())
            .collect();
        Self(index)
    }

    fn field<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
        self.0
            .get(column)
            .and_then(|idx| record.get(*idx))
            .map(str::trim)
    }

    fn text(&self, record: &StringRecord, column: &str) -> String {
        self.field(record, column).unwrap_or_default().to_string()
    }
}

/// Parse an import timestamp.
///
/// Accepted layouts: RFC 3339, `YYYY-MM-DD HH:MM` and `YYYY-MM-DD` (both read
/// in `zone`), then RFC 2822.
pub fn parse_import_time(value: &str, zone: Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        return local_to_utc(naive, zone);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return local_to_utc(date.and_hms_opt(0, 0, 0)?, zone);
    }
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn local_to_utc(naive: NaiveDateTime, zone: Tz) -> Option<DateTime<Utc>> {
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

impl Engine {
    /// Import accounts from CSV.
    ///
    /// Blank names and duplicate names are skipped and reported; a missing
    /// `name` column fails the whole import. Timestamps that do not parse fall
    /// back to the insertion time.
    pub async fn import_accounts_csv<R: Read>(
        &self,
        reader: R,
        default_creator: &str,
        zone: Tz,
    ) -> ResultEngine<ImportReport> {
        let mut csv = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let columns = Columns::from_header(csv.headers()?);
        if !columns.0.contains_key("name") {
            return Err(EngineError::InvalidInput(
                "csv missing 'name' column".to_string(),
            ));
        }

        let mut report = ImportReport::default();
        let rows: Vec<_> = csv.records().collect();
        for (idx, row) in rows.into_iter().enumerate() {
            let line = idx + 2;
            let record = match row {
                Ok(record) => record,
                Err(err) => {
                    report.errors.push(format!("row {line}: {err}"));
                    report.skipped += 1;
                    continue;
                }
            };

            let Some(name) = columns.field(&record, "name") else {
                report.errors.push(format!("row {line}: missing name field"));
                report.skipped += 1;
                continue;
            };
            if name.is_empty() {
                report
                    .errors
                    .push(format!("row {line}: account name required"));
                report.skipped += 1;
                continue;
            }

            let creator = columns
                .field(&record, "creator")
                .filter(|value| !value.is_empty())
                .or_else(|| Some(default_creator.trim()).filter(|value| !value.is_empty()))
                .unwrap_or(FALLBACK_CREATOR);
            let created_at = columns
                .field(&record, "created_at")
                .filter(|value| !value.is_empty())
                .and_then(|value| parse_import_time(value, zone));

            let account = NewAccount {
                name: name.to_string(),
                phone: columns.text(&record, "phone"),
                address: columns.text(&record, "address"),
                email: columns.text(&record, "email"),
                decision_maker: columns.text(&record, "decision_maker"),
                creator: creator.to_string(),
                created_at,
            };

            match self.create_account(account).await {
                Ok(_) => report.created += 1,
                Err(EngineError::AccountExists(existing)) => {
                    report
                        .errors
                        .push(format!("row {line}: duplicate account '{existing}'"));
                    report.skipped += 1;
                }
                Err(err) => {
                    report.errors.push(format!("row {line}: {err}"));
                    report.skipped += 1;
                }
            }
        }

        tracing::info!(
            created = report.created,
            skipped = report.skipped,
            "account import finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_rfc3339() {
        let parsed = parse_import_time("2025-03-01T10:30:00+02:00", Tz::UTC).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn local_layouts_use_the_zone() {
        let zone: Tz = "Europe/Rome".parse().unwrap();
        let minutes = parse_import_time("2025-01-15 09:00", zone).unwrap();
        assert_eq!(minutes, Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap());

        let day = parse_import_time("2025-01-15", zone).unwrap();
        assert_eq!(day, Utc.with_ymd_and_hms(2025, 1, 14, 23, 0, 0).unwrap());
    }

    #[test]
    fn parses_rfc2822() {
        let parsed = parse_import_time("Sat, 01 Mar 2025 10:30:00 +0000", Tz::UTC).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn rejects_unknown_layouts() {
        assert_eq!(parse_import_time("03/01/2025", Tz::UTC), None);
        assert_eq!(parse_import_time("", Tz::UTC), None);
    }
}
