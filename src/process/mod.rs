// src/process/mod.rs
use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde_json::Value;
use tracing::info;

use crate::error::{Result, ScrapeError};
use crate::Record;

pub mod date_parser;

/// Days of history retained relative to the run date.
pub const LOOKBACK_DAYS: i64 = 3650;

/// Columns retained by projection, in export order.
pub const EXPORT_COLUMNS: &[&str] = &[
    "reportingrailroadcode",
    "accidentnumber",
    "date",
    "time",
    "accidenttype",
    "hazmatreleasedcars",
    "station",
    "stateabbr",
    "temperature",
    "visibility_code",
    "visibility",
    "weathercondition",
    "tracktype",
    "equipmenttype",
    "trainspeed",
    "equipmentdamagecost",
    "trackdamagecost",
    "totaldamagecost",
    "primaryaccidentcausecode",
    "latitude",
    "longitude",
];

const CAUSE_CODE_COLUMN: &str = "primaryaccidentcausecode";
const DATE_COLUMN: &str = "date";

/// Observed report-date range of the filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

/// Filtered, projected rows ready for export.
#[derive(Debug)]
pub struct FilteredTable {
    /// Column names, in the order row fields are laid out.
    pub headers: Vec<String>,
    /// One projected row per surviving record, in source-page order.
    pub rows: Vec<Vec<String>>,
    /// Min/max report date over `rows`; `None` when nothing survived.
    pub span: Option<DateSpan>,
}

/// Apply exclusion, projection, and the recency window to `records`.
///
/// `today` is sampled once by the caller so every record is compared
/// against the same cutoff. A record missing a projected column or
/// carrying an unparsable `date` fails the whole run.
pub fn filter_records(
    records: &[Record],
    excluded_codes: &HashSet<String>,
    today: NaiveDate,
) -> Result<FilteredTable> {
    let cutoff = today - Duration::days(LOOKBACK_DAYS);
    let date_idx = EXPORT_COLUMNS
        .iter()
        .position(|c| *c == DATE_COLUMN)
        .expect("date column is projected");

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut span: Option<DateSpan> = None;
    let mut dropped_by_code = 0usize;
    let mut dropped_stale = 0usize;

    for record in records {
        // membership test only; a missing or non-string code is kept
        if let Some(code) = record.get(CAUSE_CODE_COLUMN).and_then(Value::as_str) {
            if excluded_codes.contains(code) {
                dropped_by_code += 1;
                continue;
            }
        }

        let row = project(record)?;

        let raw_date = &row[date_idx];
        let date = date_parser::parse_report_date(raw_date).ok_or_else(|| {
            ScrapeError::DateParse {
                value: raw_date.clone(),
            }
        })?;
        if date < cutoff {
            dropped_stale += 1;
            continue;
        }

        span = Some(match span {
            None => DateSpan {
                earliest: date,
                latest: date,
            },
            Some(s) => DateSpan {
                earliest: s.earliest.min(date),
                latest: s.latest.max(date),
            },
        });
        rows.push(row);
    }

    info!(
        kept = rows.len(),
        dropped_by_code,
        dropped_stale,
        %cutoff,
        "filtered records"
    );

    Ok(FilteredTable {
        headers: EXPORT_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        rows,
        span,
    })
}

/// Project one record onto `EXPORT_COLUMNS`, rendering scalars to text.
fn project(record: &Record) -> Result<Vec<String>> {
    EXPORT_COLUMNS
        .iter()
        .map(|&column| {
            record
                .get(column)
                .map(scalar_to_string)
                .ok_or_else(|| ScrapeError::MissingColumn {
                    column: column.to_string(),
                })
        })
        .collect()
}

/// Render a JSON scalar the way it appears in the export.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn exclude(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| (*c).to_string()).collect()
    }

    /// A record with every projected column present, then the given
    /// cause code and report date.
    fn report(number: &str, code: &str, date: NaiveDate) -> Record {
        let mut map = Record::new();
        for &column in EXPORT_COLUMNS {
            map.insert(column.to_string(), Value::String(String::new()));
        }
        map.insert("accidentnumber".into(), Value::String(number.into()));
        map.insert(CAUSE_CODE_COLUMN.into(), Value::String(code.into()));
        map.insert(
            DATE_COLUMN.into(),
            Value::String(format!("{date}T00:00:00.000")),
        );
        map
    }

    fn column_values(table: &FilteredTable, column: &str) -> Vec<String> {
        let idx = EXPORT_COLUMNS.iter().position(|c| *c == column).unwrap();
        table.rows.iter().map(|row| row[idx].clone()).collect()
    }

    #[test]
    fn excluded_codes_never_survive() {
        let records = vec![
            report("A0001", "T001", today() - Duration::days(30)),
            report("A0002", "X200", today() - Duration::days(30)),
            report("A0003", "T001", today() - Duration::days(60)),
        ];

        let table = filter_records(&records, &exclude(&["T001"]), today()).unwrap();

        assert_eq!(column_values(&table, "accidentnumber"), vec!["A0002"]);
        assert!(!column_values(&table, CAUSE_CODE_COLUMN)
            .iter()
            .any(|c| c == "T001"));
    }

    #[test]
    fn recency_boundary_is_inclusive() {
        let records = vec![
            report("ONCUT", "X200", today() - Duration::days(LOOKBACK_DAYS)),
            report("STALE", "X200", today() - Duration::days(LOOKBACK_DAYS + 1)),
        ];

        let table = filter_records(&records, &exclude(&[]), today()).unwrap();

        assert_eq!(column_values(&table, "accidentnumber"), vec!["ONCUT"]);
    }

    #[test]
    fn filters_by_code_then_by_recency() {
        let two_years = today() - Duration::days(2 * 365);
        let one_year = today() - Duration::days(365);
        let eleven_years = today() - Duration::days(11 * 365);
        let records = vec![
            report("A0001", "T001", one_year),
            report("A0002", "X200", two_years),
            report("A0003", "X201", one_year),
            report("A0004", "X300", eleven_years),
        ];

        let table = filter_records(&records, &exclude(&["T001"]), today()).unwrap();

        assert_eq!(
            column_values(&table, "accidentnumber"),
            vec!["A0002", "A0003"]
        );
        assert_eq!(
            table.span,
            Some(DateSpan {
                earliest: two_years,
                latest: one_year,
            })
        );
    }

    #[test]
    fn missing_projected_column_is_fatal() {
        let mut record = report("A0001", "X200", today());
        record.remove("station");

        let err = filter_records(&[record], &exclude(&[]), today()).unwrap_err();

        match err {
            ScrapeError::MissingColumn { column } => assert_eq!(column, "station"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unparsable_date_is_fatal() {
        let mut record = report("A0001", "X200", today());
        record.insert(DATE_COLUMN.into(), json!("04/15/2023"));

        let err = filter_records(&[record], &exclude(&[]), today()).unwrap_err();

        assert!(matches!(err, ScrapeError::DateParse { .. }));
    }

    #[test]
    fn null_cause_code_is_kept_and_rendered_empty() {
        let mut record = report("A0001", "X200", today());
        record.insert(CAUSE_CODE_COLUMN.into(), Value::Null);

        let table = filter_records(&[record], &exclude(&["T001"]), today()).unwrap();

        assert_eq!(column_values(&table, CAUSE_CODE_COLUMN), vec![""]);
    }

    #[test]
    fn numeric_scalars_render_as_text() {
        let mut record = report("A0001", "X200", today());
        record.insert("trainspeed".into(), json!(42));
        record.insert("totaldamagecost".into(), json!(12500.5));

        let table = filter_records(&[record], &exclude(&[]), today()).unwrap();

        assert_eq!(column_values(&table, "trainspeed"), vec!["42"]);
        assert_eq!(column_values(&table, "totaldamagecost"), vec!["12500.5"]);
    }

    #[test]
    fn empty_input_yields_empty_table_without_span() {
        let table = filter_records(&[], &exclude(&[]), today()).unwrap();

        assert!(table.rows.is_empty());
        assert_eq!(table.span, None);
        assert_eq!(table.headers, EXPORT_COLUMNS);
    }
}
