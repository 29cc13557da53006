// Ingestion: turns an uploaded CSV or a prediction-service response into the
// record collection the dashboard is computed from.
use crate::error::{Error, Result};
use crate::types::{FieldValue, Record};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
}

/// Where a collection came from, for the load message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Predictions,
    Csv,
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    #[serde(default)]
    rows: Option<Vec<Record>>,
}

/// Infer a typed value from raw cell text.
///
/// Empty cells are absent, `true`/`false` become booleans and numeric-looking
/// text becomes a number. Everything else stays text, including values like
/// `1,200` that only the numeric resolver knows how to read.
pub fn infer_value(raw: &str) -> FieldValue {
    let s = raw.trim();
    if s.is_empty() {
        return FieldValue::Null;
    }
    if s.eq_ignore_ascii_case("true") {
        return FieldValue::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return FieldValue::Bool(false);
    }
    let numeric_looking = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && s.chars().any(|c| c.is_ascii_digit());
    if numeric_looking {
        if let Ok(n) = s.parse::<f64>() {
            if n.is_finite() {
                return FieldValue::Number(n);
            }
        }
    }
    FieldValue::Text(raw.to_string())
}

/// Parse header-driven CSV into records, one per data row.
///
/// Short rows leave their trailing columns absent. Rows the reader cannot
/// decode are skipped and counted in the report.
pub fn parse_csv<R: Read>(reader: R) -> Result<(Vec<Record>, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut report = LoadReport::default();
    let mut records = Vec::new();

    for result in rdr.records() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping row {}: {}", report.total_rows, e);
                report.parse_errors += 1;
                continue;
            }
        };
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| (name.trim(), infer_value(cell)))
            .collect();
        records.push(record);
    }

    report.loaded_rows = records.len();
    Ok((records, report))
}

pub fn load_csv(path: &Path) -> Result<(Vec<Record>, LoadReport)> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let (records, report) = parse_csv(file)?;
    log::info!(
        "Loaded {} of {} rows from {}",
        report.loaded_rows,
        report.total_rows,
        path.display()
    );
    Ok((records, report))
}

/// Rows of a prediction-service response, or `None` when it carries none.
pub fn parse_prediction_response(json: &str) -> Result<Option<Vec<Record>>> {
    let response: PredictionResponse = serde_json::from_str(json)?;
    Ok(response.rows.filter(|rows| !rows.is_empty()))
}

pub fn load_predictions(path: &Path) -> Result<Option<Vec<Record>>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_prediction_response(&text)
}

/// Prefer scored rows from a prediction response; fall back to the raw CSV.
///
/// A prediction file that cannot be read or holds no rows is not fatal as
/// long as the CSV loads.
pub fn load(csv_path: &Path, predictions: Option<&Path>) -> Result<(Vec<Record>, LoadReport, Source)> {
    if let Some(p) = predictions {
        match load_predictions(p) {
            Ok(Some(rows)) => {
                log::info!("Using {} scored rows from {}", rows.len(), p.display());
                let report = LoadReport {
                    total_rows: rows.len(),
                    loaded_rows: rows.len(),
                    parse_errors: 0,
                };
                return Ok((rows, report, Source::Predictions));
            }
            Ok(None) => log::warn!("{} has no rows; parsing CSV instead", p.display()),
            Err(e) => log::warn!("Ignoring prediction file: {}", e),
        }
    }
    let (rows, report) = load_csv(csv_path)?;
    Ok((rows, report, Source::Csv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{COST, PROJECT_ID};
    use std::io::Write;

    #[test]
    fn infers_cell_types() {
        assert_eq!(infer_value(""), FieldValue::Null);
        assert_eq!(infer_value("  "), FieldValue::Null);
        assert_eq!(infer_value("TRUE"), FieldValue::Bool(true));
        assert_eq!(infer_value("12.5"), FieldValue::Number(12.5));
        assert_eq!(infer_value("-3"), FieldValue::Number(-3.0));
        assert_eq!(infer_value("Solar"), FieldValue::Text("Solar".into()));
        assert_eq!(infer_value("1,200"), FieldValue::Text("1,200".into()));
        assert_eq!(infer_value("-"), FieldValue::Text("-".into()));
    }

    #[test]
    fn parses_rows_with_headers() {
        let csv = "ProjectID,ProjectType,TotalCost,Timeline\nP1,Solar,100,5\nP2,Wind,,7\n\nP3,Hydro\n";
        let (records, report) = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(report.loaded_rows, 3);
        assert_eq!(report.parse_errors, 0);
        assert_eq!(COST.value(&records[0]), 100.0);
        assert!(records[1].get("TotalCost").is_none());
        assert!(records[2].get("Timeline").is_none());
        assert_eq!(PROJECT_ID.value(&records[2]), "P3");
    }

    #[test]
    fn reads_prediction_rows() {
        let json = r#"{"rows":[{"ProjectID":"P1","Predicted_Cost":120.5,"Overall_Risk":null}]}"#;
        let rows = parse_prediction_response(json).unwrap().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(COST.value(&rows[0]), 120.5);
        assert!(rows[0].get("Overall_Risk").is_none());
    }

    #[test]
    fn empty_or_missing_rows_mean_no_predictions() {
        assert_eq!(parse_prediction_response(r#"{"rows":[]}"#).unwrap(), None);
        assert_eq!(parse_prediction_response(r#"{"detail":"x"}"#).unwrap(), None);
        assert!(parse_prediction_response("not json").is_err());
    }

    #[test]
    fn falls_back_to_csv_when_predictions_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("projects.csv");
        let pred_path = dir.path().join("predictions.json");
        let mut f = File::create(&csv_path).unwrap();
        writeln!(f, "ProjectID,TotalCost\nP1,10").unwrap();
        std::fs::write(&pred_path, r#"{"rows":[]}"#).unwrap();

        let (rows, report, source) = load(&csv_path, Some(pred_path.as_path())).unwrap();
        assert_eq!(source, Source::Csv);
        assert_eq!(rows.len(), 1);
        assert_eq!(report.total_rows, 1);
    }

    #[test]
    fn prefers_prediction_rows() {
        let dir = tempfile::tempdir().unwrap();
        let pred_path = dir.path().join("predictions.json");
        std::fs::write(&pred_path, r#"{"rows":[{"ProjectID":"A"},{"ProjectID":"B"}]}"#).unwrap();

        let missing_csv = dir.path().join("missing.csv");
        let (rows, _, source) = load(&missing_csv, Some(pred_path.as_path())).unwrap();
        assert_eq!(source, Source::Predictions);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn missing_csv_is_an_io_error() {
        let err = load_csv(Path::new("/nonexistent/projects.csv")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
