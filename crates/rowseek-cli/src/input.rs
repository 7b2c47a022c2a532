//! Loading rows from JSON and CSV.
//!
//! Rows become `serde_json` objects either way, so the pipeline sees one row
//! type. CSV cells are typed by inference: empty cells are null, `true` and
//! `false` are booleans, numbers written in canonical form are numbers and
//! anything else is a string.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use rowseek::json_value;
use serde_json::{Map, Number, Value as JsonValue};
use tracing::debug;

/// A JSON object row.
pub type JsonRow = Map<String, JsonValue>;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// A JSON array of objects.
    Json,
    /// CSV with a header line.
    Csv,
}

impl InputFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(InputFormat::Json)
        } else if ext.eq_ignore_ascii_case("csv") {
            Some(InputFormat::Csv)
        } else {
            None
        }
    }
}

/// Loaded rows plus the column names seen, in first-seen order.
///
/// JSON objects keep their key order (`serde_json` with `preserve_order`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<JsonRow>,
}

/// Reads a table from `path`, or stdin when `path` is `-`.
///
/// Without an explicit format the extension decides; stdin and unknown
/// extensions are read as JSON.
pub fn read_table(path: &Path, format: Option<InputFormat>) -> Result<Table> {
    let from_stdin = path.as_os_str() == "-";
    let format = match format {
        Some(format) => format,
        None if from_stdin => InputFormat::Json,
        None => InputFormat::from_path(path).unwrap_or(InputFormat::Json),
    };

    let reader: Box<dyn Read> = if from_stdin {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(path)
            .with_context(|| format!("failed to open input {}", path.display()))?;
        Box::new(file)
    };

    let table = match format {
        InputFormat::Json => parse_json(reader),
        InputFormat::Csv => parse_csv(reader),
    }
    .with_context(|| format!("failed to read rows from {}", path.display()))?;

    debug!(
        path = %path.display(),
        ?format,
        rows = table.rows.len(),
        columns = table.headers.len(),
        "loaded input"
    );
    Ok(table)
}

/// Parses a JSON array of objects.
pub fn parse_json<R: Read>(reader: R) -> Result<Table> {
    let value: JsonValue = serde_json::from_reader(reader).context("invalid JSON")?;
    let JsonValue::Array(items) = value else {
        bail!("expected a JSON array of objects");
    };

    let mut table = Table::default();
    for (index, item) in items.into_iter().enumerate() {
        let JsonValue::Object(row) = item else {
            bail!("row {index} is not a JSON object");
        };
        for key in row.keys() {
            if !table.headers.contains(key) {
                table.headers.push(key.clone());
            }
        }
        table.rows.push(row);
    }
    Ok(table)
}

/// Parses CSV with a header line, inferring cell types.
pub fn parse_csv<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("invalid CSV header")?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // header is line 1
        let record = record.with_context(|| format!("invalid CSV record on line {}", index + 2))?;
        let row: JsonRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), infer_cell(cell)))
            .collect();
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

/// Types a raw CSV cell.
///
/// A number is only inferred when its canonical text is the cell text
/// itself, so `2.10`, `007`, `+5` and `1e3` stay strings and filters on the
/// value as written keep matching.
pub fn infer_cell(raw: &str) -> JsonValue {
    match raw {
        "" => return JsonValue::Null,
        "true" => return JsonValue::Bool(true),
        "false" => return JsonValue::Bool(false),
        _ => {}
    }

    let number = raw
        .parse::<i64>()
        .ok()
        .map(Number::from)
        .or_else(|| raw.parse::<u64>().ok().map(Number::from))
        .or_else(|| raw.parse::<f64>().ok().and_then(Number::from_f64));

    match number.map(JsonValue::Number) {
        Some(value) if json_value(&value).to_text().as_deref() == Some(raw) => value,
        _ => JsonValue::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.json")), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_path(Path::new("a.CSV")), Some(InputFormat::Csv));
        assert_eq!(InputFormat::from_path(Path::new("a.txt")), None);
        assert_eq!(InputFormat::from_path(Path::new("-")), None);
    }

    #[test]
    fn infers_cell_types() {
        assert_eq!(infer_cell(""), JsonValue::Null);
        assert_eq!(infer_cell("true"), json!(true));
        assert_eq!(infer_cell("False"), json!("False"));
        assert_eq!(infer_cell("42"), json!(42));
        assert_eq!(infer_cell("-7"), json!(-7));
        assert_eq!(infer_cell("18446744073709551615"), json!(u64::MAX));
        assert_eq!(infer_cell("2.5"), json!(2.5));
        assert_eq!(infer_cell("0"), json!(0));
        assert_eq!(infer_cell("0.5"), json!(0.5));
        assert_eq!(infer_cell("1e+21"), json!(1e21));
        assert_eq!(infer_cell("NaN"), json!("NaN"));
        assert_eq!(infer_cell("inf"), json!("inf"));
        assert_eq!(infer_cell("Alice"), json!("Alice"));
    }

    #[test]
    fn non_canonical_numbers_keep_their_text() {
        for raw in ["2.10", "1.50", "3.0", "007", "-0", "+5", "1e3", "1E21", ".5"] {
            assert_eq!(infer_cell(raw), json!(raw), "{raw}");
        }
    }

    #[test]
    fn csv_filter_matches_cell_as_written() {
        let table = parse_csv("version,price\n2.10,1.50\n2.1,3\n".as_bytes()).unwrap();

        let hits = rowseek::filter_by_field(&table.rows, Some("version"), "2.10");
        assert_eq!(hits, vec![&table.rows[0]]);
        assert_eq!(table.rows[0]["price"], json!("1.50"));
        assert_eq!(table.rows[1]["version"], json!(2.1));
        assert_eq!(table.rows[1]["price"], json!(3));
    }

    #[test]
    fn parses_csv_with_header_order() {
        let csv = "name, age ,active\nAlice,31,true\nBob,,false\n";
        let table = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(table.headers, ["name", "age", "active"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            JsonValue::Object(table.rows[0].clone()),
            json!({"name": "Alice", "age": 31, "active": true})
        );
        assert_eq!(table.rows[1]["age"], JsonValue::Null);
    }

    #[test]
    fn ragged_csv_is_an_error() {
        let csv = "a,b\n1,2\n3\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"), "{err:#}");
    }

    #[test]
    fn parses_json_rows() {
        let json = r#"[{"name": "Alice", "age": 31}, {"name": "Bob", "team": "ops"}]"#;
        let table = parse_json(json.as_bytes()).unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.headers, ["name", "age", "team"]);
    }

    #[test]
    fn json_must_be_array_of_objects() {
        assert!(parse_json(r#"{"name": "Alice"}"#.as_bytes()).is_err());
        let err = parse_json(r#"[{"a": 1}, 2]"#.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
        assert!(parse_json("not json".as_bytes()).is_err());
    }
}
