use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, Listing, ListingDataset, RawListing};

/// Columns a usable dataset must provide. `type` is the source column name;
/// the struct field is `vehicle_type` because `type` is reserved in Rust.
pub const REQUIRED_COLUMNS: [&str; 6] =
    ["model_year", "fuel", "model", "type", "condition", "price"];

/// Schema problems that make a file unusable as a whole (as opposed to a
/// single bad row, which the cleaner silently drops).
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listings dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row, comma-delimited (the `vehicles.csv` shape)
/// * `.json` – `[{ "model_year": 2015, "model": "bmw x5", ... }, ...]`
pub fn load_file(path: &Path) -> Result<ListingDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            read_json(&text)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Clean raw rows and build the dataset indices.
fn build_dataset(raw_rows: Vec<RawListing>, extra_columns: Vec<String>) -> ListingDataset {
    let total = raw_rows.len();
    let listings: Vec<Listing> = raw_rows.into_iter().filter_map(Listing::from_raw).collect();
    if listings.len() < total {
        log::debug!(
            "dropped {} of {total} rows with missing required fields",
            total - listings.len()
        );
    }
    ListingDataset::from_listings(listings, extra_columns)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; the six required columns are
/// located by name, everything else becomes an extra column. A required cell
/// that is empty or unparseable counts as missing, so the cleaner drops the
/// row; a missing required *column* fails the whole file.
pub(crate) fn read_csv(input: impl Read) -> Result<ListingDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut required = [0usize; 6];
    for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or(SchemaError::MissingColumn(name))?;
    }
    let [year_idx, fuel_idx, model_idx, type_idx, condition_idx, price_idx] = required;

    let extra_columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !required.contains(i))
        .map(|(_, h)| h.clone())
        .collect();

    let mut raw_rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let mut extra = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if required.contains(&col_idx) || col_idx >= headers.len() {
                continue;
            }
            extra.insert(headers[col_idx].clone(), infer_cell(value.trim()));
        }

        raw_rows.push(RawListing {
            model_year: parse_year(field(year_idx)),
            fuel: non_empty(field(fuel_idx)),
            model: non_empty(field(model_idx)).map(CellValue::String),
            vehicle_type: non_empty(field(type_idx)),
            condition: non_empty(field(condition_idx)),
            price: parse_price(field(price_idx)),
            extra,
        });
    }

    Ok(build_dataset(raw_rows, extra_columns))
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Years arrive as "2015" or "2015.0" depending on how the file was written.
fn parse_year(s: &str) -> Option<i32> {
    let value: f64 = s.parse().ok()?;
    if value.is_finite() { Some(value as i32) } else { None }
}

fn parse_price(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Parse a raw CSV field into the closest-fitting cell type.
fn infer_cell(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "model_year": 2015,
///     "fuel": "gas",
///     "model": "bmw x5",
///     "type": "suv",
///     "condition": "good",
///     "price": 20000,
///     "odometer": 81000
///   },
///   ...
/// ]
/// ```
pub(crate) fn read_json(text: &str) -> Result<ListingDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut extra_columns: Vec<String> = Vec::new();
    let mut raw_rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut raw = RawListing::default();
        for (key, val) in obj {
            match key.as_str() {
                "model_year" => raw.model_year = json_year(val),
                "fuel" => raw.fuel = json_text(val),
                "model" => {
                    let cell = json_to_cell(val);
                    if !cell.is_null() {
                        raw.model = Some(cell);
                    }
                }
                "type" => raw.vehicle_type = json_text(val),
                "condition" => raw.condition = json_text(val),
                "price" => raw.price = val.as_f64().filter(|p| p.is_finite()),
                _ => {
                    if !extra_columns.iter().any(|c| c == key) {
                        extra_columns.push(key.clone());
                    }
                    raw.extra.insert(key.clone(), json_to_cell(val));
                }
            }
        }
        raw_rows.push(raw);
    }

    Ok(build_dataset(raw_rows, extra_columns))
}

fn json_text(val: &JsonValue) -> Option<String> {
    val.as_str().map(str::trim).and_then(non_empty)
}

fn json_year(val: &JsonValue) -> Option<i32> {
    val.as_f64().filter(|y| y.is_finite()).map(|y| y as i32)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}
