use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Manufacturer assigned when the model field holds no usable text.
pub const UNKNOWN_MANUFACTURER: &str = "unknown";

// ---------------------------------------------------------------------------
// CellValue – a single cell in an extra (non-required) column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value covering the dtypes CSV/JSON sources
/// produce. Extra columns keep whatever the file had, nulls included.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Manufacturer derivation
// ---------------------------------------------------------------------------

/// Derive the manufacturer from a model cell: first whitespace-delimited
/// token of a textual model, [`UNKNOWN_MANUFACTURER`] for anything else
/// (including text with no token at all). Total, never fails.
pub fn derive_manufacturer(model: &CellValue) -> String {
    match model {
        CellValue::String(s) => s
            .split_whitespace()
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_MANUFACTURER.to_string()),
        _ => UNKNOWN_MANUFACTURER.to_string(),
    }
}

// ---------------------------------------------------------------------------
// RawListing / Listing – one row before and after cleaning
// ---------------------------------------------------------------------------

/// One parsed row before cleaning: every required field still optional.
/// `model` is a [`CellValue`] because a present-but-non-text model survives
/// cleaning and derives the `"unknown"` manufacturer.
#[derive(Debug, Clone, Default)]
pub struct RawListing {
    pub model_year: Option<i32>,
    pub fuel: Option<String>,
    pub model: Option<CellValue>,
    pub vehicle_type: Option<String>,
    pub condition: Option<String>,
    pub price: Option<f64>,
    /// Everything outside the six required columns, column name → cell.
    pub extra: BTreeMap<String, CellValue>,
}

/// One cleaned listing. Required fields are guaranteed present; `extra`
/// passes through untouched and may still hold nulls.
#[derive(Debug, Clone)]
pub struct Listing {
    pub model_year: i32,
    pub fuel: String,
    pub model: String,
    pub vehicle_type: String,
    pub condition: String,
    pub price: f64,
    /// Derived: first token of `model`, or `"unknown"` for non-text models.
    pub manufacturer: String,
    pub extra: BTreeMap<String, CellValue>,
}

impl Listing {
    /// Cleaning contract: a raw row survives iff every required field is
    /// present. An empty result set upstream is valid.
    pub fn from_raw(raw: RawListing) -> Option<Listing> {
        let model = raw.model.filter(|m| !m.is_null())?;
        let manufacturer = derive_manufacturer(&model);
        Some(Listing {
            model_year: raw.model_year?,
            fuel: raw.fuel?,
            model: model.to_string(),
            vehicle_type: raw.vehicle_type?,
            condition: raw.condition?,
            price: raw.price?,
            manufacturer,
            extra: raw.extra,
        })
    }
}

// ---------------------------------------------------------------------------
// ListingDataset – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The full cleaned dataset with indices computed once per load.
#[derive(Debug, Clone, Default)]
pub struct ListingDataset {
    /// All cleaned listings, in source order.
    pub listings: Vec<Listing>,
    /// Extra column names in the order the source file presented them.
    pub extra_columns: Vec<String>,
    /// Distinct manufacturers in encounter order; feeds the two dropdowns.
    pub manufacturers: Vec<String>,
    /// Listings per manufacturer.
    pub manufacturer_counts: BTreeMap<String, usize>,
}

impl ListingDataset {
    /// Build the manufacturer indices from cleaned listings.
    pub fn from_listings(listings: Vec<Listing>, extra_columns: Vec<String>) -> Self {
        let mut manufacturers: Vec<String> = Vec::new();
        let mut manufacturer_counts: BTreeMap<String, usize> = BTreeMap::new();

        for listing in &listings {
            let count = manufacturer_counts
                .entry(listing.manufacturer.clone())
                .or_insert(0);
            if *count == 0 {
                manufacturers.push(listing.manufacturer.clone());
            }
            *count += 1;
        }

        ListingDataset {
            listings,
            extra_columns,
            manufacturers,
            manufacturer_counts,
        }
    }

    /// Manufacturers whose listing count meets the threshold (inclusive).
    pub fn big_manufacturers(&self, threshold: usize) -> BTreeSet<&str> {
        self.manufacturer_counts
            .iter()
            .filter(|(_, &count)| count >= threshold)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
