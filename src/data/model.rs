use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Metric column groups
// ---------------------------------------------------------------------------

/// Metric columns selectable on the emissions page.
pub const EMISSION_METRICS: &[&str] = &[
    "co2",
    "co2 per capita",
    "coal co2",
    "coal co2 per capita",
    "consumption co2",
    "consumption co2 per capita",
    "flaring co2",
    "flaring co2 per capita",
    "gas co2",
    "gas co2 per capita",
    "methane",
    "methane per capita",
    "nitrous oxide",
    "nitrous oxide per capita",
    "oil co2",
    "oil co2 per capita",
    "other industry co2",
];

/// Absolute (non per-capita) metrics used for the composition treemap.
pub const SHARE_METRICS: &[&str] = &[
    "co2",
    "coal co2",
    "consumption co2",
    "flaring co2",
    "gas co2",
    "methane",
    "nitrous oxide",
    "oil co2",
    "other industry co2",
];

/// Metric columns selectable on the temperature page.
pub const TEMPERATURE_METRICS: &[&str] = &[
    "temperature change from ghg",
    "temperature change from ch4",
    "temperature change from co2",
    "temperature change from n2o",
];

/// Candidate columns for the correlation view.
pub const CORRELATION_METRICS: &[&str] = &[
    "gdp",
    "population",
    "co2 growth abs",
    "co2",
    "co2 per capita",
    "coal co2",
    "coal co2 per capita",
    "consumption co2",
    "consumption co2 per capita",
    "flaring co2",
    "flaring co2 per capita",
    "gas co2",
    "gas co2 per capita",
    "methane",
    "methane per capita",
    "nitrous oxide",
    "nitrous oxide per capita",
    "oil co2",
    "oil co2 per capita",
    "other industry co2",
];

// ---------------------------------------------------------------------------
// EmissionRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One (country, year) row.  Numeric cells that were blank in the source CSV
/// are simply absent from `values`; aggregates skip them.
#[derive(Debug, Clone)]
pub struct EmissionRecord {
    pub country: String,
    pub year: i32,
    /// Metric column → value, missing cells omitted.
    pub values: BTreeMap<String, f64>,
}

impl EmissionRecord {
    /// Value of a metric column, if present on this row.
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.values.get(metric).copied()
    }
}

// ---------------------------------------------------------------------------
// EmissionDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices.
#[derive(Debug, Clone)]
pub struct EmissionDataset {
    /// All rows in file order.
    pub records: Vec<EmissionRecord>,
    /// Sorted set of country names appearing in the data.
    pub countries: BTreeSet<String>,
    /// Inclusive year bounds over all rows.
    pub year_min: i32,
    pub year_max: i32,
    /// Numeric column names in header order (excludes country, year).
    pub metric_columns: Vec<String>,
}

impl EmissionDataset {
    /// Build country / year indices from loaded rows.
    pub fn from_records(records: Vec<EmissionRecord>, metric_columns: Vec<String>) -> Self {
        let mut countries = BTreeSet::new();
        let mut year_min = i32::MAX;
        let mut year_max = i32::MIN;

        for rec in &records {
            countries.insert(rec.country.clone());
            year_min = year_min.min(rec.year);
            year_max = year_max.max(rec.year);
        }
        if records.is_empty() {
            year_min = 0;
            year_max = 0;
        }

        EmissionDataset {
            records,
            countries,
            year_min,
            year_max,
            metric_columns,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CodebookEntry – one row of the data dictionary
// ---------------------------------------------------------------------------

/// A data-dictionary row describing one column of the emissions table.
#[derive(Debug, Clone, Deserialize)]
pub struct CodebookEntry {
    pub column: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub source: String,
}
