/// Data layer: core types, loading, filtering, and derived views.
///
/// Architecture:
/// ```text
///  emissions .csv / codebook .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + header renaming → EmissionDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ EmissionDataset │  Vec<EmissionRecord>, country / year index
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐     ┌──────────┐
///   │  filter   │ ──▶ │ analysis  │ ──▶ │  export   │
///   └──────────┘     └──────────┘     └──────────┘
///    row indices      means, sums,      filtered CSV
///                     correlations
/// ```

pub mod analysis;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod testutil {
    use std::collections::BTreeMap;

    use super::model::{EmissionDataset, EmissionRecord};

    /// Deterministic dataset for tests: World / China / India, 1990–2023.
    ///
    /// Besides a few real metric names it carries three synthetic columns:
    /// `gdp` present only on even years, `co2 doubled` = 2 × co2, and
    /// `constant` fixed at 5.0.
    pub fn sample_dataset() -> EmissionDataset {
        let countries = [("World", 30000.0), ("China", 9000.0), ("India", 2000.0)];
        let mut records = Vec::new();

        for (country, base) in countries {
            for year in 1990..=2023 {
                let t = (year - 1990) as f64;
                let co2 = base + base * 0.01 * t;
                let mut values = BTreeMap::new();
                values.insert("co2".to_string(), co2);
                values.insert("coal co2".to_string(), co2 * 0.4);
                values.insert("oil co2".to_string(), co2 * 0.3);
                values.insert("population".to_string(), 1_000_000.0 + 10_000.0 * t);
                values.insert("co2 doubled".to_string(), co2 * 2.0);
                values.insert("constant".to_string(), 5.0);
                if year % 2 == 0 {
                    values.insert("gdp".to_string(), 1_000.0 + 50.0 * t);
                }
                records.push(EmissionRecord {
                    country: country.to_string(),
                    year,
                    values,
                });
            }
        }

        let metric_columns = [
            "co2",
            "coal co2",
            "oil co2",
            "population",
            "gdp",
            "co2 doubled",
            "constant",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();

        EmissionDataset::from_records(records, metric_columns)
    }
}
