use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use thiserror::Error;

use super::model::{CodebookEntry, EmissionDataset, EmissionRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural problems with an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("CSV missing required '{0}' column")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Emissions table
// ---------------------------------------------------------------------------

/// Load the emissions table from a CSV file.
///
/// Expected layout: a header row naming the columns, a `country` string
/// column, an integer `year` column, and any number of numeric metric
/// columns.  Header names are normalized (trimmed, underscores replaced by
/// spaces) so `co2_per_capita` and `co2 per capita` are the same column.
/// Blank or non-numeric metric cells are treated as missing.
pub fn load_dataset(path: &Path) -> Result<EmissionDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "csv" {
        bail!(LoadError::UnsupportedExtension(ext));
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(normalize_header)
        .collect();

    let country_idx = headers
        .iter()
        .position(|h| h == "country")
        .ok_or(LoadError::MissingColumn("country"))?;
    let year_idx = headers
        .iter()
        .position(|h| h == "year")
        .ok_or(LoadError::MissingColumn("year"))?;

    let metric_columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != country_idx && *i != year_idx)
        .map(|(_, h)| h.clone())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let country = record.get(country_idx).unwrap_or("").trim().to_string();
        let year: i32 = record
            .get(year_idx)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("CSV row {row_no}: 'year' is not an integer"))?;

        let mut values = BTreeMap::new();
        for (col_idx, cell) in record.iter().enumerate() {
            if col_idx == country_idx || col_idx == year_idx {
                continue;
            }
            if let Ok(v) = cell.trim().parse::<f64>() {
                values.insert(headers[col_idx].clone(), v);
            }
        }

        records.push(EmissionRecord {
            country,
            year,
            values,
        });
    }

    Ok(EmissionDataset::from_records(records, metric_columns))
}

/// Trim a header cell and replace underscores with spaces.  This is the
/// only column renaming the loader performs.
pub fn normalize_header(h: &str) -> String {
    h.trim().replace('_', " ")
}

// ---------------------------------------------------------------------------
// Codebook
// ---------------------------------------------------------------------------

/// Load the data-dictionary CSV (`column,description,unit,source`).
pub fn load_codebook(path: &Path) -> Result<Vec<CodebookEntry>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut entries = Vec::new();
    for (row_no, result) in reader.deserialize::<CodebookEntry>().enumerate() {
        let entry = result.with_context(|| format!("codebook row {row_no}"))?;
        entries.push(entry);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_csv_and_normalizes_headers() {
        let path = write_temp(
            "emissions.csv",
            "country,year,co2,co2_per_capita, coal_co2 \n\
             World,2000,100.5,4.2,40.0\n\
             World,2001,,4.5,41.0\n\
             Chile,2000,8.0,3.1,\n",
        );
        let ds = load_dataset(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.metric_columns,
            vec!["co2", "co2 per capita", "coal co2"]
        );
        assert_eq!(ds.year_min, 2000);
        assert_eq!(ds.year_max, 2001);
        assert!(ds.countries.contains("Chile"));

        // Blank cells are missing, not zero.
        assert_eq!(ds.records[1].value("co2"), None);
        assert_eq!(ds.records[1].value("co2 per capita"), Some(4.5));
        assert_eq!(ds.records[2].value("coal co2"), None);
    }

    #[test]
    fn rejects_non_csv_extension() {
        let path = std::env::temp_dir().join("emissions.parquet");
        let err = load_dataset(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported file extension"));
    }

    #[test]
    fn missing_country_column_is_an_error() {
        let path = write_temp("no-country.csv", "nation,year,co2\nWorld,2000,1.0\n");
        let err = load_dataset(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("'country'"));
    }

    #[test]
    fn loads_codebook_rows() {
        let path = write_temp(
            "codebook.csv",
            "column,description,unit,source\n\
             co2,Annual CO2 emissions,million tonnes,Global Carbon Project\n",
        );
        let entries = load_codebook(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].column, "co2");
        assert_eq!(entries[0].unit, "million tonnes");
    }
}
