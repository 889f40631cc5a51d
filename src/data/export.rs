use std::path::Path;

use anyhow::{Context, Result};

use super::model::EmissionDataset;

// ---------------------------------------------------------------------------
// Filtered-subset CSV export
// ---------------------------------------------------------------------------

/// Write the filtered row subset to a CSV file.
///
/// Columns: `country`, `year`, then every metric column in dataset order.
/// Missing cells are written as empty fields so the output round-trips
/// through [`super::loader::load_dataset`].
pub fn write_filtered_csv(
    dataset: &EmissionDataset,
    indices: &[usize],
    path: &Path,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["country".to_string(), "year".to_string()];
    header.extend(dataset.metric_columns.iter().cloned());
    writer.write_record(&header).context("writing CSV header")?;

    for &idx in indices {
        let rec = &dataset.records[idx];
        let mut row = vec![rec.country.clone(), rec.year.to_string()];
        for col in &dataset.metric_columns {
            row.push(match rec.value(col) {
                Some(v) => v.to_string(),
                None => String::new(),
            });
        }
        writer
            .write_record(&row)
            .with_context(|| format!("writing row for {} {}", rec.country, rec.year))?;
    }

    writer.flush().context("flushing CSV writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{Selection, filtered_indices};
    use crate::data::loader::load_dataset;
    use crate::data::testutil::sample_dataset;

    #[test]
    fn export_round_trips_through_the_loader() {
        let ds = sample_dataset();
        let sel = Selection {
            countries: ["World".to_string()].into(),
            years: (2000, 2002),
            ..Selection::default()
        };
        let indices = filtered_indices(&ds, &sel);
        assert_eq!(indices.len(), 3);

        let path = std::env::temp_dir().join(format!("{}-export.csv", std::process::id()));
        write_filtered_csv(&ds, &indices, &path).unwrap();
        let reloaded = load_dataset(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.metric_columns, ds.metric_columns);
        for (i, &idx) in indices.iter().enumerate() {
            let orig = &ds.records[idx];
            let got = &reloaded.records[i];
            assert_eq!(got.country, orig.country);
            assert_eq!(got.year, orig.year);
            assert_eq!(got.value("co2"), orig.value("co2"));
        }
    }

    #[test]
    fn empty_subset_writes_header_only() {
        let ds = sample_dataset();
        let path = std::env::temp_dir().join(format!("{}-empty.csv", std::process::id()));
        write_filtered_csv(&ds, &[], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("country,year,"));
    }
}
