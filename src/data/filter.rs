use std::collections::BTreeSet;

use super::model::{CORRELATION_METRICS, EMISSION_METRICS, EmissionDataset};

// ---------------------------------------------------------------------------
// Selection – the current filter state driving all views
// ---------------------------------------------------------------------------

/// User-chosen filter state: country set, inclusive year range, the metric
/// shown on the chart pages, and the column set for the correlation view.
/// Recreated cheaply on every control change; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct Selection {
    pub countries: BTreeSet<String>,
    /// Inclusive (min, max) year range.
    pub years: (i32, i32),
    pub metric: String,
    pub corr_columns: BTreeSet<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            countries: BTreeSet::from(["World".to_string()]),
            years: (2000, 2020),
            metric: EMISSION_METRICS[0].to_string(),
            corr_columns: CORRELATION_METRICS
                .iter()
                .take(3)
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl Selection {
    /// Clamp the year range into the dataset's bounds, keeping min ≤ max.
    pub fn clamp_years(&mut self, year_min: i32, year_max: i32) {
        self.years.0 = self.years.0.clamp(year_min, year_max);
        self.years.1 = self.years.1.clamp(year_min, year_max);
        if self.years.0 > self.years.1 {
            self.years.1 = self.years.0;
        }
    }
}

/// Return indices of rows that pass the current selection.
///
/// A row passes when its country is in `selection.countries` and its year
/// lies in the inclusive range.  An empty country set or a range outside the
/// data bounds yields an empty result, which the views display as a notice
/// rather than an error.
pub fn filtered_indices(dataset: &EmissionDataset, selection: &Selection) -> Vec<usize> {
    let (lo, hi) = selection.years;
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            selection.countries.contains(&rec.country) && rec.year >= lo && rec.year <= hi
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::sample_dataset;

    fn select(countries: &[&str], years: (i32, i32)) -> Selection {
        Selection {
            countries: countries.iter().map(|c| c.to_string()).collect(),
            years,
            ..Selection::default()
        }
    }

    #[test]
    fn rows_satisfy_membership_and_range() {
        let ds = sample_dataset();
        let sel = select(&["China", "India"], (1995, 2005));
        for idx in filtered_indices(&ds, &sel) {
            let rec = &ds.records[idx];
            assert!(sel.countries.contains(&rec.country));
            assert!((1995..=2005).contains(&rec.year));
        }
    }

    #[test]
    fn world_2000_to_2020_returns_21_rows() {
        // Sample data has World rows for every year 1990–2023.
        let ds = sample_dataset();
        let sel = select(&["World"], (2000, 2020));
        let idx = filtered_indices(&ds, &sel);
        assert_eq!(idx.len(), 21);
        for i in idx {
            assert_eq!(ds.records[i].country, "World");
            assert!((2000..=2020).contains(&ds.records[i].year));
        }
    }

    #[test]
    fn empty_country_set_yields_empty_subset() {
        let ds = sample_dataset();
        let sel = select(&[], (2000, 2020));
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn out_of_bounds_range_yields_empty_subset() {
        let ds = sample_dataset();
        let sel = select(&["World"], (2100, 2200));
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn clamp_years_keeps_min_below_max() {
        let mut sel = select(&["World"], (1800, 2100));
        sel.clamp_years(1990, 2023);
        assert_eq!(sel.years, (1990, 2023));

        let mut sel = select(&["World"], (2050, 2060));
        sel.clamp_years(1990, 2023);
        assert_eq!(sel.years, (2023, 2023));
    }
}
