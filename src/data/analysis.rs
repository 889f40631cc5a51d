use std::collections::BTreeMap;

use super::model::EmissionDataset;

// ---------------------------------------------------------------------------
// Derived views over a filtered row subset
// ---------------------------------------------------------------------------

/// Arithmetic mean of `metric` per country over the given rows, sorted
/// ascending by mean.  Rows with a missing cell do not count towards the
/// denominator.  An empty subset produces an empty result.
pub fn mean_by_country(
    dataset: &EmissionDataset,
    indices: &[usize],
    metric: &str,
) -> Vec<(String, f64)> {
    let mut acc: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
    for &idx in indices {
        let rec = &dataset.records[idx];
        if let Some(v) = rec.value(metric) {
            let entry = acc.entry(rec.country.as_str()).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }

    let mut means: Vec<(String, f64)> = acc
        .into_iter()
        .map(|(country, (sum, n))| (country.to_string(), sum / n as f64))
        .collect();
    means.sort_by(|a, b| a.1.total_cmp(&b.1));
    means
}

/// Column-wise sums over the given rows, in the order of `columns`.
/// Missing cells contribute nothing; a column absent from every row sums
/// to zero.
pub fn column_sums(
    dataset: &EmissionDataset,
    indices: &[usize],
    columns: &[&str],
) -> Vec<(String, f64)> {
    columns
        .iter()
        .map(|&col| {
            let sum: f64 = indices
                .iter()
                .filter_map(|&idx| dataset.records[idx].value(col))
                .sum();
            (col.to_string(), sum)
        })
        .collect()
}

/// Turn column sums into percentage shares: non-positive sums are dropped,
/// the rest are normalized so the shares total 100.  Empty when nothing is
/// left after dropping.
pub fn composition_shares(sums: &[(String, f64)]) -> Vec<(String, f64)> {
    let positive: Vec<&(String, f64)> = sums.iter().filter(|(_, v)| *v > 0.0).collect();
    let total: f64 = positive.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    positive
        .into_iter()
        .map(|(col, v)| (col.clone(), v / total * 100.0))
        .collect()
}

/// Pairwise Pearson correlation across the selected columns over the given
/// rows.  Each pair is computed over the rows where both cells are present
/// (pairwise-complete).  The matrix is symmetric with a unit diagonal; a
/// degenerate pair (fewer than two complete rows, or zero variance) yields
/// 0.  Callers gate on |columns| ≥ 2 before invoking.
pub fn correlation_matrix(
    dataset: &EmissionDataset,
    indices: &[usize],
    columns: &[String],
) -> Vec<Vec<f64>> {
    let n = columns.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let pairs: Vec<(f64, f64)> = indices
                .iter()
                .filter_map(|&idx| {
                    let rec = &dataset.records[idx];
                    Some((rec.value(&columns[i])?, rec.value(&columns[j])?))
                })
                .collect();
            let r = pearson(&pairs);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }
    matrix
}

fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    cov / denom
}

/// (year, value) points for one country's time series over the given rows,
/// sorted by year.  Rows missing the metric are skipped.
pub fn country_series(
    dataset: &EmissionDataset,
    indices: &[usize],
    country: &str,
    metric: &str,
) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = indices
        .iter()
        .filter_map(|&idx| {
            let rec = &dataset.records[idx];
            if rec.country != country {
                return None;
            }
            Some([rec.year as f64, rec.value(metric)?])
        })
        .collect();
    points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{Selection, filtered_indices};
    use crate::data::testutil::sample_dataset;

    fn world_subset(ds: &EmissionDataset) -> Vec<usize> {
        let sel = Selection {
            countries: ["World", "China", "India"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            years: (2000, 2020),
            ..Selection::default()
        };
        filtered_indices(ds, &sel)
    }

    #[test]
    fn means_are_sorted_ascending() {
        let ds = sample_dataset();
        let idx = world_subset(&ds);
        let means = mean_by_country(&ds, &idx, "co2");
        assert!(!means.is_empty());
        for pair in means.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn mean_skips_missing_cells() {
        let ds = sample_dataset();
        // "gdp" is only present on even years in the sample data.
        let idx: Vec<usize> = (0..ds.len()).collect();
        let means = mean_by_country(&ds, &idx, "gdp");
        let world = means.iter().find(|(c, _)| c == "World").unwrap();
        // Mean over the present cells only, so it stays finite and positive.
        assert!(world.1.is_finite() && world.1 > 0.0);
    }

    #[test]
    fn empty_subset_gives_empty_aggregate() {
        let ds = sample_dataset();
        assert!(mean_by_country(&ds, &[], "co2").is_empty());
    }

    #[test]
    fn shares_drop_non_positive_and_sum_to_100() {
        let sums = vec![
            ("coal co2".to_string(), 60.0),
            ("oil co2".to_string(), 40.0),
            ("flaring co2".to_string(), 0.0),
            ("other industry co2".to_string(), -3.0),
        ];
        let shares = composition_shares(&sums);
        assert_eq!(shares.len(), 2);
        let total: f64 = shares.iter().map(|(_, v)| v).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!((shares[0].1 - 60.0).abs() < 1e-9);
    }

    #[test]
    fn all_non_positive_sums_give_empty_shares() {
        let sums = vec![("a".to_string(), -1.0), ("b".to_string(), 0.0)];
        assert!(composition_shares(&sums).is_empty());
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let ds = sample_dataset();
        let idx = world_subset(&ds);
        let cols: Vec<String> = ["co2", "coal co2", "population"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let m = correlation_matrix(&ds, &idx, &cols);
        for i in 0..cols.len() {
            assert_eq!(m[i][i], 1.0);
            for j in 0..cols.len() {
                assert!((m[i][j] - m[j][i]).abs() < 1e-12);
                assert!(m[i][j] >= -1.0 - 1e-9 && m[i][j] <= 1.0 + 1e-9);
            }
        }
    }

    #[test]
    fn perfectly_linear_columns_correlate_to_one() {
        let ds = sample_dataset();
        let idx: Vec<usize> = (0..ds.len()).collect();
        // "co2 doubled" is exactly 2 * co2 in the sample data.
        let cols = vec!["co2".to_string(), "co2 doubled".to_string()];
        let m = correlation_matrix(&ds, &idx, &cols);
        assert!((m[0][1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_variance_column_correlates_to_zero() {
        let ds = sample_dataset();
        let idx: Vec<usize> = (0..ds.len()).collect();
        // "constant" holds the same value on every row.
        let cols = vec!["co2".to_string(), "constant".to_string()];
        let m = correlation_matrix(&ds, &idx, &cols);
        assert_eq!(m[0][1], 0.0);
    }

    #[test]
    fn country_series_is_sorted_by_year() {
        let ds = sample_dataset();
        let idx = world_subset(&ds);
        let series = country_series(&ds, &idx, "World", "co2");
        assert_eq!(series.len(), 21);
        for pair in series.windows(2) {
            assert!(pair[0][0] < pair[1][0]);
        }
    }
}
