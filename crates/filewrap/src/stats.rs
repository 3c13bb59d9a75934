//! Aggregates over a span of jagged rows.
//!
//! Every aggregate treats the span as one flat population of entries, so a
//! span's mean divides by its total entry count rather than its row count.
//! An empty span yields 0 for every aggregate.

use crate::table::Row;

/// Number of entries across `rows`.
pub fn count(rows: &[Row]) -> usize {
    rows.iter().map(Vec::len).sum()
}

pub fn sum(rows: &[Row]) -> f64 {
    entries(rows).sum()
}

pub fn mean(rows: &[Row]) -> f64 {
    match count(rows) {
        0 => 0.0,
        n => sum(rows) / n as f64,
    }
}

/// Population variance around the span's mean.
pub fn variance(rows: &[Row]) -> f64 {
    let n = count(rows);
    if n == 0 {
        return 0.0;
    }
    let mean = sum(rows) / n as f64;
    entries(rows).map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64
}

pub fn std_dev(rows: &[Row]) -> f64 {
    variance(rows).sqrt()
}

fn entries(rows: &[Row]) -> impl Iterator<Item = f64> + '_ {
    rows.iter().flatten().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_to(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_span_is_zero() {
        let rows: Vec<Row> = vec![];
        assert_eq!(count(&rows), 0);
        assert_eq!(sum(&rows), 0.0);
        assert_eq!(mean(&rows), 0.0);
        assert_eq!(variance(&rows), 0.0);
        assert_eq!(std_dev(&rows), 0.0);
    }

    #[test]
    fn test_empty_rows_are_zero() {
        let rows = vec![vec![], vec![]];
        assert_eq!(mean(&rows), 0.0);
        assert_eq!(variance(&rows), 0.0);
        assert!(!std_dev(&rows).is_nan());
    }

    #[test]
    fn test_mean_weights_by_entry_count() {
        let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]];
        assert_eq!(count(&rows), 5);
        assert!(close_to(sum(&rows), 15.0));
        assert!(close_to(mean(&rows), 3.0));
    }

    #[test]
    fn test_variance_uses_span_mean() {
        // Per-row means are 1.5 and 10, span mean is 5.75.
        let rows = vec![vec![1.0, 2.0], vec![10.0, 10.0]];
        let expected = [1.0, 2.0, 10.0, 10.0]
            .iter()
            .map(|x: &f64| (x - 5.75).powi(2))
            .sum::<f64>()
            / 4.0;
        assert!(close_to(variance(&rows), expected));
        assert!(close_to(std_dev(&rows), expected.sqrt()));
    }

    #[test]
    fn test_single_row_variance() {
        let rows = vec![vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]];
        assert!(close_to(variance(&rows), 4.0));
        assert!(close_to(std_dev(&rows), 2.0));
    }

    #[test]
    fn test_constant_row_has_zero_spread() {
        let rows = vec![vec![3.0, 3.0, 3.0]];
        assert_eq!(variance(&rows), 0.0);
        assert_eq!(std_dev(&rows), 0.0);
    }
}
