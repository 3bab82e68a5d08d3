// ---------------------------------------------------------------------------
// Summary statistics over one numeric column of a filtered view
// ---------------------------------------------------------------------------

use serde::Serialize;

/// Descriptive statistics over a numeric series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n − 1 denominator); 0.0 for a single value.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// max − min.
    pub range: f64,
}

impl SummaryStats {
    /// Compute statistics from values, skipping missing (`NaN`) cells.
    /// Returns `None` when no values remain, so an empty filter result is
    /// reported as "no data" upstream rather than producing sentinel
    /// statistics.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mut vals: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if vals.is_empty() {
            return None;
        }

        let count = vals.len();
        let mean = vals.iter().sum::<f64>() / count as f64;
        let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        vals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = if count % 2 == 0 {
            (vals[count / 2 - 1] + vals[count / 2]) / 2.0
        } else {
            vals[count / 2]
        };

        let std_dev = if count < 2 {
            0.0
        } else {
            let var = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        };

        Some(SummaryStats {
            count,
            mean,
            median,
            std_dev,
            min,
            max,
            range: max - min,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn reference_series() {
        let s = SummaryStats::compute(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.count, 4);
        assert!((s.mean - 2.5).abs() < EPS);
        assert!((s.median - 2.5).abs() < EPS);
        assert!((s.std_dev - 1.2909944487358056).abs() < 1e-9);
        assert!((s.range - 3.0).abs() < EPS);
    }

    #[test]
    fn odd_length_median_is_middle_element() {
        let s = SummaryStats::compute(&[9.0, 1.0, 5.0]).unwrap();
        assert!((s.median - 5.0).abs() < EPS);
    }

    #[test]
    fn median_is_not_the_mean() {
        // Skewed series where mean and median differ; guards against the
        // upstream dashboard bug that reported the mean as the median.
        let s = SummaryStats::compute(&[1.0, 1.0, 1.0, 97.0]).unwrap();
        assert!((s.median - 1.0).abs() < EPS);
        assert!((s.mean - 25.0).abs() < EPS);
    }

    #[test]
    fn empty_input_yields_none() {
        assert_eq!(SummaryStats::compute(&[]), None);
    }

    #[test]
    fn all_missing_input_yields_none() {
        assert_eq!(SummaryStats::compute(&[f64::NAN, f64::NAN]), None);
    }

    #[test]
    fn single_value_has_zero_spread() {
        let s = SummaryStats::compute(&[7.0]).unwrap();
        assert_eq!(s.count, 1);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.range, 0.0);
    }

    #[test]
    fn missing_cells_are_skipped() {
        let s = SummaryStats::compute(&[2.0, f64::NAN, 4.0]).unwrap();
        assert_eq!(s.count, 2);
        assert!((s.mean - 3.0).abs() < EPS);
    }
}
