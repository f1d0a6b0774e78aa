use serde::Serialize;

use crate::StatsError;

/// Computes the quantile at probability `p` of unsorted values.
///
/// The values are copied and sorted internally; the caller's order is untouched.
/// See [`quantile_sorted`] for the interpolation rule.
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] if `values` is empty
/// * [`StatsError::InvalidProbability`] if `p` is NaN or outside `[0, 1]`
///
/// # Examples
///
/// ```
/// use statlens_stats::quantile::quantile;
///
/// let values = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(quantile(&values, 0.5).unwrap(), 2.5);
/// assert_eq!(quantile(&values, 0.25).unwrap(), 1.75);
/// ```
pub fn quantile(values: &[f64], p: f64) -> Result<f64, StatsError> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, p)
}

/// Computes the quantile at probability `p` of values sorted in ascending order.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `p` - Probability in `[0, 1]`; `0.0` gives the minimum and `1.0` the maximum
///
/// # Returns
///
/// * `Ok(value)` - The interpolated quantile
/// * `Err(_)` - If `p` is out of range or `sorted_values` is empty
///
/// Uses linear interpolation between order statistics (the R-7 rule, which is
/// also NumPy's default): with `pos = (n - 1) * p`, the result lies between
/// `sorted[floor(pos)]` and the next element, weighted by the fractional part.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn quantile_sorted(sorted_values: &[f64], p: f64) -> Result<f64, StatsError> {
    assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::InvalidProbability { p });
    }
    let n = sorted_values.len();
    if n == 0 {
        return Err(StatsError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let pos = (n - 1) as f64 * p;
    let base = pos.floor();
    let frac = pos - base;
    let base = base as usize;
    let value = if base + 1 < n {
        sorted_values[base] + frac * (sorted_values[base + 1] - sorted_values[base])
    } else {
        sorted_values[base]
    };
    Ok(value)
}

/// Precomputed quantile values for a dataset.
///
/// Stores `(probability, value)` pairs in the order they were requested.
///
/// # Examples
///
/// ```
/// use statlens_stats::quantile::Quantiles;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let quantiles = Quantiles::new(&values, &[0.1, 0.5, 0.9]).unwrap();
///
/// assert_eq!(quantiles.get(0.5), Some(3.0));
/// assert_eq!(quantiles.get(0.25), None); // Not precomputed
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantiles {
    values: Vec<(f64, f64)>,
}

impl Quantiles {
    /// Computes quantiles from unsorted values.
    pub fn new(values: &[f64], probabilities: &[f64]) -> Result<Self, StatsError> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, probabilities)
    }

    /// Computes quantiles from values sorted in ascending order.
    pub fn from_sorted(sorted_values: &[f64], probabilities: &[f64]) -> Result<Self, StatsError> {
        let values = probabilities
            .iter()
            .map(|&p| Ok((p, quantile_sorted(sorted_values, p)?)))
            .collect::<Result<_, StatsError>>()?;
        Ok(Self { values })
    }

    /// Gets the value at probability `p`, or `None` if it was not precomputed.
    #[must_use]
    pub fn get(&self, p: f64) -> Option<f64> {
        self.values
            .iter()
            .find_map(|&(q, value)| ((q - p).abs() < f64::EPSILON).then_some(value))
    }

    /// Returns an iterator over all `(probability, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(
            quantile(&[], 0.5),
            Err(StatsError::InsufficientData {
                required: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_single_value() {
        for p in [0.0, 0.3, 1.0] {
            assert_eq!(quantile(&[7.0], p).unwrap(), 7.0);
        }
    }

    #[test]
    fn test_bounds_are_min_and_max() {
        let values = [9.0, -3.0, 4.0, 4.0, 12.5];
        assert_eq!(quantile(&values, 0.0).unwrap(), -3.0);
        assert_eq!(quantile(&values, 1.0).unwrap(), 12.5);
    }

    #[test]
    fn test_interpolation() {
        // pos = 9 * 0.25 = 2.25 -> 3 + 0.25 * (4 - 3)
        let values = (1..=10).map(f64::from).collect::<Vec<_>>();
        assert!((quantile(&values, 0.25).unwrap() - 3.25).abs() < 1e-12);
        assert!((quantile(&values, 0.75).unwrap() - 7.75).abs() < 1e-12);
        assert!((quantile(&values, 0.5).unwrap() - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_probability() {
        for p in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                quantile(&[1.0, 2.0], p).unwrap_err(),
                StatsError::InvalidProbability { .. }
            ));
        }
    }

    #[test]
    fn test_does_not_mutate_input() {
        let values = vec![3.0, 1.0, 2.0];
        let _ = quantile(&values, 0.5).unwrap();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_quantiles_lookup() {
        let quantiles = Quantiles::new(&[5.0, 1.0, 3.0], &[0.0, 0.5, 1.0]).unwrap();
        assert_eq!(quantiles.as_slice(), &[(0.0, 1.0), (0.5, 3.0), (1.0, 5.0)]);
        assert_eq!(quantiles.iter().count(), 3);
        assert!(Quantiles::new(&[], &[0.5]).is_err());
    }
}
