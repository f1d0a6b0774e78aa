//! Ordinary-least-squares simple linear regression.
//!
//! Fits `ŷ = intercept + slope * x` in closed form from the centered sums
//! `Σ(x - x̄)²`, `Σ(x - x̄)(y - ȳ)` and `Σ(y - ȳ)²`, and reports Pearson's
//! correlation coefficient, R² and adjusted R² alongside the fit.
//!
//! The adjusted R² uses `n - 2` residual degrees of freedom, which is only
//! correct for exactly one predictor.

use serde::Serialize;

use crate::{Sample, StatsError};

/// Equation text reported when every `x` is the same and no line can be fit.
pub const DEGENERATE_EQUATION: &str = "Cannot calculate (denominator for slope is zero)";

const EQUATION_PRECISION: usize = 4;

/// Centered sums of squares and cross products.
#[derive(Debug, Clone, Copy)]
struct Sums {
    n: f64,
    mean_x: f64,
    mean_y: f64,
    xx: f64,
    xy: f64,
    yy: f64,
}

impl Sums {
    #[expect(clippy::cast_precision_loss)]
    fn new(x: &[f64], y: &[f64]) -> Self {
        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;
        let (xx, xy, yy) = x
            .iter()
            .zip(y)
            .fold((0.0, 0.0, 0.0), |(xx, xy, yy), (&x, &y)| {
                let dx = x - mean_x;
                let dy = y - mean_y;
                (xx + dx * dx, xy + dx * dy, yy + dy * dy)
            });
        Self {
            n,
            mean_x,
            mean_y,
            xx,
            xy,
            yy,
        }
    }
}

/// Returns `true` if at least two values differ.
///
/// Sums of squares cannot answer this: a mean that does not round exactly
/// leaves small non-zero deviations around a constant sample.
#[expect(clippy::float_cmp)]
fn has_spread(values: &[f64]) -> bool {
    values
        .split_first()
        .is_some_and(|(first, rest)| rest.iter().any(|v| *v != *first))
}

/// The result of fitting a line through paired samples.
///
/// When the fit is degenerate (all `x` equal) every numeric field is `None`
/// and `equation` holds [`DEGENERATE_EQUATION`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionResult {
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
    /// Coefficient of determination, the square of the correlation coefficient.
    pub r_squared: Option<f64>,
    /// R² adjusted for one predictor; absent when `n <= 2`.
    pub adjusted_r_squared: Option<f64>,
    /// Pearson's correlation coefficient; absent when either sample has zero spread.
    pub correlation_coefficient: Option<f64>,
    /// The fitted line as text, or the reason no line could be fit.
    pub equation: String,
}

impl RegressionResult {
    /// Fits `y` against `x` by ordinary least squares.
    ///
    /// # Arguments
    ///
    /// * `x` - The independent sample
    /// * `y` - The dependent sample, paired with `x` by position
    ///
    /// # Returns
    ///
    /// * A degenerate result if every `x` is the same
    /// * Slope `0` with no correlation if every `y` is the same
    /// * Otherwise the fitted line with its goodness-of-fit measures
    ///
    /// Once the preconditions hold this never fails: a zero slope denominator
    /// yields a degenerate result rather than an error.
    ///
    /// # Errors
    ///
    /// * [`StatsError::MismatchedLength`] if the samples differ in length
    /// * [`StatsError::InsufficientData`] if they have fewer than two values
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlens_stats::{Sample, regression::{RegressionResult, DEGENERATE_EQUATION}};
    /// let x = Sample::from(vec![1.0, 1.0, 1.0, 1.0]);
    /// let y = Sample::from(vec![2.0, 3.0, 4.0, 5.0]);
    /// let fit = RegressionResult::fit(&x, &y).unwrap();
    /// assert!(fit.is_degenerate());
    /// assert_eq!(fit.equation, DEGENERATE_EQUATION);
    /// ```
    pub fn fit(x: &Sample, y: &Sample) -> Result<Self, StatsError> {
        if x.len() != y.len() {
            return Err(StatsError::MismatchedLength {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(StatsError::InsufficientData {
                required: 2,
                actual: x.len(),
            });
        }

        if !has_spread(x.values()) {
            tracing::debug!(n = x.len(), "regression is degenerate: x has no spread");
            return Ok(Self::degenerate());
        }
        let s = Sums::new(x.values(), y.values());
        let y_spread = has_spread(y.values());

        let slope = if y_spread { s.xy / s.xx } else { 0.0 };
        let intercept = s.mean_y - slope * s.mean_x;

        let correlation_coefficient = y_spread
            .then(|| s.xy / (s.xx * s.yy).sqrt())
            .filter(|r| r.is_finite())
            .map(|r| r.clamp(-1.0, 1.0));
        let r_squared = correlation_coefficient.map(|r| r * r);
        let n = s.n;
        let adjusted_r_squared = r_squared
            .filter(|_| n > 2.0)
            .map(|r2| 1.0 - ((1.0 - r2) * (n - 1.0)) / (n - 2.0));

        Ok(Self {
            slope: Some(slope),
            intercept: Some(intercept),
            r_squared,
            adjusted_r_squared,
            correlation_coefficient,
            equation: format_equation(slope, intercept),
        })
    }

    fn degenerate() -> Self {
        Self {
            slope: None,
            intercept: None,
            r_squared: None,
            adjusted_r_squared: None,
            correlation_coefficient: None,
            equation: DEGENERATE_EQUATION.to_owned(),
        }
    }

    /// Returns `true` if no line could be fit.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.slope.is_none()
    }

    /// Evaluates the fitted line at `x`, or `None` for a degenerate fit.
    #[must_use]
    pub fn predict(&self, x: f64) -> Option<f64> {
        Some(self.intercept? + self.slope? * x)
    }
}

fn format_equation(slope: f64, intercept: f64) -> String {
    let sign = if slope >= 0.0 { '+' } else { '-' };
    format!(
        "ŷ = {intercept:.prec$} {sign} {:.prec$}X",
        slope.abs(),
        prec = EQUATION_PRECISION
    )
}
