use serde::Serialize;

use crate::{Sample, descriptive::DescriptiveStats};

/// Decimal places used for bin labels unless told otherwise.
pub const DEFAULT_LABEL_PRECISION: usize = 2;

/// An equal-width histogram of a sample.
///
/// The number of bins is `ceil(sqrt(n))` (at least one). Bins cover
/// `[min, max]` left to right; the last bin is closed so the maximum is
/// counted. A constant sample collapses to a single bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// The bins in left-to-right order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Display label in the form `"{start}-{end}"`.
    pub label: String,
    /// Inclusive lower edge.
    pub start: f64,
    /// Upper edge; exclusive except for the last bin.
    pub end: f64,
    /// The number of values that fall within this bin.
    pub count: usize,
}

impl Histogram {
    /// Bins a sample using its minimum and maximum, labelling edges with
    /// [`DEFAULT_LABEL_PRECISION`] decimal places.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlens_stats::{Sample, histogram::Histogram};
    /// let sample = Sample::from(vec![1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 9.0]);
    /// let histogram = Histogram::new(&sample, 1.0, 9.0);
    /// assert_eq!(histogram.bins.len(), 3);
    /// assert_eq!(histogram.bins[0].label, "1.00-3.67");
    /// assert_eq!(histogram.bins[2].label, "6.33-9.00");
    /// assert_eq!(histogram.total_count(), sample.len());
    /// ```
    #[must_use]
    pub fn new(sample: &Sample, min: f64, max: f64) -> Self {
        Self::with_precision(sample, min, max, DEFAULT_LABEL_PRECISION)
    }

    /// Bins a sample using the minimum and maximum from its statistics.
    ///
    /// Returns `None` if the statistics lack a minimum or maximum.
    #[must_use]
    pub fn from_stats(sample: &Sample, stats: &DescriptiveStats, precision: usize) -> Option<Self> {
        Some(Self::with_precision(
            sample, stats.min?, stats.max?, precision,
        ))
    }

    /// Bins a sample, labelling bin edges with `precision` decimal places.
    ///
    /// # Arguments
    ///
    /// * `sample` - The values to count
    /// * `min`, `max` - The range to cover, normally the sample's own extremes
    /// * `precision` - Decimal places used in each bin's `label`
    ///
    /// # Returns
    ///
    /// `ceil(sqrt(n))` equal-width bins, a single bin when `max <= min`, or no
    /// bins for an empty sample. Values outside `[min, max]` go to the nearest
    /// end bin.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn with_precision(sample: &Sample, min: f64, max: f64, precision: usize) -> Self {
        let values = sample.values();
        if values.is_empty() {
            return Self { bins: vec![] };
        }

        let label = |start: f64, end: f64| format!("{start:.precision$}-{end:.precision$}");

        if max <= min {
            return Self {
                bins: vec![HistogramBin {
                    label: label(min, max),
                    start: min,
                    end: max,
                    count: values.len(),
                }],
            };
        }

        let num_bins = ((values.len() as f64).sqrt().ceil() as usize).max(1);
        let bin_width = (max - min) / num_bins as f64;

        let mut bins = (0..num_bins)
            .map(|bin_idx| {
                // Recompute each edge from `min` to avoid accumulating rounding errors
                let start = min + bin_idx as f64 * bin_width;
                let end = if bin_idx == num_bins - 1 {
                    max
                } else {
                    min + (bin_idx + 1) as f64 * bin_width
                };
                HistogramBin {
                    label: label(start, end),
                    start,
                    end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for &val in values {
            let position = ((val - min) / bin_width).floor();
            let idx = if position <= 0.0 {
                0
            } else {
                (position as usize).min(num_bins - 1)
            };
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Returns the sum of all bin counts.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}
