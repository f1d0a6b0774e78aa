use serde::Serialize;

use crate::descriptive::DescriptiveStats;

/// The five-number summary needed to draw a box plot.
///
/// # Examples
///
/// ```
/// # use statlens_stats::{Sample, SampleTag, descriptive::DescriptiveStats};
/// # use statlens_stats::box_plot::BoxPlotSummary;
/// let sample = Sample::from(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// let stats = DescriptiveStats::new(SampleTag::X, &sample).unwrap();
/// let summary = BoxPlotSummary::from_stats(&stats).unwrap();
/// assert_eq!(
///     (summary.min, summary.q1, summary.median, summary.q3, summary.max),
///     (1.0, 2.0, 3.0, 4.0, 5.0)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxPlotSummary {
    /// Packages the five-number summary, or `None` if any of the five is absent.
    #[must_use]
    pub fn from_stats(stats: &DescriptiveStats) -> Option<Self> {
        Some(Self {
            min: stats.min?,
            q1: stats.q1?,
            median: stats.median?,
            q3: stats.q3?,
            max: stats.max?,
        })
    }

    /// Returns the interquartile range, `q3 - q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Returns Tukey's fences `(q1 - 1.5 * IQR, q3 + 1.5 * IQR)`.
    ///
    /// Values outside the fences are conventionally drawn as outliers.
    #[must_use]
    pub fn fences(&self) -> (f64, f64) {
        let margin = 1.5 * self.iqr();
        (self.q1 - margin, self.q3 + margin)
    }
}
