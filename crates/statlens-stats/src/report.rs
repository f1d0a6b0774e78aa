//! The full analysis pipeline, from raw text to every chart-ready structure.
//!
//! [`AnalysisReport::from_text`] never fails. Each part of the report is a
//! [`Section`] that is either ready or carries the reason it could not be
//! produced, so one unusable sample never hides results computed from the other.

use serde::{Deserialize, Serialize};

use crate::{
    Sample, SampleTag, StatsError,
    box_plot::BoxPlotSummary,
    descriptive::{DescriptiveStats, MissingStatistic},
    histogram::{DEFAULT_LABEL_PRECISION, Histogram},
    quantile::Quantiles,
    regression::RegressionResult,
    sample,
    scatter::{self, ScatterPoint},
};

/// Default cap on the number of values accepted per sample.
pub const DEFAULT_MAX_VALUES: usize = 100_000;

/// Tunables for the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Samples with more values than this are rejected at parse time.
    pub max_values: usize,
    /// Decimal places used in histogram bin labels.
    pub label_precision: usize,
    /// Extra quantile probabilities (in `[0, 1]`) to report per sample.
    pub quantiles: Vec<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_values: DEFAULT_MAX_VALUES,
            label_precision: DEFAULT_LABEL_PRECISION,
            quantiles: vec![],
        }
    }
}

/// A part of a report that is either computed or explains why it is not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    Unavailable { reason: String },
}

impl<T> Section<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}

impl<T> From<Result<T, StatsError>> for Section<T> {
    fn from(result: Result<T, StatsError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::unavailable(err.to_string()),
        }
    }
}

/// Everything computed from a single sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    pub stats: DescriptiveStats,
    /// Statistics absent from `stats`, with the reason for each.
    pub missing: Vec<MissingStatistic>,
    /// The quantiles requested through [`AnalysisConfig::quantiles`].
    pub quantiles: Quantiles,
    /// Histogram bins; only computed for the X sample.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,
    /// Box-plot summary; only computed for the X sample.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_plot: Option<Section<BoxPlotSummary>>,
}

impl SampleSummary {
    /// Computes statistics and requested quantiles for a sample, without chart data.
    ///
    /// Call [`SampleSummary::with_charts`] to add the histogram and box plot.
    ///
    /// # Errors
    ///
    /// * [`StatsError::EmptySample`] if the sample has no values
    /// * [`StatsError::InvalidProbability`] if a requested quantile is outside `[0, 1]`
    pub fn new(
        tag: SampleTag,
        sample: &Sample,
        config: &AnalysisConfig,
    ) -> Result<Self, StatsError> {
        let stats = DescriptiveStats::new(tag, sample)?;
        let quantiles = Quantiles::new(sample.values(), &config.quantiles)?;
        Ok(Self {
            missing: stats.missing_fields(),
            stats,
            quantiles,
            histogram: None,
            box_plot: None,
        })
    }

    /// Adds histogram bins and the box-plot summary.
    #[must_use]
    pub fn with_charts(mut self, sample: &Sample, config: &AnalysisConfig) -> Self {
        self.histogram = Histogram::from_stats(sample, &self.stats, config.label_precision);
        self.box_plot = Some(
            BoxPlotSummary::from_stats(&self.stats)
                .map_or_else(|| Section::unavailable("not enough data to draw"), Section::Ready),
        );
        self
    }
}

/// The complete output for one or two samples of raw text.
///
/// The Y-dependent sections are `None` when no Y sample was supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub x: Section<SampleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Section<SampleSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regression: Option<Section<RegressionResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scatter: Option<Section<Vec<ScatterPoint>>>,
}

impl AnalysisReport {
    /// Parses and analyzes the X sample and, if given, the Y sample.
    ///
    /// Y text that is missing or contains only separators counts as "not
    /// supplied". When both samples parse but differ in length, each keeps its
    /// own statistics while the regression and scatter sections explain the
    /// mismatch.
    ///
    /// # Examples
    ///
    /// ```
    /// use statlens_stats::report::{AnalysisConfig, AnalysisReport};
    ///
    /// let report = AnalysisReport::from_text("1 2 3", Some("1 2 3 4 5"), &AnalysisConfig::default());
    /// assert!(report.x.is_ready());
    /// assert!(report.y.as_ref().unwrap().is_ready());
    /// let regression = report.regression.unwrap();
    /// assert!(regression.reason().unwrap().contains("different lengths"));
    /// ```
    #[must_use]
    pub fn from_text(x_text: &str, y_text: Option<&str>, config: &AnalysisConfig) -> Self {
        let limit = Some(config.max_values);
        let x = Sample::parse_with_limit(SampleTag::X, x_text, limit);
        let y = y_text
            .filter(|text| text.chars().any(|c| !sample::is_separator(c)))
            .map(|text| Sample::parse_with_limit(SampleTag::Y, text, limit));
        Self::from_samples(x, y, config)
    }

    /// Analyzes already-parsed samples; a parse failure blanks only the
    /// sections that depend on that sample.
    #[must_use]
    pub fn from_samples(
        x: Result<Sample, StatsError>,
        y: Option<Result<Sample, StatsError>>,
        config: &AnalysisConfig,
    ) -> Self {
        let x_section = Section::from(
            x.as_ref()
                .map_err(Clone::clone)
                .and_then(|sample| {
                    Ok(SampleSummary::new(SampleTag::X, sample, config)?
                        .with_charts(sample, config))
                }),
        );
        if let Some(reason) = x_section.reason() {
            tracing::debug!(reason, "sample X unavailable");
        }

        let Some(y) = y else {
            return Self {
                x: x_section,
                y: None,
                regression: None,
                scatter: None,
            };
        };

        let y_section = Section::from(
            y.as_ref()
                .map_err(Clone::clone)
                .and_then(|sample| SampleSummary::new(SampleTag::Y, sample, config)),
        );

        let (regression, scatter) = match (&x, &y) {
            (Ok(x), Ok(y)) => (
                Section::from(RegressionResult::fit(x, y)),
                Section::from(scatter::scatter_points(x, y)),
            ),
            (Err(err), _) | (_, Err(err)) => {
                let reason = format!("both samples are required: {err}");
                (
                    Section::unavailable(reason.clone()),
                    Section::unavailable(reason),
                )
            }
        };
        if let Some(reason) = regression.reason() {
            tracing::debug!(reason, "regression unavailable");
        }

        Self {
            x: x_section,
            y: Some(y_section),
            regression: Some(regression),
            scatter: Some(scatter),
        }
    }
}
