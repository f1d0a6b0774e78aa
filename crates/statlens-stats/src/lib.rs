//! Descriptive statistics and simple linear regression for raw numeric samples.
//!
//! This crate turns one or two samples of raw text into summary statistics,
//! an ordinary-least-squares fit, and chart-ready structures:
//!
//! - **Sample parsing**: Tokenize delimited text into an ordered sample of `f64`
//! - **Frequency tables**: Count occurrences of each distinct value
//! - **Quantiles**: R-7 linearly interpolated quantiles
//! - **Descriptive statistics**: Mean, median, mode, spread, shape and quartiles
//! - **Regression**: Simple linear regression with correlation and R²
//! - **Chart data**: Histogram bins, box-plot five-number summary, scatter pairs
//!
//! Every calculator is a pure function over an immutable [`Sample`]. Statistics
//! that cannot be computed for a given sample size are reported as absent
//! (`None`) rather than as errors, so a caller always gets the largest
//! computable subset of results.
//!
//! # Modules
//!
//! - [`sample`]: Input parsing into [`Sample`]s
//! - [`frequency`]: Value frequency tables
//! - [`quantile`]: Quantile computation and storage
//! - [`descriptive`]: Descriptive statistics for a single sample
//! - [`regression`]: Ordinary-least-squares simple linear regression
//! - [`histogram`]: Equal-width histogram binning
//! - [`box_plot`]: Five-number summaries for box plots
//! - [`scatter`]: Paired points for scatter plots
//! - [`report`]: The full text-in, report-out pipeline
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use statlens_stats::{Sample, SampleTag, descriptive::DescriptiveStats};
//!
//! let sample = Sample::parse(SampleTag::X, "1, 2, 3, 4, 5").unwrap();
//! let stats = DescriptiveStats::new(SampleTag::X, &sample).unwrap();
//! assert_eq!(stats.mean, Some(3.0));
//! assert_eq!(stats.median, Some(3.0));
//! ```
//!
//! ## Fitting a line
//!
//! ```
//! use statlens_stats::{Sample, SampleTag, regression::RegressionResult};
//!
//! let x = Sample::parse(SampleTag::X, "1 2 3 4 5").unwrap();
//! let y = Sample::parse(SampleTag::Y, "5 7 9 11 13").unwrap();
//! let fit = RegressionResult::fit(&x, &y).unwrap();
//! assert!((fit.slope.unwrap() - 2.0).abs() < 1e-12);
//! assert!((fit.intercept.unwrap() - 3.0).abs() < 1e-12);
//! ```
//!
//! ## Running the whole pipeline
//!
//! ```
//! use statlens_stats::report::{AnalysisConfig, AnalysisReport};
//!
//! let report = AnalysisReport::from_text("1 2 3 4", Some("2 4 6 8"), &AnalysisConfig::default());
//! assert!(report.x.is_ready());
//! assert!(report.regression.as_ref().is_some_and(|r| r.is_ready()));
//! ```

pub mod box_plot;
pub mod descriptive;
pub mod frequency;
pub mod histogram;
pub mod quantile;
pub mod regression;
pub mod report;
pub mod sample;
pub mod scatter;

pub use self::sample::{Sample, SampleTag};

/// Errors raised by the statistics engine.
///
/// Only parse-time problems and unmet preconditions are errors. Statistics
/// that are merely unattainable for a sample are reported as `None` fields
/// on the result records instead.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("sample {sample}: '{token}' is not a valid number")]
    InvalidNumber { sample: SampleTag, token: String },
    #[display("sample {sample} is empty")]
    EmptySample { sample: SampleTag },
    #[display("sample {sample} has {len} values, more than the limit of {limit}")]
    SampleTooLarge {
        sample: SampleTag,
        len: usize,
        limit: usize,
    },
    #[display("insufficient data: at least {required} values required, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    #[display("probability {p} is outside [0, 1]")]
    InvalidProbability { p: f64 },
    #[display("samples have different lengths (X has {x_len}, Y has {y_len})")]
    MismatchedLength { x_len: usize, y_len: usize },
}

impl StatsError {
    /// Returns `true` for errors caused by unusable input text or an empty sample.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidNumber { .. } | Self::EmptySample { .. } | Self::SampleTooLarge { .. }
        )
    }
}
