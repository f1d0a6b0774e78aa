use std::fmt;

use serde::Serialize;

use crate::{Sample, SampleTag, StatsError, frequency::FrequencyTable, quantile};

/// The most frequent value(s) of a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum Mode {
    /// Exactly one value has the highest frequency.
    Unique(f64),
    /// Several values share the highest frequency, ascending.
    Multiple(Vec<f64>),
    /// Every value is distinct, so no value stands out.
    None,
}

impl Mode {
    fn from_table(table: &FrequencyTable, count: usize) -> Self {
        if table.max_count() == 1 && table.distinct_len() == count && count > 1 {
            return Self::None;
        }
        match table.most_frequent().as_slice() {
            [value] => Self::Unique(*value),
            values => Self::Multiple(values.to_vec()),
        }
    }

    /// Returns the modal values, empty for [`Mode::None`].
    #[must_use]
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Unique(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
            Self::None => &[],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unique(value) => write!(f, "{value}"),
            Self::Multiple(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            Self::None => f.write_str("No mode"),
        }
    }
}

/// A statistic that could not be computed, with the reason why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingStatistic {
    pub name: &'static str,
    pub reason: &'static str,
}

/// Descriptive statistics summarizing one sample.
///
/// `count` is always at least one. Every other numeric field is `None` when
/// the sample is too small or too uniform for that statistic:
///
/// | statistic | requires |
/// |-----------|----------|
/// | `variance_sample`, `std_dev_sample` | `count >= 2` |
/// | `skewness` | `count >= 3` and non-zero sample standard deviation |
/// | `kurtosis` | `count >= 4` and non-zero sample standard deviation |
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// The number of values in the sample.
    pub count: usize,
    /// The arithmetic mean.
    pub mean: Option<f64>,
    /// The middle value, or the average of the two middle values.
    pub median: Option<f64>,
    /// The most frequent value(s).
    pub mode: Mode,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// `max - min`.
    pub range: Option<f64>,
    /// The 25th percentile (R-7 interpolation).
    pub q1: Option<f64>,
    /// The 75th percentile (R-7 interpolation).
    pub q3: Option<f64>,
    /// The interquartile range, `q3 - q1`.
    pub iqr: Option<f64>,
    /// Variance with Bessel's correction (divides by `n - 1`).
    pub variance_sample: Option<f64>,
    pub std_dev_sample: Option<f64>,
    /// Variance of the sample taken as the whole population (divides by `n`).
    pub variance_population: Option<f64>,
    pub std_dev_population: Option<f64>,
    /// Third standardized moment, using the sample standard deviation.
    pub skewness: Option<f64>,
    /// Fourth standardized moment minus 3, using the sample standard deviation.
    pub kurtosis: Option<f64>,
    /// Occurrence count of each distinct value.
    pub frequency_table: FrequencyTable,
}

impl DescriptiveStats {
    /// Computes descriptive statistics for a sample.
    ///
    /// Every statistic is computed independently; one being unattainable never
    /// prevents the others from being reported.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::EmptySample`] naming `tag` if the sample has no values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlens_stats::{Sample, SampleTag, descriptive::{DescriptiveStats, Mode}};
    /// let sample = Sample::from(vec![2.0, 4.0, 4.0, 5.0]);
    /// let stats = DescriptiveStats::new(SampleTag::X, &sample).unwrap();
    /// assert_eq!(stats.mode, Mode::Unique(4.0));
    /// assert_eq!(stats.median, Some(4.0));
    /// assert_eq!(stats.range, Some(3.0));
    /// assert!(stats.skewness.is_some());
    /// assert!(stats.kurtosis.is_some());
    /// ```
    pub fn new(tag: SampleTag, sample: &Sample) -> Result<Self, StatsError> {
        if sample.is_empty() {
            return Err(StatsError::EmptySample { sample: tag });
        }
        let sorted = sample.sorted();
        tracing::debug!(sample = %tag, count = sample.len(), "computing descriptive statistics");
        Ok(Self::from_sorted(&sorted))
    }

    /// Computes descriptive statistics from non-empty values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is empty or not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        assert!(!sorted_values.is_empty(), "values must not be empty");

        let count = sorted_values.len();
        let n = count as f64;

        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = if count % 2 == 1 {
            sorted_values[count / 2]
        } else {
            f64::midpoint(sorted_values[count / 2 - 1], sorted_values[count / 2])
        };

        let frequency_table = FrequencyTable::new(sorted_values);
        let mode = Mode::from_table(&frequency_table, count);

        let min = sorted_values[0];
        let max = sorted_values[count - 1];

        let q1 = quantile::quantile_sorted(sorted_values, 0.25).ok();
        let q3 = quantile::quantile_sorted(sorted_values, 0.75).ok();
        let iqr = q1.zip(q3).map(|(q1, q3)| q3 - q1);

        // A rounded mean leaves tiny deviations around a constant sample.
        let sum_sq_dev = if max > min {
            sorted_values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
        } else {
            0.0
        };
        let variance_sample = (count >= 2).then(|| sum_sq_dev / (n - 1.0));
        let variance_population = sum_sq_dev / n;
        let std_dev_sample = variance_sample.map(f64::sqrt);

        let standardized_moment = |power: i32| {
            std_dev_sample.filter(|&sd| sd > 0.0).map(|sd| {
                sorted_values
                    .iter()
                    .map(|v| ((v - mean) / sd).powi(power))
                    .sum::<f64>()
                    / n
            })
        };
        let skewness = if count >= 3 {
            standardized_moment(3)
        } else {
            None
        };
        let kurtosis = if count >= 4 {
            standardized_moment(4).map(|m| m - 3.0)
        } else {
            None
        };

        Self {
            count,
            mean: Some(mean),
            median: Some(median),
            mode,
            min: Some(min),
            max: Some(max),
            range: Some(max - min),
            q1,
            q3,
            iqr,
            variance_sample,
            std_dev_sample,
            variance_population: Some(variance_population),
            std_dev_population: Some(variance_population.sqrt()),
            skewness,
            kurtosis,
            frequency_table,
        }
    }

    /// Lists the statistics that are absent, with a human-readable reason for each.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<MissingStatistic> {
        let zero_spread = self.std_dev_sample.is_some_and(|sd| sd <= 0.0);
        let shape_reason = |required: usize, reason: &'static str| {
            if self.count < required {
                reason
            } else if zero_spread {
                "sample standard deviation is zero"
            } else {
                "not computable"
            }
        };

        let mut missing = vec![];
        let mut push = |name, value: Option<f64>, reason| {
            if value.is_none() {
                missing.push(MissingStatistic { name, reason });
            }
        };
        push("mean", self.mean, "not computable");
        push("median", self.median, "not computable");
        push("min", self.min, "not computable");
        push("max", self.max, "not computable");
        push("q1", self.q1, "not computable");
        push("q3", self.q3, "not computable");
        push(
            "variance_sample",
            self.variance_sample,
            "requires at least 2 values",
        );
        push(
            "std_dev_sample",
            self.std_dev_sample,
            "requires at least 2 values",
        );
        push(
            "skewness",
            self.skewness,
            shape_reason(3, "requires at least 3 values"),
        );
        push(
            "kurtosis",
            self.kurtosis,
            shape_reason(4, "requires at least 4 values"),
        );
        missing
    }
}
