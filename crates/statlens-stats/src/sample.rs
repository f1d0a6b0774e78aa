//! Parsing raw text into numeric samples.
//!
//! A sample is written as numbers separated by any run of commas, semicolons,
//! tabs, newlines or spaces:
//!
//! ```
//! use statlens_stats::{Sample, SampleTag};
//!
//! let sample = Sample::parse(SampleTag::X, "3, 1;4\t1\n5  9").unwrap();
//! assert_eq!(sample.values(), &[3.0, 1.0, 4.0, 1.0, 5.0, 9.0]);
//! ```
//!
//! Parsing is all-or-nothing: a single malformed token rejects the sample.

use serde::{Deserialize, Serialize};

use crate::StatsError;

/// Identifies which of the two input samples a value or error belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize,
)]
pub enum SampleTag {
    /// The independent (or only) sample.
    #[display("X")]
    X,
    /// The dependent sample used for regression.
    #[display("Y")]
    Y,
}

/// An ordered, immutable sequence of finite `f64` values.
///
/// Input order and duplicates are preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sample {
    values: Vec<f64>,
}

pub(crate) fn is_separator(c: char) -> bool {
    c == ',' || c == ';' || c.is_whitespace()
}

impl Sample {
    /// Parses a sample from delimited text without a size limit.
    ///
    /// Empty or separator-only text produces an empty sample; whether that is
    /// acceptable is up to the calculator that consumes it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlens_stats::{Sample, SampleTag, StatsError};
    /// let err = Sample::parse(SampleTag::Y, "1, two, 3").unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     StatsError::InvalidNumber { sample: SampleTag::Y, token: "two".into() }
    /// );
    /// ```
    pub fn parse(tag: SampleTag, text: &str) -> Result<Self, StatsError> {
        Self::parse_with_limit(tag, text, None)
    }

    /// Parses a sample from delimited text, rejecting samples longer than `limit`.
    pub fn parse_with_limit(
        tag: SampleTag,
        text: &str,
        limit: Option<usize>,
    ) -> Result<Self, StatsError> {
        let mut values = vec![];
        for token in text.split(is_separator).filter(|t| !t.is_empty()) {
            let value = token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| StatsError::InvalidNumber {
                    sample: tag,
                    token: token.to_owned(),
                })?;
            values.push(value);
            if let Some(limit) = limit
                && values.len() > limit
            {
                // Count the rest without keeping it so the error reports the real length.
                let len = text.split(is_separator).filter(|t| !t.is_empty()).count();
                return Err(StatsError::SampleTooLarge {
                    sample: tag,
                    len,
                    limit,
                });
            }
        }
        tracing::debug!(sample = %tag, len = values.len(), "parsed sample");
        Ok(Self { values })
    }

    /// Returns the values in input order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an ascending copy of the values, leaving the sample untouched.
    #[must_use]
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }
}

/// Wraps already-parsed values.
///
/// The values must be finite, as [`Sample::parse`] guarantees for text input.
/// Debug builds panic on `NaN` or infinities.
impl From<Vec<f64>> for Sample {
    fn from(values: Vec<f64>) -> Self {
        debug_assert!(
            values.iter().all(|v| v.is_finite()),
            "sample values must be finite"
        );
        Self { values }
    }
}

/// Collects already-parsed values, which must be finite.
impl FromIterator<f64> for Sample {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
