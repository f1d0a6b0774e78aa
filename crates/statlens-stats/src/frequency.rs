use std::collections::HashMap;

use serde::Serialize;

/// A value together with the number of times it occurs in a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyEntry {
    pub value: f64,
    pub count: usize,
}

/// Occurrence counts of each distinct value in a sample, sorted ascending by value.
///
/// # Examples
///
/// ```
/// use statlens_stats::frequency::FrequencyTable;
///
/// let table = FrequencyTable::new(&[2.0, 1.0, 2.0, 3.0, 2.0]);
/// assert_eq!(table.distinct_len(), 3);
/// assert_eq!(table.count_of(2.0), 3);
/// assert_eq!(table.max_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

// `-0.0` and `0.0` compare equal, so they must share a key.
fn key_of(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

impl FrequencyTable {
    /// Counts every value in a single pass, then sorts the distinct values.
    ///
    /// # Arguments
    ///
    /// * `values` - The sample values in any order. `-0.0` is counted as `0.0`.
    ///
    /// # Returns
    ///
    /// A table with one entry per distinct value, ascending. Empty input gives
    /// an empty table.
    #[must_use]
    pub fn new(values: &[f64]) -> Self {
        let mut counts = HashMap::<u64, FrequencyEntry>::new();
        for &value in values {
            counts
                .entry(key_of(value))
                .or_insert(FrequencyEntry {
                    value: value + 0.0,
                    count: 0,
                })
                .count += 1;
        }

        let mut entries = counts.into_values().collect::<Vec<_>>();
        entries.sort_by(|a, b| a.value.total_cmp(&b.value));
        Self { entries }
    }

    /// Returns the entries in ascending value order.
    #[must_use]
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// Returns how many times `value` occurs, or `0` if it never does.
    #[must_use]
    pub fn count_of(&self, value: f64) -> usize {
        let value = value + 0.0;
        self.entries
            .binary_search_by(|e| e.value.total_cmp(&value))
            .map_or(0, |idx| self.entries[idx].count)
    }

    /// Returns the highest occurrence count, or `0` for an empty table.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).max().unwrap_or(0)
    }

    /// Returns the number of distinct values.
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of values the table was built from.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Returns every value whose count equals the highest count, ascending.
    #[must_use]
    pub fn most_frequent(&self) -> Vec<f64> {
        let max = self.max_count();
        self.entries
            .iter()
            .filter(|e| e.count == max)
            .map(|e| e.value)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let table = FrequencyTable::new(&[]);
        assert_eq!(table.distinct_len(), 0);
        assert_eq!(table.max_count(), 0);
        assert_eq!(table.total(), 0);
        assert!(table.most_frequent().is_empty());
    }

    #[test]
    fn test_sorted_entries() {
        let table = FrequencyTable::new(&[3.0, -1.0, 3.0, 0.5, -1.0, 3.0]);
        assert_eq!(
            table.entries(),
            &[
                FrequencyEntry {
                    value: -1.0,
                    count: 2
                },
                FrequencyEntry {
                    value: 0.5,
                    count: 1
                },
                FrequencyEntry {
                    value: 3.0,
                    count: 3
                },
            ]
        );
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn test_negative_zero_merges() {
        let table = FrequencyTable::new(&[0.0, -0.0, 1.0]);
        assert_eq!(table.distinct_len(), 2);
        assert_eq!(table.count_of(0.0), 2);
        assert_eq!(table.count_of(-0.0), 2);
    }

    #[test]
    fn test_most_frequent_ties() {
        let table = FrequencyTable::new(&[2.0, 1.0, 1.0, 2.0, 3.0]);
        assert_eq!(table.most_frequent(), vec![1.0, 2.0]);
        assert_eq!(table.count_of(4.0), 0);
    }
}
