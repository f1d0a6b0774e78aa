//! Property-based tests for the statistics engine.
//!
//! Covers the invariants every sample must satisfy regardless of its values:
//! quantile ordering, variance relationships, histogram count conservation
//! and exact recovery of noiseless linear relationships.

use proptest::prelude::*;
use statlens_stats::{
    Sample, SampleTag, box_plot::BoxPlotSummary, descriptive::DescriptiveStats,
    histogram::Histogram, quantile, regression::RegressionResult,
};

fn sample_values(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6_f64, 1..max_len)
}

fn stats_of(values: &[f64]) -> DescriptiveStats {
    DescriptiveStats::new(SampleTag::X, &Sample::from(values.to_vec())).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_five_numbers_are_ordered(values in prop::collection::vec(-1000i32..1000, 1..64)) {
        let values = values.into_iter().map(f64::from).collect::<Vec<_>>();
        let stats = stats_of(&values);
        let summary = BoxPlotSummary::from_stats(&stats).unwrap();
        prop_assert!(summary.min <= summary.q1);
        prop_assert!(summary.q1 <= summary.median);
        prop_assert!(summary.median <= summary.q3);
        prop_assert!(summary.q3 <= summary.max);
    }

    #[test]
    fn prop_quantile_bounds_are_extremes(values in sample_values(64)) {
        let stats = stats_of(&values);
        prop_assert_eq!(quantile::quantile(&values, 0.0).unwrap(), stats.min.unwrap());
        prop_assert_eq!(quantile::quantile(&values, 1.0).unwrap(), stats.max.unwrap());
    }

    #[test]
    fn prop_variance_relationships(values in prop::collection::vec(-1.0e3..1.0e3_f64, 2..64)) {
        let stats = stats_of(&values);
        let var_sample = stats.variance_sample.unwrap();
        let var_population = stats.variance_population.unwrap();
        let sd = stats.std_dev_sample.unwrap();
        prop_assert!((sd * sd - var_sample).abs() <= 1e-9 * var_sample.max(1.0));
        prop_assert!(var_population <= var_sample);
    }

    #[test]
    fn prop_shape_statistics_follow_sample_size(values in sample_values(8)) {
        let stats = stats_of(&values);
        if values.len() < 3 {
            prop_assert!(stats.skewness.is_none());
        }
        if values.len() < 4 {
            prop_assert!(stats.kurtosis.is_none());
        }
        if let Some(skewness) = stats.skewness {
            prop_assert!(skewness.is_finite());
        }
        if let Some(kurtosis) = stats.kurtosis {
            prop_assert!(kurtosis.is_finite());
        }
    }

    #[test]
    fn prop_histogram_counts_sum_to_n(values in sample_values(256)) {
        let sample = Sample::from(values.clone());
        let stats = stats_of(&values);
        let histogram = Histogram::new(&sample, stats.min.unwrap(), stats.max.unwrap());
        prop_assert_eq!(histogram.total_count(), values.len());
    }

    #[test]
    fn prop_frequency_table_counts_every_value(values in prop::collection::vec(-5i32..5, 1..64)) {
        let values = values.into_iter().map(f64::from).collect::<Vec<_>>();
        let stats = stats_of(&values);
        prop_assert_eq!(stats.frequency_table.total(), values.len());
        prop_assert!(
            stats.frequency_table.entries().windows(2).all(|w| w[0].value < w[1].value)
        );
    }

    #[test]
    fn prop_constant_sample_has_zero_spread(value in -1e6f64..1e6, n in 2u32..50) {
        let y = (0..n).map(f64::from).collect::<Vec<_>>();
        let x = vec![value; y.len()];
        let stats = stats_of(&x);
        prop_assert_eq!(stats.variance_sample, Some(0.0));
        prop_assert_eq!(stats.skewness, None);
        prop_assert_eq!(stats.kurtosis, None);
        let fit = RegressionResult::fit(&Sample::from(x), &Sample::from(y)).unwrap();
        prop_assert!(fit.is_degenerate());
    }

    #[test]
    fn prop_noiseless_line_is_recovered(
        xs in prop::collection::hash_set(-100i32..100, 3..32),
        slope in -10i32..10,
        intercept in -50i32..50,
    ) {
        let x = xs.into_iter().map(f64::from).collect::<Vec<_>>();
        let y = x
            .iter()
            .map(|x| f64::from(slope) * x + f64::from(intercept))
            .collect::<Vec<_>>();
        let fit = RegressionResult::fit(&Sample::from(x), &Sample::from(y)).unwrap();
        prop_assert!((fit.slope.unwrap() - f64::from(slope)).abs() < 1e-6);
        prop_assert!((fit.intercept.unwrap() - f64::from(intercept)).abs() < 1e-6);
        if slope != 0 {
            prop_assert!((fit.r_squared.unwrap() - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn parsed_text_round_trips_through_report() {
    use statlens_stats::report::{AnalysisConfig, AnalysisReport};

    let report = AnalysisReport::from_text(
        "2.5; 3.5\n4.5\t5.5",
        Some("1,2,3,4"),
        &AnalysisConfig::default(),
    );
    let x = report.x.ready().unwrap();
    assert_eq!(x.stats.mean, Some(4.0));
    let fit = report.regression.as_ref().unwrap().ready().unwrap();
    assert!((fit.slope.unwrap() - 1.0).abs() < 1e-12);
    assert!((fit.intercept.unwrap() + 1.5).abs() < 1e-12);
}
