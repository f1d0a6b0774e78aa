//! Plain-text report rendering
//!
//! This module renders statistics, histograms and regression fits as
//! aligned two-column tables.

use std::io::{self, Write};

use statlens_stats::{
    SampleTag,
    box_plot::BoxPlotSummary,
    descriptive::DescriptiveStats,
    histogram::Histogram,
    quantile::Quantiles,
    regression::RegressionResult,
    report::{Section, SampleSummary},
};

const LABEL_WIDTH: usize = 24;
const VALUE_WIDTH: usize = 16;
const BAR_WIDTH: usize = 40;

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.4}"))
}

fn print_header<W: Write + ?Sized>(w: &mut W, title: &str) -> io::Result<()> {
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "=".repeat(title.chars().count()))
}

fn print_table_header<W: Write + ?Sized>(
    w: &mut W,
    label_col: &str,
    value_col: &str,
) -> io::Result<()> {
    writeln!(w, "  {label_col:<LABEL_WIDTH$} {value_col:>VALUE_WIDTH$}")?;
    writeln!(w, "  {}", "-".repeat(LABEL_WIDTH + VALUE_WIDTH + 1))
}

fn print_row<W: Write + ?Sized>(w: &mut W, label: &str, value: &str) -> io::Result<()> {
    writeln!(w, "  {label:<LABEL_WIDTH$} {value:>VALUE_WIDTH$}")
}

/// Print the descriptive statistics table
///
/// Absent statistics are shown as `N/A` and explained below the table.
pub(super) fn print_stats<W: Write + ?Sized>(
    w: &mut W,
    tag: SampleTag,
    summary: &SampleSummary,
) -> io::Result<()> {
    let stats: &DescriptiveStats = &summary.stats;
    print_header(w, &format!("Sample {tag} (n = {})", stats.count))?;
    print_table_header(w, "Statistic", "Value")?;
    let rows = [
        ("Mean", stats.mean),
        ("Median", stats.median),
        ("Min", stats.min),
        ("Max", stats.max),
        ("Range", stats.range),
        ("Q1", stats.q1),
        ("Q3", stats.q3),
        ("IQR", stats.iqr),
        ("Variance (sample)", stats.variance_sample),
        ("Std dev (sample)", stats.std_dev_sample),
        ("Variance (population)", stats.variance_population),
        ("Std dev (population)", stats.std_dev_population),
        ("Skewness", stats.skewness),
        ("Excess kurtosis", stats.kurtosis),
    ];
    print_row(w, "Mode", &stats.mode.to_string())?;
    for (label, value) in rows {
        print_row(w, label, &format_value(value))?;
    }

    if !summary.missing.is_empty() {
        writeln!(w)?;
        for missing in &summary.missing {
            writeln!(w, "  N/A {}: {}", missing.name, missing.reason)?;
        }
    }

    if !summary.quantiles.as_slice().is_empty() {
        writeln!(w)?;
        print_quantiles(w, &summary.quantiles)?;
    }
    Ok(())
}

fn print_quantiles<W: Write + ?Sized>(w: &mut W, quantiles: &Quantiles) -> io::Result<()> {
    print_table_header(w, "Quantile", "Value")?;
    for (p, value) in quantiles.iter() {
        print_row(w, &format!("p = {p}"), &format_value(Some(value)))?;
    }
    Ok(())
}

/// Print frequency counts and distinct-value count
pub(super) fn print_frequency_table<W: Write + ?Sized>(
    w: &mut W,
    stats: &DescriptiveStats,
) -> io::Result<()> {
    let table = &stats.frequency_table;
    print_header(
        w,
        &format!("Frequency table ({} distinct values)", table.distinct_len()),
    )?;
    print_table_header(w, "Value", "Count")?;
    for entry in table.entries() {
        print_row(w, &entry.value.to_string(), &entry.count.to_string())?;
    }
    Ok(())
}

/// Print histogram bins with a proportional bar for each
pub(super) fn print_histogram<W: Write + ?Sized>(
    w: &mut W,
    histogram: &Histogram,
) -> io::Result<()> {
    print_header(w, "Histogram")?;
    let max_count = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in &histogram.bins {
        let bar_len = if max_count == 0 {
            0
        } else {
            bin.count * BAR_WIDTH / max_count
        };
        writeln!(
            w,
            "  {:<LABEL_WIDTH$} {:>6} {}",
            bin.label,
            bin.count,
            "#".repeat(bar_len)
        )?;
    }
    Ok(())
}

/// Print the five-number summary, or why it is missing
pub(super) fn print_box_plot<W: Write + ?Sized>(
    w: &mut W,
    box_plot: &Section<BoxPlotSummary>,
) -> io::Result<()> {
    print_header(w, "Box plot")?;
    match box_plot {
        Section::Ready(summary) => {
            let (lower, upper) = summary.fences();
            print_row(w, "Min", &format_value(Some(summary.min)))?;
            print_row(w, "Q1", &format_value(Some(summary.q1)))?;
            print_row(w, "Median", &format_value(Some(summary.median)))?;
            print_row(w, "Q3", &format_value(Some(summary.q3)))?;
            print_row(w, "Max", &format_value(Some(summary.max)))?;
            print_row(w, "Lower fence", &format_value(Some(lower)))?;
            print_row(w, "Upper fence", &format_value(Some(upper)))?;
        }
        Section::Unavailable { reason } => writeln!(w, "  Unavailable: {reason}")?,
    }
    Ok(())
}

/// Print the regression fit
pub(super) fn print_regression<W: Write + ?Sized>(
    w: &mut W,
    regression: &RegressionResult,
) -> io::Result<()> {
    print_header(w, "Linear regression (Y on X)")?;
    writeln!(w, "  {}", regression.equation)?;
    if regression.is_degenerate() {
        return Ok(());
    }
    writeln!(w)?;
    print_table_header(w, "Parameter", "Value")?;
    print_row(w, "Slope", &format_value(regression.slope))?;
    print_row(w, "Intercept", &format_value(regression.intercept))?;
    print_row(
        w,
        "Correlation (r)",
        &format_value(regression.correlation_coefficient),
    )?;
    print_row(w, "R²", &format_value(regression.r_squared))?;
    print_row(w, "Adjusted R²", &format_value(regression.adjusted_r_squared))?;
    Ok(())
}

/// Print `(x, ŷ)` pairs evaluated on the fitted line
pub(super) fn print_predictions<W: Write + ?Sized>(
    w: &mut W,
    predictions: &[(f64, Option<f64>)],
) -> io::Result<()> {
    print_header(w, "Predictions")?;
    print_table_header(w, "X", "ŷ")?;
    for (x, y) in predictions {
        print_row(w, &x.to_string(), &format_value(*y))?;
    }
    Ok(())
}

/// Print the reason a section could not be computed
pub(super) fn print_unavailable<W: Write + ?Sized>(
    w: &mut W,
    title: &str,
    reason: &str,
) -> io::Result<()> {
    print_header(w, title)?;
    writeln!(w, "  Unavailable: {reason}")
}
