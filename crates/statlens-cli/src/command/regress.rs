use std::io::{self, Write};

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use statlens_stats::{Sample, SampleTag, regression::RegressionResult};

use crate::{
    command::{ConfigArg, OutputArg, XInputArg, YInputArg, table},
    util::Output,
};

#[derive(Default, Debug, Clone, Args)]
pub(crate) struct RegressArg {
    #[clap(flatten)]
    pub x: XInputArg,
    #[clap(flatten)]
    pub y: YInputArg,
    /// X values to evaluate on the fitted line (comma-separated)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub predict: Vec<f64>,
    #[clap(flatten)]
    pub config: ConfigArg,
    #[clap(flatten)]
    pub output: OutputArg,
}

#[derive(Debug, Clone, Serialize)]
struct Prediction {
    x: f64,
    y: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
struct RegressionOutput {
    regression: RegressionResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    predictions: Vec<Prediction>,
}

pub(crate) fn run(arg: &RegressArg) -> anyhow::Result<()> {
    let config = arg.config.load()?;
    let y_source = arg
        .y
        .source()
        .context("A Y sample is required (use --y or --y-file)")?;
    let (x_text, y_text) = super::read_sample_texts(&arg.x.source(), Some(&y_source))?;
    let y_text = y_text.unwrap_or_default();

    let limit = Some(config.max_values);
    let x = Sample::parse_with_limit(SampleTag::X, &x_text, limit)?;
    let y = Sample::parse_with_limit(SampleTag::Y, &y_text, limit)?;
    tracing::info!(x_len = x.len(), y_len = y.len(), "parsed samples");

    let regression = RegressionResult::fit(&x, &y).context("Failed to fit regression")?;
    if regression.is_degenerate() {
        tracing::warn!("all X values are equal; no line can be fit");
    }
    let predictions = arg
        .predict
        .iter()
        .map(|&x| Prediction {
            x,
            y: regression.predict(x),
        })
        .collect::<Vec<_>>();

    Output::create(arg.output.output.as_deref())?.write_report(
        arg.output.format,
        &RegressionOutput {
            regression,
            predictions,
        },
        write_text,
    )
}

fn write_text(output: &mut dyn Write, fit: &RegressionOutput) -> io::Result<()> {
    table::print_regression(output, &fit.regression)?;
    if !fit.predictions.is_empty() {
        let pairs = fit
            .predictions
            .iter()
            .map(|p| (p.x, p.y))
            .collect::<Vec<_>>();
        writeln!(output)?;
        table::print_predictions(output, &pairs)?;
    }
    Ok(())
}
