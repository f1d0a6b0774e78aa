use std::io::{self, Write};

use clap::Args;
use statlens_stats::{
    SampleTag,
    report::{AnalysisReport, Section},
};

use crate::{
    command::{ConfigArg, OutputArg, XInputArg, YInputArg, table},
    util::Output,
};

#[derive(Default, Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    #[clap(flatten)]
    pub x: XInputArg,
    #[clap(flatten)]
    pub y: YInputArg,
    #[clap(flatten)]
    pub config: ConfigArg,
    #[clap(flatten)]
    pub output: OutputArg,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let config = arg.config.load()?;
    let (x_text, y_text) = super::read_sample_texts(&arg.x.source(), arg.y.source().as_ref())?;

    let report = AnalysisReport::from_text(&x_text, y_text.as_deref(), &config);
    if let Some(reason) = report.x.reason() {
        tracing::warn!(reason, "sample X could not be analyzed");
    }
    if let Some(reason) = report.y.as_ref().and_then(Section::reason) {
        tracing::warn!(reason, "sample Y could not be analyzed");
    }

    Output::create(arg.output.output.as_deref())?.write_report(
        arg.output.format,
        &report,
        write_text,
    )
}

fn write_text(output: &mut dyn Write, report: &AnalysisReport) -> io::Result<()> {
    match &report.x {
        Section::Ready(summary) => {
            table::print_stats(output, SampleTag::X, summary)?;
            if let Some(histogram) = &summary.histogram {
                writeln!(output)?;
                table::print_histogram(output, histogram)?;
            }
            if let Some(box_plot) = &summary.box_plot {
                writeln!(output)?;
                table::print_box_plot(output, box_plot)?;
            }
        }
        Section::Unavailable { reason } => table::print_unavailable(output, "Sample X", reason)?,
    }

    if let Some(y) = &report.y {
        writeln!(output)?;
        match y {
            Section::Ready(summary) => table::print_stats(output, SampleTag::Y, summary)?,
            Section::Unavailable { reason } => {
                table::print_unavailable(output, "Sample Y", reason)?;
            }
        }
    }

    if let Some(regression) = &report.regression {
        writeln!(output)?;
        match regression {
            Section::Ready(fit) => table::print_regression(output, fit)?,
            Section::Unavailable { reason } => {
                table::print_unavailable(output, "Linear regression (Y on X)", reason)?;
            }
        }
    }

    if let Some(Section::Ready(points)) = &report.scatter {
        writeln!(output)?;
        writeln!(output, "Scatter: {} paired points", points.len())?;
    }
    Ok(())
}
