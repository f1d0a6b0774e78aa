use std::io::{self, Write};

use clap::Args;
use statlens_stats::{Sample, SampleTag, report::SampleSummary};

use crate::{
    command::{ConfigArg, OutputArg, XInputArg, table},
    util::Output,
};

#[derive(Default, Debug, Clone, Args)]
pub(crate) struct DescribeArg {
    #[clap(flatten)]
    pub input: XInputArg,
    /// Also print the full frequency table (text output only)
    #[arg(long)]
    pub frequencies: bool,
    #[clap(flatten)]
    pub config: ConfigArg,
    #[clap(flatten)]
    pub output: OutputArg,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let config = arg.config.load()?;
    let (text, _) = super::read_sample_texts(&arg.input.source(), None)?;
    let sample = Sample::parse_with_limit(SampleTag::X, &text, Some(config.max_values))?;
    tracing::info!(count = sample.len(), "parsed sample X");

    let summary = SampleSummary::new(SampleTag::X, &sample, &config)?.with_charts(&sample, &config);

    Output::create(arg.output.output.as_deref())?.write_report(
        arg.output.format,
        &summary,
        |w, summary| write_text(w, summary, arg.frequencies),
    )
}

fn write_text(
    output: &mut dyn Write,
    summary: &SampleSummary,
    frequencies: bool,
) -> io::Result<()> {
    table::print_stats(output, SampleTag::X, summary)?;
    if let Some(histogram) = &summary.histogram {
        writeln!(output)?;
        table::print_histogram(output, histogram)?;
    }
    if let Some(box_plot) = &summary.box_plot {
        writeln!(output)?;
        table::print_box_plot(output, box_plot)?;
    }
    if frequencies {
        writeln!(output)?;
        table::print_frequency_table(output, &summary.stats)?;
    }
    Ok(())
}
