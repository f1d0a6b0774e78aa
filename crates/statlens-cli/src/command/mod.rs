use std::{io, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use statlens_stats::{SampleTag, report::AnalysisConfig};
use tracing_subscriber::EnvFilter;

use crate::util::{self, SampleSource};

use self::{analyze::AnalyzeArg, describe::DescribeArg, regress::RegressArg};

mod analyze;
mod describe;
mod regress;
mod table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Descriptive statistics, histogram and box plot for one sample
    Describe(#[clap(flatten)] DescribeArg),
    /// Simple linear regression of Y on X
    Regress(#[clap(flatten)] RegressArg),
    /// Full report for X and an optional Y sample
    Analyze(#[clap(flatten)] AnalyzeArg),
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Default, Debug, Clone, Args)]
pub(crate) struct OutputArg {
    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Default, Debug, Clone, Args)]
pub(crate) struct ConfigArg {
    /// JSON file with analysis settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Maximum number of values accepted per sample
    #[arg(long)]
    pub max_values: Option<usize>,
    /// Decimal places used in histogram bin labels
    #[arg(long)]
    pub label_precision: Option<usize>,
    /// Extra quantiles to report (comma-separated probabilities in [0, 1])
    #[arg(long, value_delimiter = ',')]
    pub quantiles: Vec<f64>,
}

impl ConfigArg {
    /// Loads the config file, if any, then applies command-line overrides.
    pub(crate) fn load(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(max_values) = self.max_values {
            config.max_values = max_values;
        }
        if let Some(precision) = self.label_precision {
            config.label_precision = precision;
        }
        if !self.quantiles.is_empty() {
            config.quantiles.clone_from(&self.quantiles);
        }
        tracing::debug!(?config, "loaded analysis config");
        Ok(config)
    }
}

#[derive(Default, Debug, Clone, Args)]
pub(crate) struct XInputArg {
    /// X sample as delimited numbers (e.g. "1, 2; 3 4")
    #[arg(
        short = 'x',
        long = "x",
        conflicts_with = "x_file",
        allow_hyphen_values = true
    )]
    pub x: Option<String>,
    /// Read the X sample from a file ("-" for stdin)
    #[arg(long)]
    pub x_file: Option<PathBuf>,
}

impl XInputArg {
    /// Falls back to stdin when neither a literal nor a file is given.
    pub(crate) fn source(&self) -> SampleSource {
        sample_source(self.x.as_ref(), self.x_file.as_ref())
            .unwrap_or_else(|| SampleSource::File(PathBuf::from("-")))
    }
}

#[derive(Default, Debug, Clone, Args)]
pub(crate) struct YInputArg {
    /// Y sample as delimited numbers
    #[arg(
        short = 'y',
        long = "y",
        conflicts_with = "y_file",
        allow_hyphen_values = true
    )]
    pub y: Option<String>,
    /// Read the Y sample from a file ("-" for stdin)
    #[arg(long)]
    pub y_file: Option<PathBuf>,
}

impl YInputArg {
    pub(crate) fn source(&self) -> Option<SampleSource> {
        sample_source(self.y.as_ref(), self.y_file.as_ref())
    }
}

fn sample_source(literal: Option<&String>, file: Option<&PathBuf>) -> Option<SampleSource> {
    match (literal, file) {
        (Some(text), _) => Some(SampleSource::Literal(text.clone())),
        (None, Some(path)) => Some(SampleSource::File(path.clone())),
        (None, None) => None,
    }
}

/// Reads the raw text of both samples, refusing to consume stdin twice.
pub(crate) fn read_sample_texts(
    x: &SampleSource,
    y: Option<&SampleSource>,
) -> anyhow::Result<(String, Option<String>)> {
    if x.is_stdin() && y.is_some_and(SampleSource::is_stdin) {
        anyhow::bail!("X and Y cannot both be read from stdin");
    }
    let x_text = x.read(SampleTag::X)?;
    let y_text = y.map(|y| y.read(SampleTag::Y)).transpose()?;
    Ok((x_text, y_text))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match args.mode {
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Regress(arg) => regress::run(&arg)?,
        Mode::Analyze(arg) => analyze::run(&arg)?,
    }
    Ok(())
}
