use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read as _, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Serialize;
use statlens_stats::{SampleTag, report::AnalysisConfig};

use crate::command::OutputFormat;

/// Where a report ends up
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum OutputTarget {
    #[display("stdout")]
    Stdout,
    #[display("{}", _0.display())]
    File(PathBuf),
}

/// A report destination opened for writing
pub struct Output {
    target: OutputTarget,
    writer: Box<dyn Write>,
}

impl Output {
    /// Opens `path` for writing, or stdout when no path is given.
    pub fn create(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self {
                target: OutputTarget::Stdout,
                writer: Box::new(io::stdout().lock()),
            });
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            target: OutputTarget::File(path.to_owned()),
            writer: Box::new(BufWriter::new(file)),
        })
    }

    /// Writes `value` as pretty JSON or through `render` as text, then flushes.
    pub fn write_report<T, F>(
        mut self,
        format: OutputFormat,
        value: &T,
        render: F,
    ) -> anyhow::Result<()>
    where
        T: Serialize,
        F: FnOnce(&mut dyn Write, &T) -> io::Result<()>,
    {
        let written = match format {
            OutputFormat::Json => serde_json::to_writer_pretty(&mut self.writer, value)
                .map_err(io::Error::from)
                .and_then(|()| writeln!(self.writer)),
            OutputFormat::Text => render(self.writer.as_mut(), value),
        };
        written
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("Failed to write report to {}", self.target))?;
        if let OutputTarget::File(path) = &self.target {
            tracing::info!(path = %path.display(), "report written");
        }
        Ok(())
    }
}

/// Read analysis settings from a JSON file
///
/// Missing keys fall back to [`AnalysisConfig::default`].
pub fn read_config_file(path: &Path) -> anyhow::Result<AnalysisConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config JSON file: {}", path.display()))
}

/// Where the raw text of a sample comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleSource {
    /// Text given directly on the command line
    Literal(String),
    /// A file path, or `-` for standard input
    File(PathBuf),
}

impl SampleSource {
    pub fn is_stdin(&self) -> bool {
        matches!(self, SampleSource::File(path) if path.as_os_str() == "-")
    }

    /// Read the raw sample text
    ///
    /// # Errors
    ///
    /// Returns error if the file or standard input cannot be read
    pub fn read(&self, tag: SampleTag) -> anyhow::Result<String> {
        let text = match self {
            SampleSource::Literal(text) => text.clone(),
            SampleSource::File(_) if self.is_stdin() => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .with_context(|| format!("Failed to read sample {tag} from stdin"))?;
                text
            }
            SampleSource::File(path) => std::fs::read_to_string(path).with_context(|| {
                format!("Failed to read sample {tag} from {}", path.display())
            })?,
        };
        tracing::debug!(sample = %tag, bytes = text.len(), "read sample text");
        Ok(text)
    }
}
