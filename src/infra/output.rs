use crate::domain::models::{CollectSummary, OutputTarget};
use anyhow::Context;
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

pub trait OutputWriter {
    fn write(&mut self, content: &str) -> anyhow::Result<()>;

    /// Flushes buffered output. The sink is closed when dropped.
    fn finish(&mut self) -> anyhow::Result<()>;
}

pub struct FileWriter {
    path: PathBuf,
    inner: BufWriter<File>,
}

impl FileWriter {
    /// Creates or truncates `path`.
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        debug!("Opening output file: {}", path.display());
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            inner: BufWriter::new(file),
        })
    }
}

impl OutputWriter for FileWriter {
    fn write(&mut self, content: &str) -> anyhow::Result<()> {
        self.inner
            .write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to {}", self.path.display()))
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.inner
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        info!("Output written to file: {}", self.path.display());
        Ok(())
    }
}

pub struct ConsoleWriter {
    inner: BufWriter<Stdout>,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self {
            inner: BufWriter::new(io::stdout()),
        }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write(&mut self, content: &str) -> anyhow::Result<()> {
        self.inner.write_all(content.as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        debug!("Flushing output to console");
        self.inner.flush()?;
        Ok(())
    }
}

pub fn create_writer(target: &OutputTarget) -> anyhow::Result<Box<dyn OutputWriter>> {
    match target {
        OutputTarget::File(path) => Ok(Box::new(FileWriter::create(path)?)),
        OutputTarget::Stdout => Ok(Box::new(ConsoleWriter::new())),
    }
}

/// One-line run summary. Written to `out` (stderr in practice) so it never
/// lands in collected output sent to stdout.
pub fn report_completion<W: Write>(
    out: &mut W,
    summary: &CollectSummary,
    target: &OutputTarget,
) -> io::Result<()> {
    let color = if summary.files_failed > 0 {
        Color::Yellow
    } else {
        Color::Green
    };

    out.execute(SetForegroundColor(color))?;
    write!(
        out,
        "✓ Collected {} files ({} bytes) into {}",
        summary.files_written, summary.bytes_written, target
    )?;
    out.execute(ResetColor)?;

    if summary.files_failed > 0 {
        write!(out, ", {} unreadable", summary.files_failed)?;
    }
    writeln!(out)?;
    out.flush()
}
