//! Destinations for generated procedures.

use std::io::Write;

use eyre::{Context, Result};
use sprocgen_codegen::GeneratedProcedure;

/// Where rendered procedures go.
pub trait Output {
    /// Emit one rendered procedure.
    fn emit(&mut self, procedure: &GeneratedProcedure) -> Result<()>;
}

/// Writes each procedure, followed by a newline, to a stream.
pub struct StreamOutput<W> {
    writer: W,
}

/// Procedures printed to stdout.
pub type TerminalOutput = StreamOutput<std::io::Stdout>;

impl<W: Write> StreamOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TerminalOutput {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Output for StreamOutput<W> {
    fn emit(&mut self, procedure: &GeneratedProcedure) -> Result<()> {
        writeln!(self.writer, "{}", procedure.content)
            .and_then(|()| self.writer.flush())
            .wrap_err_with(|| format!("failed to print '{}'", procedure.procedure_name))
    }
}

/// Writes each procedure to `<base>_<action>.sql`.
pub struct FileOutput {
    base: String,
}

impl FileOutput {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Output for FileOutput {
    fn emit(&mut self, procedure: &GeneratedProcedure) -> Result<()> {
        let file = procedure.file(&self.base);
        file.write()?;
        tracing::info!(
            procedure = %procedure.procedure_name,
            path = %file.path().display(),
            "wrote procedure"
        );
        Ok(())
    }
}
