use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};

/// A generated file to be written to disk.
pub struct File {
    path: PathBuf,
    content: String,
    mode: Option<u32>,
}

impl File {
    /// Create a new file with the given path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            mode: None,
        }
    }

    /// Set the Unix permission bits used when the file is created. The
    /// process umask still applies; existing files keep their mode.
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file, replacing any existing content.
    pub fn write(&self) -> Result<()> {
        write_file(&self.path, &self.content, self.mode)
            .wrap_err_with(|| format!("failed to write '{}'", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), bytes = self.content.len(), "wrote file");
        Ok(())
    }
}

fn write_file(path: &Path, content: &str, mode: Option<u32>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    if let Some(mode) = mode {
        creation_mode(&mut options, mode);
    }
    options.open(path)?.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(unix)]
fn creation_mode(options: &mut OpenOptions, mode: u32) {
    use std::os::unix::fs::OpenOptionsExt;

    options.mode(mode);
}

#[cfg(not(unix))]
fn creation_mode(_options: &mut OpenOptions, _mode: u32) {}
