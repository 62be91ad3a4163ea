//! Length-verified configuration sinks.
//!
//! # Data Flow
//! ```text
//! worker (drain) → ConfigWriter::write(bytes)
//!     → FileConfigWriter: staging file → atomic rename onto target
//! callers treat written != len as failure and retry on the next drain
//! ```
//!
//! # Design Decisions
//! - One operation; the core only needs length-verified writes
//! - Trait object seam so tests and alternative transports can plug in
//! - Staging + rename keeps readers from ever seeing a partial document

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

/// A scoped byte sink accepting one complete configuration document.
pub trait ConfigWriter: Send {
    /// Write the full document, returning how many bytes were accepted.
    fn write(&mut self, output: &[u8]) -> io::Result<usize>;
}

/// File sink that stages the document and renames it into place.
#[derive(Debug)]
pub struct FileConfigWriter {
    path: PathBuf,
    staging: PathBuf,
}

impl FileConfigWriter {
    /// Create a writer targeting `path`; the staging sibling lives next to it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let staging = path.with_extension("staging");
        Self { path, staging }
    }

    /// Target path of the completed document.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ConfigWriter for FileConfigWriter {
    fn write(&mut self, output: &[u8]) -> io::Result<usize> {
        let mut file = File::create(&self.staging)?;
        file.write_all(output)?;
        drop(file);
        fs::rename(&self.staging, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            bytes = output.len(),
            "configuration document written"
        );
        Ok(output.len())
    }
}
