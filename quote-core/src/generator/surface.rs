//! Display/print surfaces for generated documents.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{QuoteError, Result};

/// Somewhere a rendered document can be shown and printed.
pub trait DocumentSurface {
    /// Load the document markup into the surface.
    fn open(&mut self, document: &str) -> Result<()>;

    /// Request the platform print action for the loaded document.
    fn print(&mut self) -> Result<()>;
}

/// Open a document on a surface, wait for it to settle, then print.
pub fn present<S: DocumentSurface + ?Sized>(
    document: &str,
    surface: &mut S,
    delay: Duration,
) -> Result<()> {
    surface.open(document)?;
    if !delay.is_zero() {
        debug!("Waiting {:?} before print", delay);
        std::thread::sleep(delay);
    }
    surface.print()
}

/// Writes the document to an HTML file and prints by handing it to the
/// system's default browser.
#[derive(Debug, Clone)]
pub struct FileSurface {
    path: PathBuf,
    opened: bool,
}

impl FileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            opened: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSurface for FileSurface {
    fn open(&mut self, document: &str) -> Result<()> {
        std::fs::write(&self.path, document)?;
        self.opened = true;
        info!("Wrote quotation to {}", self.path.display());
        Ok(())
    }

    fn print(&mut self) -> Result<()> {
        if !self.opened {
            return Err(QuoteError::PrintUnavailable {
                path: self.path.clone(),
                message: "no document has been written".to_string(),
            });
        }
        opener::open(&self.path).map_err(|e| QuoteError::PrintUnavailable {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        info!("Opened {} for printing", self.path.display());
        Ok(())
    }
}

/// Keeps the document in memory and records the print request.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub document: Option<String>,
    pub printed: bool,
}

impl DocumentSurface for MemorySurface {
    fn open(&mut self, document: &str) -> Result<()> {
        self.document = Some(document.to_string());
        Ok(())
    }

    fn print(&mut self) -> Result<()> {
        self.printed = true;
        Ok(())
    }
}
