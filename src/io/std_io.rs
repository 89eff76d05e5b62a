//! Standard sources: files and stdin.

use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::InputProvider;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Input provider for reading from stdin.
#[derive(Debug, Clone)]
pub struct StdinInput {
    id: String,
}

impl StdinInput {
    /// Create a new stdin input provider.
    pub fn new() -> Self {
        Self { id: "-".into() }
    }
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProvider for StdinInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        debug!("reading from stdin");
        Ok(Box::new(io::stdin()))
    }
}

/// Input provider for reading from files.
///
/// A leading UTF-8 byte order mark is skipped, so it never ends up in the
/// first header name or value.
#[derive(Debug, Clone)]
pub struct FileInput {
    id: String,
    path: PathBuf,
}

impl FileInput {
    /// Create a new file input provider.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path.to_string_lossy().into_owned();
        Self { id, path }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputProvider for FileInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        let mut reader = BufReader::new(std::fs::File::open(&self.path)?);
        let bom = reader.fill_buf()?.starts_with(UTF8_BOM);
        if bom {
            reader.consume(UTF8_BOM.len());
        }
        debug!(path = %self.path.display(), bom, "opened file");
        Ok(Box::new(reader))
    }
}
