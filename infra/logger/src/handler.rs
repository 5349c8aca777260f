use crate::error::LoggerError;
use crate::record::Record;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Terminal pipeline stage.
///
/// Every record that survived the level gate and all filters is delivered to
/// every handler, together with the line the logger's formatter rendered for
/// it.
pub trait Handler: Send + Sync {
    fn publish(&self, record: &Record, formatted: &str);
}

/// Writes formatted records to stdout, one line per record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleHandler;

impl ConsoleHandler {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Handler for ConsoleHandler {
    fn publish(&self, _record: &Record, formatted: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{formatted}");
    }
}

/// Appends formatted records to a file, one line per record.
#[derive(Debug)]
pub struct FileHandler {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileHandler {
    /// Opens `path` for appending, creating the file if it does not exist.
    ///
    /// # Errors
    /// Returns [`LoggerError::Io`] if the file cannot be opened.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, LoggerError> {
        let path = path.into();
        let file =
            OpenOptions::new().create(true).append(true).open(&path).map_err(|source| {
                LoggerError::Io {
                    source,
                    context: Some(format!("opening {}", path.display()).into()),
                }
            })?;
        Ok(Self { path, file: Mutex::new(file) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Handler for FileHandler {
    fn publish(&self, _record: &Record, formatted: &str) {
        let mut file = self.file.lock();
        let _ = writeln!(file, "{formatted}");
    }
}

/// Clonable recording handler retaining formatted lines.
///
/// Clones share one buffer, so a test can keep a handle while the logger
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryHandler {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line recorded so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn publish(&self, _record: &Record, formatted: &str) {
        self.lines.lock().push(formatted.to_owned());
    }
}
