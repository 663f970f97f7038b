use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::checkin::CheckinRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write check-in log {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize check-in log: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// JSON file holding every check-in as one pretty-printed array.
///
/// Reads are forgiving: a missing or unparsable file is an empty log.
/// Every append rewrites the whole file. There is no locking, so only one
/// process may write at a time.
#[derive(Debug, Clone)]
pub struct CheckinStore {
    path: PathBuf,
}

impl CheckinStore {
    /// Handle for the log at `path`. Nothing is touched on disk until the
    /// first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored record in insertion order.
    pub fn load_all(&self) -> Vec<CheckinRecord> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No check-in log at {:?} yet", self.path);
                return Vec::new();
            }
            Err(e) => {
                warn!("Could not read check-in log {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Check-in log {:?} is not a valid record list, treating as empty: {}",
                    self.path, e
                );
                Vec::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.load_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append one record and rewrite the log.
    ///
    /// The new content goes to a temp file in the same directory which is
    /// then renamed over the log, so an interrupted write leaves the old
    /// log in place.
    pub fn append(&self, record: &CheckinRecord) -> Result<(), StoreError> {
        let mut records = self.load_all();
        records.push(record.clone());

        let json = serde_json::to_string_pretty(&records)?;
        self.write_atomic(json.as_bytes())
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        info!(
            "Appended check-in to {:?} ({} total)",
            self.path,
            records.len()
        );
        Ok(())
    }

    /// The last `n` records, most recent first.
    pub fn recent(&self, n: usize) -> Vec<CheckinRecord> {
        recent_history(&self.load_all(), n)
    }

    fn write_atomic(&self, bytes: &[u8]) -> std::io::Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(bytes)?;
        temp.flush()?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Take the last `n` records of a log and present them most recent first.
pub fn recent_history(records: &[CheckinRecord], n: usize) -> Vec<CheckinRecord> {
    records.iter().rev().take(n).cloned().collect()
}
