use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Impossible to open {}: {source}", path.display())]
    OpenDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Skipping: {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Impossible to read info file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Impossible to write the index file {}: {source}", path.display())]
    WriteIndex {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Impossible to remove the stale index file {}: {source}", path.display())]
    RemoveIndex {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl IndexerError {
    /// Per-file failures are reported and skipped; everything else aborts the run.
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::OpenFile { .. } | Self::ReadFile { .. })
    }
}
