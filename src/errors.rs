use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for archive, persistence, and dataset-validation failures.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("bad archive '{}': {reason}", path.display())]
    BadArchive { path: PathBuf, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("dataset persistence failure: {0}")]
    Persistence(String),
    #[error("dataset invariant violated: {0}")]
    InvalidDataset(String),
}
