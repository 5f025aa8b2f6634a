//! Streaming enumeration of zip archive entries.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::errors::CorpusError;

/// Progress snapshot passed to the scan callback after each entry.
#[derive(Clone, Copy, Debug)]
pub struct ScanProgress {
    /// Entries handled so far, including entries skipped for bad encoding.
    pub handled: usize,
    /// Total entries this scan will handle (archive size capped by the
    /// max-files limit). The terminal callback has `handled == total`.
    pub total: usize,
    /// Time elapsed since the scan started.
    pub elapsed: Duration,
}

/// Totals reported after a completed scan.
#[derive(Clone, Copy, Debug)]
pub struct ScanSummary {
    /// Entries handled, including skipped ones.
    pub handled: usize,
    /// Entries skipped because their content was not valid UTF-8.
    pub skipped: usize,
    /// Total scan duration.
    pub elapsed: Duration,
}

/// Callback invoked with a [`ScanProgress`] snapshot after each entry.
pub type ProgressFn = Box<dyn FnMut(ScanProgress)>;

/// Configurable scanner over the entries of one zip archive.
///
/// Each entry is decoded as UTF-8 text and passed with its entry name to the
/// handler. Entries that are not valid UTF-8 are skipped; a path that does not
/// lead to a zip archive fails before any entry is handled.
pub struct ArchiveScanner {
    path: PathBuf,
    max_files: Option<usize>,
    progress: Option<ProgressFn>,
}

impl fmt::Debug for ArchiveScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveScanner")
            .field("path", &self.path)
            .field("max_files", &self.max_files)
            .finish()
    }
}

impl ArchiveScanner {
    /// Create a scanner for the archive at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_files: None,
            progress: None,
        }
    }

    /// Stop after handling at most `max_files` entries.
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = Some(max_files);
        self
    }

    /// Register a progress callback invoked after each entry.
    pub fn with_progress(mut self, progress: impl FnMut(ScanProgress) + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Scan the archive, passing each entry's name and UTF-8 text to `handler`.
    ///
    /// Fails with [`CorpusError::BadArchive`] when the path is missing, is a
    /// directory, or does not contain a zip archive; no entry is handled in
    /// that case. Reaching the max-files limit halts the scan without error.
    pub fn scan(
        mut self,
        mut handler: impl FnMut(&str, &str),
    ) -> Result<ScanSummary, CorpusError> {
        let started = Instant::now();
        let mut archive = open_archive(&self.path)?;
        let total = match self.max_files {
            Some(limit) => archive.len().min(limit),
            None => archive.len(),
        };

        let mut handled = 0;
        let mut skipped = 0;
        for index in 0..total {
            let mut entry = archive
                .by_index(index)
                .map_err(|err| bad_archive(&self.path, err))?;
            let name = entry.name().to_string();
            let mut text = String::new();
            match entry.read_to_string(&mut text) {
                Ok(_) => handler(&name, &text),
                Err(err) => {
                    skipped += 1;
                    debug!(entry = %name, error = %err, "skipping undecodable archive entry");
                }
            }
            handled += 1;
            if let Some(progress) = self.progress.as_mut() {
                progress(ScanProgress {
                    handled,
                    total,
                    elapsed: started.elapsed(),
                });
            }
        }

        Ok(ScanSummary {
            handled,
            skipped,
            elapsed: started.elapsed(),
        })
    }
}

fn open_archive(path: &Path) -> Result<zip::ZipArchive<fs::File>, CorpusError> {
    if !path.exists() {
        return Err(CorpusError::BadArchive {
            path: path.to_path_buf(),
            reason: "path does not exist".to_string(),
        });
    }
    if path.is_dir() {
        return Err(CorpusError::BadArchive {
            path: path.to_path_buf(),
            reason: "path is a directory".to_string(),
        });
    }
    let file = fs::File::open(path)?;
    zip::ZipArchive::new(file).map_err(|err| bad_archive(path, err))
}

fn bad_archive(path: &Path, err: zip::result::ZipError) -> CorpusError {
    CorpusError::BadArchive {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
