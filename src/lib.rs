#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Streaming zip archive enumeration.
pub mod archive;
/// Centralized constants for extraction and persistence.
pub mod constants;
/// The labeled record collection and its invariants.
pub mod dataset;
/// XML ingestion: text flattening and subject extraction.
pub mod extract;
/// Dataset store/load helpers.
pub mod persist;
/// Dataset reshaping operations.
pub mod transform;
/// Shared type aliases.
pub mod types;

mod errors;

pub use archive::{ArchiveScanner, ProgressFn, ScanProgress, ScanSummary};
pub use dataset::Dataset;
pub use errors::CorpusError;
pub use extract::{extract_subjects, extract_text_from_xml, CorpusExtractor};
pub use persist::{load_dataset, store_dataset};
pub use types::{DocumentText, EntryName, LabelIndex, LabelName};
