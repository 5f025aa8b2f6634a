//! Dataset persistence as a versioned binary blob.

use std::fs;
use std::path::Path;

use crate::constants::persist::DATASET_RECORD_VERSION;
use crate::dataset::Dataset;
use crate::errors::CorpusError;

/// Serialize `dataset` to `path` as a version-prefixed bitcode blob.
pub fn store_dataset(dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), CorpusError> {
    let payload = bitcode::encode(dataset);
    let mut buffer = Vec::with_capacity(1 + payload.len());
    buffer.push(DATASET_RECORD_VERSION);
    buffer.extend_from_slice(&payload);
    fs::write(path, buffer)?;
    Ok(())
}

/// Load a dataset previously written by [`store_dataset`].
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, CorpusError> {
    let bytes = fs::read(path)?;
    match bytes.split_first() {
        Some((&DATASET_RECORD_VERSION, payload)) => bitcode::decode(payload)
            .map_err(|err| CorpusError::Persistence(format!("corrupt dataset file: {err}"))),
        Some((&version, _)) => Err(CorpusError::Persistence(format!(
            "dataset file version mismatch: found {version}, expected {DATASET_RECORD_VERSION}"
        ))),
        None => Err(CorpusError::Persistence("dataset file is empty".to_string())),
    }
}
