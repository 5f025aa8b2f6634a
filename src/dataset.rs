use serde::{Deserialize, Serialize};

use crate::errors::CorpusError;
use crate::types::{DocumentText, EntryName, LabelIndex, LabelName};

/// Labeled record collection with parallel, index-aligned columns.
///
/// Every column shares one implicit record index `0..len()`. Label columns hold
/// positions into the matching name table; the second-level label is optional.
/// Transforms never mutate a dataset in place, they produce new values (see the
/// `transform` module).
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
)]
pub struct Dataset {
    /// Archive entry name per record.
    pub files: Vec<EntryName>,
    /// Flattened document text per record.
    pub data: Vec<DocumentText>,
    /// First-level label index per record (into `target1_names`).
    pub target1: Vec<LabelIndex>,
    /// Optional second-level label index per record (into `target2_names`).
    pub target2: Vec<Option<LabelIndex>>,
    /// First-level label name table, unique names in first-seen order.
    pub target1_names: Vec<LabelName>,
    /// Second-level label name table, unique names in first-seen order.
    pub target2_names: Vec<LabelName>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` when the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Append one record, interning label names.
    ///
    /// A label already present in its name table reuses the existing index; a new
    /// label is appended and receives the next index.
    pub fn push_record(
        &mut self,
        file: impl Into<EntryName>,
        text: impl Into<DocumentText>,
        subject1: &str,
        subject2: Option<&str>,
    ) {
        self.files.push(file.into());
        self.data.push(text.into());
        let index1 = intern(&mut self.target1_names, subject1);
        self.target1.push(index1);
        self.target2
            .push(subject2.map(|subject| intern(&mut self.target2_names, subject)));
    }

    /// Check the structural invariants: column alignment, label indices in range,
    /// duplicate-free name tables, and no orphaned names.
    ///
    /// Transforms preserve these by construction; `validate` is the explicit
    /// precondition check for datasets from untrusted sources.
    pub fn validate(&self) -> Result<(), CorpusError> {
        let len = self.files.len();
        if self.data.len() != len || self.target1.len() != len || self.target2.len() != len {
            return Err(CorpusError::InvalidDataset(format!(
                "column lengths differ: files={}, data={}, target1={}, target2={}",
                len,
                self.data.len(),
                self.target1.len(),
                self.target2.len()
            )));
        }
        check_labels(self.target1.iter().copied(), &self.target1_names, "target1")?;
        check_labels(self.target2.iter().flatten().copied(), &self.target2_names, "target2")?;
        Ok(())
    }
}

/// Return the position of `name` in `names`, appending it when missing.
fn intern(names: &mut Vec<LabelName>, name: &str) -> LabelIndex {
    match names.iter().position(|existing| existing == name) {
        Some(index) => index,
        None => {
            names.push(name.to_string());
            names.len() - 1
        }
    }
}

fn check_labels(
    values: impl Iterator<Item = LabelIndex>,
    names: &[LabelName],
    column: &str,
) -> Result<(), CorpusError> {
    let mut referenced = vec![false; names.len()];
    for index in values {
        match referenced.get_mut(index) {
            Some(slot) => *slot = true,
            None => {
                return Err(CorpusError::InvalidDataset(format!(
                    "{column} index {index} out of range for {} names",
                    names.len()
                )));
            }
        }
    }
    if let Some(orphan) = referenced.iter().position(|seen| !seen) {
        return Err(CorpusError::InvalidDataset(format!(
            "{column} name '{}' is referenced by no record",
            names[orphan]
        )));
    }
    for (index, name) in names.iter().enumerate() {
        if names[..index].contains(name) {
            return Err(CorpusError::InvalidDataset(format!(
                "{column} name '{name}' appears more than once"
            )));
        }
    }
    Ok(())
}
