//! XML document ingestion: text flattening, subject extraction, and the
//! acceptance rule that grows a [`Dataset`].

use roxmltree::{Document, Node};
use tracing::debug;

use crate::archive::{ArchiveScanner, ScanSummary};
use crate::constants::xml::{
    DCTERMS_NAMESPACE, DEFAULT_SEPARATOR, SUBJECT_DELIMITER, SUBJECT_TAG,
};
use crate::dataset::Dataset;
use crate::errors::CorpusError;
use crate::types::LabelName;

/// Builds a [`Dataset`] from raw XML documents.
///
/// Documents are accepted only when they carry exactly one or two subject
/// labels; everything else is skipped. Malformed XML is skipped as well, one
/// bad document never aborts ingestion.
#[derive(Clone, Debug)]
pub struct CorpusExtractor {
    separator: String,
    data: Dataset,
}

impl Default for CorpusExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusExtractor {
    /// Create an extractor with the default text separator.
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            data: Dataset::new(),
        }
    }

    /// Override the separator joining flattened text fragments.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Ingest one XML document identified by `path`.
    ///
    /// Unparseable documents and documents with zero or more than two subjects
    /// are skipped without error.
    pub fn handle_xml_file(&mut self, path: &str, content: &str) {
        let document = match Document::parse(content) {
            Ok(document) => document,
            Err(err) => {
                debug!(path, error = %err, "skipping unparseable document");
                return;
            }
        };
        let text = extract_text_from_xml(document.root(), &self.separator);
        let subjects = extract_subjects(&document);
        match subjects.as_slice() {
            [subject1] => self.data.push_record(path, text, subject1, None),
            [subject1, subject2] => self.data.push_record(path, text, subject1, Some(subject2)),
            _ => debug!(
                path,
                subjects = subjects.len(),
                "skipping document without one or two subjects"
            ),
        }
    }

    /// Scan a zip archive and ingest every XML entry it contains.
    pub fn ingest_archive(&mut self, scanner: ArchiveScanner) -> Result<ScanSummary, CorpusError> {
        scanner.scan(|path, content| self.handle_xml_file(path, content))
    }

    /// The dataset accumulated so far.
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// Consume the extractor and return the accumulated dataset.
    pub fn into_dataset(self) -> Dataset {
        self.data
    }
}

/// Collect the subject labels of a document in document order.
///
/// Subjects live in `dcterms:subject` elements; a single element may carry
/// several labels separated by semicolons. Fragments are trimmed and empty
/// fragments dropped.
pub fn extract_subjects(document: &Document<'_>) -> Vec<LabelName> {
    let mut subjects = Vec::new();
    for node in document.descendants() {
        if !node.is_element()
            || node.tag_name().name() != SUBJECT_TAG
            || node.tag_name().namespace() != Some(DCTERMS_NAMESPACE)
        {
            continue;
        }
        let Some(text) = node.text() else { continue };
        subjects.extend(
            text.split(SUBJECT_DELIMITER)
                .map(str::trim)
                .filter(|fragment| !fragment.is_empty())
                .map(String::from),
        );
    }
    subjects
}

/// Depth-first concatenation of all text content under `node`, pieces trimmed
/// and joined by `separator`.
pub fn extract_text_from_xml(node: Node<'_, '_>, separator: &str) -> String {
    let mut pieces = Vec::new();
    for descendant in node.descendants() {
        if !descendant.is_text() {
            continue;
        }
        if let Some(text) = descendant.text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                pieces.push(trimmed);
            }
        }
    }
    pieces.join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELED_DOCUMENT: &str = r#"
        <document xmlns:dcterms="http://purl.org/dc/terms/">
            <dcterms:subject>Civil Law; Contracts</dcterms:subject>
            <body>Some ruling text.</body>
        </document>"#;

    #[test]
    fn extract_text_concatenates_nested_nodes() {
        let document = Document::parse("<a>x<b>y</b></a>").unwrap();
        assert_eq!(extract_text_from_xml(document.root(), "-"), "x-y");
    }

    #[test]
    fn extract_text_skips_whitespace_only_fragments() {
        let document = Document::parse("<a> <b>y</b>\n<c>z</c></a>").unwrap();
        assert_eq!(extract_text_from_xml(document.root(), " "), "y z");
    }

    #[test]
    fn extract_subjects_splits_semicolon_delimited_labels() {
        let document = Document::parse(LABELED_DOCUMENT).unwrap();
        assert_eq!(extract_subjects(&document), vec!["Civil Law", "Contracts"]);
    }

    #[test]
    fn extract_subjects_ignores_foreign_namespaces() {
        let document = Document::parse(
            r#"<document xmlns:other="http://example.org/">
                <other:subject>Not a label</other:subject>
            </document>"#,
        )
        .unwrap();
        assert!(extract_subjects(&document).is_empty());
    }

    #[test]
    fn handle_xml_file_adds_record_with_two_subjects() {
        let mut extractor = CorpusExtractor::new();
        extractor.handle_xml_file("ruling.xml", LABELED_DOCUMENT);
        let dataset = extractor.dataset();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.files, vec!["ruling.xml"]);
        assert_eq!(dataset.target1_names, vec!["Civil Law"]);
        assert_eq!(dataset.target2_names, vec!["Contracts"]);
        assert_eq!(dataset.target1, vec![0]);
        assert_eq!(dataset.target2, vec![Some(0)]);
        assert_eq!(dataset.data[0], "Civil Law; Contracts\nSome ruling text.");
    }

    #[test]
    fn handle_xml_file_skips_document_without_subjects() {
        let mut extractor = CorpusExtractor::new();
        extractor.handle_xml_file("plain.xml", "<document><body>text</body></document>");
        assert!(extractor.dataset().is_empty());
    }

    #[test]
    fn handle_xml_file_skips_document_with_too_many_subjects() {
        let mut extractor = CorpusExtractor::new();
        extractor.handle_xml_file(
            "overlabeled.xml",
            r#"<document xmlns:dcterms="http://purl.org/dc/terms/">
                <dcterms:subject>One; Two; Three</dcterms:subject>
            </document>"#,
        );
        assert!(extractor.dataset().is_empty());
    }

    #[test]
    fn handle_xml_file_skips_malformed_document() {
        let mut extractor = CorpusExtractor::new();
        extractor.handle_xml_file("broken.xml", "<document><unclosed>");
        assert!(extractor.dataset().is_empty());
    }

    #[test]
    fn handle_xml_file_with_one_subject_leaves_target2_absent() {
        let mut extractor = CorpusExtractor::new().with_separator(" ");
        extractor.handle_xml_file(
            "single.xml",
            r#"<document xmlns:dcterms="http://purl.org/dc/terms/">
                <dcterms:subject>Civil Law</dcterms:subject>
                <body>Short text.</body>
            </document>"#,
        );
        let dataset = extractor.dataset();
        assert_eq!(dataset.target2, vec![None]);
        assert!(dataset.target2_names.is_empty());
        assert_eq!(dataset.data[0], "Civil Law Short text.");
    }
}
