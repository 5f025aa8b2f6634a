/// Constants used by XML subject and text extraction.
pub mod xml {
    /// Namespace of the subject elements carrying classification labels.
    pub const DCTERMS_NAMESPACE: &str = "http://purl.org/dc/terms/";
    /// Local name of the subject elements.
    pub const SUBJECT_TAG: &str = "subject";
    /// Delimiter separating multiple labels inside one subject element.
    pub const SUBJECT_DELIMITER: char = ';';
    /// Default separator joining flattened text fragments.
    pub const DEFAULT_SEPARATOR: &str = "\n";
}

/// Constants used by dataset persistence.
pub mod persist {
    /// Version byte prefixed to serialized dataset files.
    pub const DATASET_RECORD_VERSION: u8 = 1;
}
