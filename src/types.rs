/// Name of the archive entry a record was extracted from.
/// Example: `rulings/ECLI_NL_RBAMS_2014_1953.xml`
pub type EntryName = String;
/// Flattened document text with XML structure removed.
/// Example: `Uitspraak\nDe rechtbank overweegt als volgt.`
pub type DocumentText = String;
/// Human-readable classification label at either hierarchy level.
/// Examples: `Civil Law`, `Contracts`
pub type LabelName = String;
/// Position of a label inside its name table.
pub type LabelIndex = usize;
