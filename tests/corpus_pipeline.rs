use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use lexcorpus::{load_dataset, store_dataset, ArchiveScanner, CorpusExtractor};

fn ruling(subjects: &str, body: &str) -> String {
    format!(
        r#"<document xmlns:dcterms="http://purl.org/dc/terms/">
            <dcterms:subject>{subjects}</dcterms:subject>
            <body>{body}</body>
        </document>"#
    )
}

fn write_corpus(dir: &Path) -> PathBuf {
    let entries: Vec<(&str, Vec<u8>)> = vec![
        (
            "a.xml",
            ruling("Civil Law; Contracts", "Ruling about a contract.").into_bytes(),
        ),
        (
            "b.xml",
            ruling("Civil Law; Torts", "Ruling about a tort.").into_bytes(),
        ),
        (
            "c.xml",
            ruling("Criminal Law; Contracts", "Contract fraud ruling.").into_bytes(),
        ),
        ("d.xml", ruling("Criminal Law", "Unclassified ruling.").into_bytes()),
        (
            "too_many.xml",
            ruling("One; Two; Three", "Overlabeled ruling.").into_bytes(),
        ),
        (
            "unlabeled.xml",
            "<document><body>No subjects here.</body></document>"
                .as_bytes()
                .to_vec(),
        ),
        ("broken.xml", b"<document><unclosed>".to_vec()),
        ("binary.bin", vec![0xff, 0xfe, 0x00]),
    ];
    let path = dir.join("rulings.zip");
    let mut writer = ZipWriter::new(fs::File::create(&path).unwrap());
    for (name, content) in &entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
    path
}

#[test]
fn archive_to_dataset_applies_the_acceptance_rule() {
    let dir = TempDir::new().unwrap();
    let path = write_corpus(dir.path());

    let mut extractor = CorpusExtractor::new();
    let summary = extractor.ingest_archive(ArchiveScanner::new(&path)).unwrap();
    let dataset = extractor.into_dataset();

    // All entries were handled; only the 1-or-2-subject documents were kept.
    assert_eq!(summary.handled, 8);
    assert_eq!(summary.skipped, 1);
    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.files, vec!["a.xml", "b.xml", "c.xml", "d.xml"]);
    assert_eq!(dataset.target1_names, vec!["Civil Law", "Criminal Law"]);
    assert_eq!(dataset.target2_names, vec!["Contracts", "Torts"]);
    assert_eq!(dataset.target1, vec![0, 0, 1, 1]);
    assert_eq!(
        dataset.target2,
        vec![Some(0), Some(1), Some(0), None]
    );
    assert!(dataset.data[0].contains("Ruling about a contract."));
    assert!(dataset.validate().is_ok());
}

#[test]
fn shaping_chain_keeps_invariants_and_reaches_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_corpus(dir.path());

    let mut extractor = CorpusExtractor::new();
    extractor.ingest_archive(ArchiveScanner::new(&path)).unwrap();

    let dataset = extractor
        .into_dataset()
        .filter_incomplete_subjects()
        .filter_small_subjects(1)
        .chop_large_subjects(1)
        .shuffle(Some(13));

    assert!(dataset.validate().is_ok());
    assert!(dataset.target2.iter().all(Option::is_some));

    // One record per second-level label after chopping to 1.
    let pairs = dataset.subject_indices();
    let group_sizes: Vec<usize> = pairs
        .values()
        .flat_map(|inner| inner.values().map(Vec::len))
        .collect();
    assert!(group_sizes.iter().all(|&size| size == 1));

    let stored = dir.path().join("shaped.dataset");
    store_dataset(&dataset, &stored).unwrap();
    assert_eq!(load_dataset(&stored).unwrap(), dataset);
}

#[test]
fn max_files_bounds_ingestion() {
    let dir = TempDir::new().unwrap();
    let path = write_corpus(dir.path());

    let mut extractor = CorpusExtractor::new();
    let summary = extractor
        .ingest_archive(ArchiveScanner::new(&path).with_max_files(3))
        .unwrap();

    assert_eq!(summary.handled, 3);
    // First three entries all carry two subjects.
    assert_eq!(extractor.dataset().len(), 3);
}
