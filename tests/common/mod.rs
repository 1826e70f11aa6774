/*!
 * Common test utilities for the captionflow test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use captionflow::{Document, TimeFragment, Word};

// Re-export the mock collaborators module
pub mod mock_collaborators;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample SRT file with three cues
pub fn create_test_srt(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
"#;
    create_test_file(dir, filename, content)
}

/// Builds a one-segment document, one second per word
pub fn sample_document(texts: &[&str]) -> Document {
    let words = texts
        .iter()
        .enumerate()
        .filter_map(|(i, text)| Word::new(text, TimeFragment::new(i as f64, i as f64 + 1.0)))
        .collect();
    let mut document = Document::new();
    document.push_words(words);
    document
}

/// Texts of every word in reading order
pub fn word_texts(document: &Document) -> Vec<String> {
    document.words().map(|w| w.text().to_string()).collect()
}

/// Asserts `end > start` at every level of the document
pub fn assert_well_formed(document: &Document) {
    for segment in document.segments() {
        assert!(segment.time().end() > segment.time().start());
        for line in segment.lines() {
            assert!(line.time().end() > line.time().start());
            for word in line.words() {
                assert!(word.time().end() > word.time().start(), "bad word timing: {:?}", word);
                assert!(!word.text().trim().is_empty());
            }
        }
    }
}
