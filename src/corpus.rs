//! JSON-lines label corpus.
//!
//! Each non-blank line is one document, an object carrying a `label`
//! array. Other fields (text, ids) are ignored:
//!
//! ```text
//! {"text": "...", "label": ["Governing Law", "Notices"]}
//! {"text": "...", "label": []}
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::errors::{HierarchyError, Result};
use crate::types::LabelCounts;

#[derive(Deserialize)]
struct Record {
    label: Vec<String>,
}

/// Per-document label sets read from a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelCorpus {
    documents: Vec<Vec<String>>,
}

impl LabelCorpus {
    pub fn new(documents: Vec<Vec<String>>) -> Self {
        Self { documents }
    }

    /// Parse a corpus from any buffered reader.
    ///
    /// Line numbers in errors are 1-based.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut documents = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: Record = serde_json::from_str(&line).map_err(|source| {
                HierarchyError::Corpus {
                    line: idx + 1,
                    source,
                }
            })?;
            documents.push(record.label);
        }
        Ok(Self { documents })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HierarchyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Label sets in document order
    pub fn label_sets(&self) -> &[Vec<String>] {
        &self.documents
    }

    /// Every distinct label, sorted
    pub fn distinct_labels(&self) -> Vec<&str> {
        self.label_counts_ref().into_keys().collect()
    }

    /// Occurrences of each label across all documents
    pub fn label_counts(&self) -> LabelCounts {
        self.label_counts_ref()
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .collect()
    }

    fn label_counts_ref(&self) -> BTreeMap<&str, u64> {
        let mut counts = BTreeMap::new();
        for label in self.documents.iter().flatten() {
            *counts.entry(label.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = r#"{"text": "a", "label": ["Governing Law", "Notices"]}

{"text": "b", "label": []}
{"label": ["Notices"], "id": 7}
"#;

    #[test]
    fn test_reads_records_and_skips_blank_lines() {
        let corpus = LabelCorpus::from_reader(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.label_sets()[0], vec!["Governing Law", "Notices"]);
        assert!(corpus.label_sets()[1].is_empty());
    }

    #[test]
    fn test_distinct_labels_and_counts() {
        let corpus = LabelCorpus::from_reader(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(corpus.distinct_labels(), vec!["Governing Law", "Notices"]);
        let counts = corpus.label_counts();
        assert_eq!(counts["Notices"], 2);
        assert_eq!(counts["Governing Law"], 1);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let input = "{\"label\": [\"a\"]}\n{\"text\": \"no labels\"}\n";
        let err = LabelCorpus::from_reader(Cursor::new(input)).unwrap_err();
        match err {
            HierarchyError::Corpus { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = LabelCorpus::from_path("/nonexistent/corpus.jsonl").unwrap_err();
        assert!(matches!(err, HierarchyError::Read { .. }));
    }
}
