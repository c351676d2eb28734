//! @ai:module:intent Define the record extracted from one annotated source file and the rendered document index
//! @ai:module:layer domain
//! @ai:module:public_api Record, Document, DocIndex
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Metadata and body extracted from the leading comment of one source file
/// @ai:invariant never mutated after the parser returns it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub author: String,
    pub date: String,
    pub file_label: String,
    pub problem: String,
    pub solution: String,
    pub note: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub body: String,
}

impl Record {
    /// @ai:intent Check whether the record carries both fields required for rendering
    /// @ai:post true iff author and file_label are non-empty
    /// @ai:effects pure
    pub fn is_documentable(&self) -> bool {
        !self.author.is_empty() && !self.file_label.is_empty()
    }

    /// @ai:intent List the metadata fields as (label, value) pairs in template order
    /// @ai:effects pure
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("Author", self.author.as_str()),
            ("Date", self.date.as_str()),
            ("File", self.file_label.as_str()),
            ("Problem", self.problem.as_str()),
            ("Solution", self.solution.as_str()),
            ("Time Complexity", self.time_complexity.as_str()),
            ("Space Complexity", self.space_complexity.as_str()),
            ("Note", self.note.as_str()),
        ]
    }
}

/// @ai:intent A rendered Markdown document together with the source path it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub path: String,
    pub content: String,
}

/// @ai:intent Ordered path-to-document map, built once and then shared read-only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocIndex {
    documents: BTreeMap<String, Document>,
}

impl DocIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Add a document keyed by its path, replacing any previous entry
    pub fn insert(&mut self, document: Document) {
        self.documents.insert(document.path.clone(), document);
    }

    pub fn get(&self, path: &str) -> Option<&Document> {
        self.documents.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromIterator<Document> for DocIndex {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut index = DocIndex::new();
        for document in iter {
            index.insert(document);
        }
        index
    }
}
