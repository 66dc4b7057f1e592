//! Catalog records.

use std::path::PathBuf;

use serde::Serialize;

use crate::frontmatter::Document;
use crate::metadata::{AgentMetadata, Metadata, SkillMetadata, WorkflowMetadata};

/// One parsed catalog document.
///
/// Records are built once per load and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord<M> {
    /// Filename without extension; unique within its kind.
    pub slug: String,
    /// Typed header.
    pub metadata: M,
    /// Content after the header, trimmed.
    pub body: String,
    /// The document exactly as read from disk.
    pub raw_text: String,
    /// Number of `\n`-separated segments in `raw_text`.
    pub line_count: usize,
    /// Path relative to the content root.
    pub source_path: PathBuf,
}

/// A loaded agent.
pub type AgentRecord = CatalogRecord<AgentMetadata>;
/// A loaded skill.
pub type SkillRecord = CatalogRecord<SkillMetadata>;
/// A loaded workflow.
pub type WorkflowRecord = CatalogRecord<WorkflowMetadata>;

impl<M: Metadata> CatalogRecord<M> {
    /// Assemble a record from a document that already passed validation.
    pub(crate) fn new(
        slug: String,
        metadata: M,
        document: Document,
        raw_text: String,
        source_path: PathBuf,
    ) -> Self {
        let line_count = line_count(&raw_text);
        Self {
            slug,
            metadata,
            body: document.body,
            raw_text,
            line_count,
            source_path,
        }
    }

    /// Shorthand for `self.metadata.name()`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata.name()
    }
}

/// Count of `\n`-separated segments; an empty string is one segment.
#[must_use]
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse_document;

    #[test]
    fn counts_segments_not_lines() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("one"), 1);
        assert_eq!(line_count("one\ntwo"), 2);
        assert_eq!(line_count("one\ntwo\n"), 3);
        assert_eq!(line_count("a\r\nb"), 2);
    }

    #[test]
    fn new_keeps_raw_text_and_counts_lines() {
        let raw = "---\nname: n\ndescription: d\n---\n\nBody\n".to_string();
        let doc = parse_document(&raw).unwrap();
        let meta = SkillMetadata::from_document(&doc).unwrap();
        let record = CatalogRecord::new(
            "n".to_string(),
            meta,
            doc,
            raw.clone(),
            PathBuf::from("skills/n.md"),
        );

        assert_eq!(record.raw_text, raw);
        assert_eq!(record.body, "Body");
        assert_eq!(record.line_count, 7);
        assert_eq!(record.name(), "n");
    }

    #[test]
    fn serializes_camel_case() {
        let raw = "---\nname: n\ndescription: d\n---\n".to_string();
        let doc = parse_document(&raw).unwrap();
        let meta = AgentMetadata::from_document(&doc).unwrap();
        let record = CatalogRecord::new(
            "n".to_string(),
            meta,
            doc,
            raw,
            PathBuf::from("agents/n.md"),
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["slug"], "n");
        assert_eq!(json["lineCount"], 5);
        assert_eq!(json["sourcePath"], "agents/n.md");
        assert_eq!(json["metadata"]["model"], "ai");
    }
}
