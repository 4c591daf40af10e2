//! Documentation search and rendering
//!
//! The docs pages are driven by a read-only map of [`DocSection`]s defined once
//! at start-up. This module provides:
//!
//! - [`search`]: ranks sections against a free-text query and produces the
//!   single [`RenderableResult`] shown in the docs pane
//! - [`render`]: turns a section body written in a small markdown subset into
//!   typed [`Block`]s for a presentation layer
//! - [`content`]: the built-in marketplace documentation
//!
//! # Body grammar
//!
//! Only these forms are recognized, one per line:
//!
//! - `# ` heading, `## ` subheading
//! - `- ` unordered and `1. ` ordered list items
//! - triple-backtick fences with an optional language tag
//! - inline `**bold**` spans inside any non-code line

pub mod content;
pub mod render;
pub mod search;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use content::{builtin_library, DEFAULT_SECTION};
pub use render::{
    classify_line, outline, render, render_result, Block, LineKind, ListStyle, OutlineEntry,
    Renderer, Span,
};
pub use search::{
    highlight, rank_sections, search, snippet, RenderableResult, ResultKind, SearchMatch,
};

/// Error type for documentation library construction
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("Invalid docs JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Duplicate section id: {0}")]
    DuplicateId(String),

    #[error("Section id cannot be empty")]
    EmptyId,
}

/// One named unit of documentation content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSection {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl DocSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Read-only, insertion-ordered map of sections keyed by id.
///
/// Iteration order is the order sections were supplied in; search uses it to
/// break relevance ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocLibrary {
    sections: Vec<DocSection>,
}

impl DocLibrary {
    /// Build a library, rejecting empty or duplicate ids.
    pub fn new(sections: Vec<DocSection>) -> Result<Self, DocsError> {
        let mut seen = HashSet::with_capacity(sections.len());

        for section in &sections {
            if section.id.trim().is_empty() {
                return Err(DocsError::EmptyId);
            }
            if !seen.insert(section.id.as_str()) {
                return Err(DocsError::DuplicateId(section.id.clone()));
            }
        }

        Ok(Self { sections })
    }

    /// Load a library from a JSON array of `{ "id", "title", "body" }` objects.
    pub fn from_json(json: &str) -> Result<Self, DocsError> {
        let sections: Vec<DocSection> = serde_json::from_str(json)?;
        Self::new(sections)
    }

    pub fn get(&self, id: &str) -> Option<&DocSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn first(&self) -> Option<&DocSection> {
        self.sections.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocSection> {
        self.sections.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<'a> IntoIterator for &'a DocLibrary {
    type Item = &'a DocSection;
    type IntoIter = std::slice::Iter<'a, DocSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_preserves_insertion_order() {
        let library = DocLibrary::new(vec![
            DocSection::new("zeta", "Zeta", ""),
            DocSection::new("alpha", "Alpha", ""),
        ])
        .unwrap();

        assert_eq!(library.ids().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(library.first().map(|s| s.id.as_str()), Some("zeta"));
    }

    #[test]
    fn test_library_rejects_duplicate_ids() {
        let result = DocLibrary::new(vec![
            DocSection::new("setup", "Setup", "a"),
            DocSection::new("setup", "Setup again", "b"),
        ]);
        assert!(matches!(result, Err(DocsError::DuplicateId(id)) if id == "setup"));
    }

    #[test]
    fn test_library_rejects_empty_id() {
        let result = DocLibrary::new(vec![DocSection::new("  ", "Blank", "")]);
        assert!(matches!(result, Err(DocsError::EmptyId)));
    }

    #[test]
    fn test_library_from_json() {
        let json = r#"[
            { "id": "intro", "title": "Introduction", "body": "Hello" },
            { "id": "faq", "title": "FAQ", "body": "- Question" }
        ]"#;
        let library = DocLibrary::from_json(json).unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.get("faq").unwrap().body, "- Question");
        assert!(library.get("missing").is_none());
    }

    #[test]
    fn test_library_from_json_duplicate() {
        let json = r#"[
            { "id": "a", "title": "A", "body": "" },
            { "id": "a", "title": "A2", "body": "" }
        ]"#;
        assert!(matches!(
            DocLibrary::from_json(json),
            Err(DocsError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_library_from_json_invalid() {
        assert!(matches!(
            DocLibrary::from_json("{ not json"),
            Err(DocsError::InvalidJson(_))
        ));
    }
}
