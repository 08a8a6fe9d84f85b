//! In-memory kiln

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::match_link_path;
use crate::error::{KilnError, KilnResult};
use crate::traits::{NoteHandle, NoteLookup};

/// Notes held in memory, keyed by store-relative path
#[derive(Debug, Clone, Default)]
pub struct MemoryKiln {
    notes: BTreeMap<String, String>,
}

impl MemoryKiln {
    /// Create an empty kiln
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: add a note
    #[must_use]
    pub fn with_note(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a note
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.notes.insert(path.into(), content.into());
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the kiln has no notes
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[async_trait]
impl NoteLookup for MemoryKiln {
    async fn find_note(&self, link_path: &str) -> KilnResult<Option<NoteHandle>> {
        Ok(match_link_path(link_path, self.notes.keys().map(String::as_str)).map(NoteHandle::new))
    }

    async fn read(&self, note: &NoteHandle) -> KilnResult<String> {
        self.notes
            .get(&note.path)
            .cloned()
            .ok_or_else(|| KilnError::NoteNotFound(note.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::NoteLocation;

    #[tokio::test]
    async fn test_locate_whole_note_and_section() {
        let kiln = MemoryKiln::new().with_note("A.md", "intro\n# B\nbody of b\n# C\nbody of c\n");

        let whole = kiln.locate("A", "").await.unwrap().unwrap();
        assert_eq!(whole.span.start, 0);
        assert_eq!(whole.span.end, None);

        let section = kiln.locate("A", "B").await.unwrap().unwrap();
        assert_eq!(section.text(), "# B\nbody of b\n");
    }

    #[tokio::test]
    async fn test_locate_all_defaults_to_one_locate_per_link() {
        let kiln = MemoryKiln::new().with_note("A.md", "# B\nb\n");

        let located = kiln.locate_all(&[("A", "B"), ("A", "Nope"), ("Z", "")]).await;
        let texts: Vec<Option<&str>> = located
            .iter()
            .map(|result| result.as_ref().unwrap().as_ref().map(NoteLocation::text))
            .collect();
        assert_eq!(texts, vec![Some("# B\nb\n"), None, None]);
    }

    #[tokio::test]
    async fn test_locate_missing_note_or_heading() {
        let kiln = MemoryKiln::new().with_note("A.md", "# B\n");
        assert_eq!(kiln.locate("Z", "").await.unwrap(), None);
        assert_eq!(kiln.locate("A", "Nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_unknown_handle() {
        let kiln = MemoryKiln::new();
        assert!(kiln.is_empty());
        let err = kiln.read(&NoteHandle::new("X.md")).await.unwrap_err();
        assert!(matches!(err, KilnError::NoteNotFound(path) if path == "X.md"));
    }
}
