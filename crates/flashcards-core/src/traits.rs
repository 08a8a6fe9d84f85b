//! Collaborator abstractions
//!
//! The pipeline depends only on these traits: a note store that can locate
//! `path#subpath` and read raw content, and a generator that turns text into
//! flashcard lines. Implementations live in [`crate::kiln`] and `flashcards-llm`.

use async_trait::async_trait;

use crate::error::{GenerationResult, KilnResult};
use crate::outline::{resolve_subpath, SectionSpan};

/// Opaque reference to a note inside a store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteHandle {
    /// Path relative to the store root, `/`-separated
    pub path: String,
}

impl NoteHandle {
    /// Create a handle from a store-relative path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// A resolved transclusion target: which note, and which part of it
///
/// Holds the content the span was computed against, so extraction never
/// re-reads a note that may have changed in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLocation {
    /// The note the link points at
    pub note: NoteHandle,
    /// The section within that note
    pub span: SectionSpan,
    /// Note content at the time of resolution
    pub content: String,
}

impl NoteLocation {
    /// The located section
    pub fn text(&self) -> &str {
        self.span.extract(&self.content)
    }
}

/// Document-lookup collaborator
#[async_trait]
pub trait NoteLookup: Send + Sync {
    /// Find the note a link path points at, if any
    async fn find_note(&self, link_path: &str) -> KilnResult<Option<NoteHandle>>;

    /// Read a note's raw content
    async fn read(&self, note: &NoteHandle) -> KilnResult<String>;

    /// Resolve `link_path` plus subpath to a section of a note
    ///
    /// `Ok(None)` when the note or the section does not exist.
    async fn locate(&self, link_path: &str, subpath: &str) -> KilnResult<Option<NoteLocation>> {
        match self.find_note(link_path).await? {
            Some(note) => self.locate_in(note, subpath).await,
            None => Ok(None),
        }
    }

    /// Read `note` once and resolve `subpath` against that content
    async fn locate_in(&self, note: NoteHandle, subpath: &str) -> KilnResult<Option<NoteLocation>> {
        let content = self.read(&note).await?;
        Ok(resolve_subpath(&content, subpath).map(|span| NoteLocation {
            note,
            span,
            content,
        }))
    }

    /// Locate several `(link_path, subpath)` pairs; results are in input order
    async fn locate_all(&self, links: &[(&str, &str)]) -> Vec<KilnResult<Option<NoteLocation>>> {
        let mut located = Vec::with_capacity(links.len());
        for (link_path, subpath) in links {
            located.push(self.locate(link_path, subpath).await);
        }
        located
    }
}

/// Flashcard generation collaborator
#[async_trait]
pub trait FlashcardGenerator: Send + Sync {
    /// Generate newline-separated `question <sep> answer` lines for `content`
    async fn generate(&self, content: &str) -> GenerationResult<String>;
}

#[async_trait]
impl<T: NoteLookup + ?Sized> NoteLookup for Box<T> {
    async fn find_note(&self, link_path: &str) -> KilnResult<Option<NoteHandle>> {
        (**self).find_note(link_path).await
    }

    async fn read(&self, note: &NoteHandle) -> KilnResult<String> {
        (**self).read(note).await
    }

    async fn locate(&self, link_path: &str, subpath: &str) -> KilnResult<Option<NoteLocation>> {
        (**self).locate(link_path, subpath).await
    }

    async fn locate_all(&self, links: &[(&str, &str)]) -> Vec<KilnResult<Option<NoteLocation>>> {
        (**self).locate_all(links).await
    }
}

#[async_trait]
impl<T: FlashcardGenerator + ?Sized> FlashcardGenerator for Box<T> {
    async fn generate(&self, content: &str) -> GenerationResult<String> {
        (**self).generate(content).await
    }
}
