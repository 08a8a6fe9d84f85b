//! Filesystem-backed kiln

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use walkdir::WalkDir;

use super::{is_markdown, match_link_path};
use crate::error::{KilnError, KilnResult};
use crate::traits::{NoteHandle, NoteLocation, NoteLookup};

/// A directory of markdown notes
///
/// The directory is walked on every lookup, or once per [`NoteLookup::locate_all`]
/// batch; nothing is cached between invocations. Hidden directories (such as
/// `.obsidian` or `.git`) are skipped.
#[derive(Debug, Clone)]
pub struct FsKiln {
    root: PathBuf,
}

impl FsKiln {
    /// Open a kiln rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> KilnResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(KilnError::InvalidRoot(root));
        }
        Ok(Self { root })
    }

    /// Kiln root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store-relative, `/`-separated paths of every note in the kiln
    pub fn note_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()))
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&self.root).ok()?;
                let relative = relative.to_string_lossy().replace('\\', "/");
                is_markdown(&relative).then_some(relative)
            })
            .collect();

        paths.sort();
        paths
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

#[async_trait]
impl NoteLookup for FsKiln {
    async fn find_note(&self, link_path: &str) -> KilnResult<Option<NoteHandle>> {
        let paths = self.note_paths();
        let found = match_link_path(link_path, paths.iter().map(String::as_str));
        debug!(link = link_path, found = ?found, "resolved link path");
        Ok(found.map(NoteHandle::new))
    }

    async fn read(&self, note: &NoteHandle) -> KilnResult<String> {
        let path = self.root.join(&note.path);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| KilnError::Io { path, source })
    }

    async fn locate_all(&self, links: &[(&str, &str)]) -> Vec<KilnResult<Option<NoteLocation>>> {
        let paths = self.note_paths();
        let mut located = Vec::with_capacity(links.len());

        for (link_path, subpath) in links {
            let found = match_link_path(link_path, paths.iter().map(String::as_str));
            debug!(link = *link_path, found = ?found, "resolved link path");
            located.push(match found {
                Some(path) => self.locate_in(NoteHandle::new(path), subpath).await,
                None => Ok(None),
            });
        }

        located
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn kiln_with(files: &[(&str, &str)]) -> (TempDir, FsKiln) {
        let dir = TempDir::new().unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(full, content).unwrap();
        }
        let kiln = FsKiln::open(dir.path()).unwrap();
        (dir, kiln)
    }

    #[test]
    fn test_open_rejects_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = FsKiln::open(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, KilnError::InvalidRoot(_)));
    }

    #[test]
    fn test_note_paths_skip_hidden_and_non_markdown() {
        let (_dir, kiln) = kiln_with(&[
            ("A.md", "a"),
            ("sub/B.md", "b"),
            ("image.png", "png"),
            (".obsidian/workspace.md", "hidden"),
        ]);
        assert_eq!(kiln.note_paths(), vec!["A.md", "sub/B.md"]);
    }

    #[tokio::test]
    async fn test_find_and_read_by_stem() {
        let (_dir, kiln) = kiln_with(&[("notes/Physics.md", "# Physics\nF = ma\n")]);

        let note = kiln.find_note("Physics").await.unwrap().unwrap();
        assert_eq!(note.path, "notes/Physics.md");
        assert_eq!(kiln.read(&note).await.unwrap(), "# Physics\nF = ma\n");
    }

    #[tokio::test]
    async fn test_locate_heading_section() {
        let content = "# Physics\n\n## Laws\nF = ma\n\n## Units\nNewton\n";
        let (_dir, kiln) = kiln_with(&[("Physics.md", content)]);

        let location = kiln.locate("Physics", "Laws").await.unwrap().unwrap();
        assert_eq!(location.span.extract(content), "## Laws\nF = ma\n\n");
    }

    #[tokio::test]
    async fn test_locate_all_keeps_input_order() {
        let (_dir, kiln) = kiln_with(&[
            ("Physics.md", "# Laws\nF = ma\n"),
            ("bio/Cell.md", "Membrane. ^wall\n"),
        ]);

        let located = kiln
            .locate_all(&[("Cell", "^wall"), ("Missing", ""), ("physics", "Laws")])
            .await;
        assert_eq!(located.len(), 3);

        let cell = located[0].as_ref().unwrap().as_ref().unwrap();
        assert_eq!(cell.note.path, "bio/Cell.md");
        assert_eq!(cell.text(), "Membrane. ^wall");
        assert_eq!(located[1].as_ref().unwrap(), &None);
        let physics = located[2].as_ref().unwrap().as_ref().unwrap();
        assert_eq!(physics.text(), "# Laws\nF = ma\n");
    }

    #[tokio::test]
    async fn test_location_keeps_content_it_was_resolved_against() {
        let (dir, kiln) = kiln_with(&[("Physics.md", "# Laws\nF = ma\n")]);

        let location = kiln.locate("Physics", "Laws").await.unwrap().unwrap();
        std::fs::write(dir.path().join("Physics.md"), "rewritten").unwrap();

        assert_eq!(location.content, "# Laws\nF = ma\n");
        assert_eq!(location.text(), "# Laws\nF = ma\n");
    }

    #[tokio::test]
    async fn test_read_missing_note_is_io_error() {
        let (_dir, kiln) = kiln_with(&[]);
        let err = kiln.read(&NoteHandle::new("Gone.md")).await.unwrap_err();
        assert!(matches!(err, KilnError::Io { .. }));
    }
}
