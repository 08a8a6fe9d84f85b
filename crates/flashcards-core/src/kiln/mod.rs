//! Note stores
//!
//! A kiln is a directory of markdown notes. [`FsKiln`] reads one from disk,
//! [`MemoryKiln`] keeps notes in memory for tests and embedding.
//!
//! Both resolve link paths the way the host editor does: an exact relative path
//! wins, otherwise any note whose path ends with the link (file stem match,
//! case-insensitive), preferring the shortest path.

mod fs;
mod memory;

pub use fs::FsKiln;
pub use memory::MemoryKiln;

const MARKDOWN_EXTENSION: &str = ".md";

/// Pick the note a link path refers to among store-relative `candidates`
pub fn match_link_path<'a, I>(link_path: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let link = normalize_link(link_path);
    if link.is_empty() {
        return None;
    }

    let wanted = if link.to_lowercase().ends_with(MARKDOWN_EXTENSION) {
        link.to_lowercase()
    } else {
        format!("{}{MARKDOWN_EXTENSION}", link.to_lowercase())
    };
    let suffix = format!("/{wanted}");

    let mut best: Option<&str> = None;
    for candidate in candidates {
        let lowered = candidate.to_lowercase();
        if lowered == wanted {
            return Some(candidate);
        }
        if lowered.ends_with(&suffix) {
            let better = match best {
                None => true,
                Some(current) => (candidate.len(), candidate) < (current.len(), current),
            };
            if better {
                best = Some(candidate);
            }
        }
    }

    best
}

/// Whether a store-relative path is a markdown note
pub(crate) fn is_markdown(path: &str) -> bool {
    path.to_lowercase().ends_with(MARKDOWN_EXTENSION)
}

fn normalize_link(link_path: &str) -> String {
    let link = link_path.trim().replace('\\', "/");
    let link = link.trim_start_matches("./").trim_start_matches('/');
    link.to_string()
}
