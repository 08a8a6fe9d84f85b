//! Transclusion expansion
//!
//! Replaces `![[target]]` embeds with a blockquoted copy of the referenced note or
//! section so the model sees the linked material. Resolution is best-effort: any
//! marker that cannot be resolved is left exactly as written.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::KilnResult;
use crate::traits::{NoteLocation, NoteLookup};

static EMBED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[(.*?)\]\]").expect("embed regex"));

const LINKED_CONTENT_LABEL: &str = "> Linked content:";

/// A parsed `![[target]]` marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transclusion {
    /// The full marker as it appears in the text
    pub marker: String,
    /// Everything between `![[` and `]]`
    pub target: String,
    /// Link path (before the first `#`, alias removed)
    pub path: String,
    /// Subpath after the first `#`; empty for the whole note
    pub subpath: String,
}

impl Transclusion {
    /// Parse the inner target of a marker
    pub fn new(marker: impl Into<String>, target: impl Into<String>) -> Self {
        let marker = marker.into();
        let target = target.into();

        // `![[note#heading|alias]]` displays the alias; it is not part of the link
        let link = target.split('|').next().unwrap_or_default();
        let link = link.trim_end_matches('\\');

        let (path, subpath) = match link.split_once('#') {
            Some((path, subpath)) => (path, subpath),
            None => (link, ""),
        };

        Self {
            path: path.trim().to_string(),
            subpath: subpath.trim().to_string(),
            marker,
            target,
        }
    }

    /// All embed markers in `text`, left to right
    pub fn find_all(text: &str) -> Vec<Transclusion> {
        EMBED_REGEX
            .captures_iter(text)
            .map(|cap| Transclusion::new(&cap[0], &cap[1]))
            .collect()
    }
}

/// Expands transclusions using a [`NoteLookup`]
pub struct LinkResolver<L> {
    lookup: L,
}

impl<L: NoteLookup> LinkResolver<L> {
    /// Create a resolver over a note store
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// The underlying note store
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Raw content referenced by a transclusion, or `None` when it cannot be resolved
    pub async fn resolve(&self, link: &Transclusion) -> Option<String> {
        if link.path.is_empty() {
            return None;
        }

        let located = self.lookup.locate(&link.path, &link.subpath).await;
        linked_text(link, located)
    }

    /// Replace every resolvable marker in `text` with its quoted content
    ///
    /// Markers are processed sequentially, left to right. Content pulled in from
    /// another note is not scanned again, so nested embeds stay as written.
    pub async fn expand(&self, text: &str) -> String {
        let markers: Vec<(Range<usize>, Transclusion)> = EMBED_REGEX
            .captures_iter(text)
            .filter_map(|cap| {
                let whole = cap.get(0)?;
                Some((whole.range(), Transclusion::new(whole.as_str(), &cap[1])))
            })
            .collect();

        let targets: Vec<(&str, &str)> = markers
            .iter()
            .filter(|(_, link)| !link.path.is_empty())
            .map(|(_, link)| (link.path.as_str(), link.subpath.as_str()))
            .collect();
        let mut located = self.lookup.locate_all(&targets).await.into_iter();

        let mut expanded = String::with_capacity(text.len());
        let mut last = 0;
        let mut resolved = 0usize;

        for (range, link) in &markers {
            expanded.push_str(&text[last..range.start]);

            let content = if link.path.is_empty() {
                None
            } else {
                located.next().and_then(|result| linked_text(link, result))
            };
            match content {
                Some(content) => {
                    expanded.push_str(&render_linked_content(&content));
                    resolved += 1;
                }
                None => expanded.push_str(&link.marker),
            }
            last = range.end;
        }
        expanded.push_str(&text[last..]);

        debug!(resolved, "expanded transclusions");
        expanded
    }
}

fn linked_text(link: &Transclusion, located: KilnResult<Option<NoteLocation>>) -> Option<String> {
    let location = match located {
        Ok(Some(location)) => location,
        Ok(None) => {
            debug!(link = %link.target, "transclusion target not found");
            return None;
        }
        Err(e) => {
            warn!(link = %link.target, error = %e, "failed to read transclusion target");
            return None;
        }
    };

    let extracted = location.text();

    // An empty block or one equal to the reference itself means nothing was resolved
    if extracted.trim().is_empty() || extracted == link.target {
        return None;
    }

    Some(extracted.to_string())
}

/// Quote resolved content line by line under a "Linked content:" label
pub fn render_linked_content(content: &str) -> String {
    let quoted = content
        .trim()
        .lines()
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!("\n{LINKED_CONTENT_LABEL}\n{quoted}\n")
}
