//! Marker conventions shared with the note format
//!
//! - `#flashcards` on its own line marks where flashcards live; everything after the
//!   last such line counts as existing flashcards
//! - `### Generated Flashcards` heads the section this tool appends
//! - flashcards are `question <sep> answer`, one per line, blank line between entries
//!
//! Both markers are inserted at most once per document.

use std::sync::LazyLock;

use regex::Regex;

/// Heading of the generated section
pub const GENERATED_HEADER: &str = "### Generated Flashcards";

/// Tag line that precedes flashcards
pub const FLASHCARDS_TAG: &str = "#flashcards";

static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^### Generated Flashcards[ \t]*\r?$").expect("header regex")
});

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#flashcards.*$").expect("tag regex"));

/// Which markers a document already carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerState {
    /// `### Generated Flashcards` is present
    pub has_header: bool,
    /// A `#flashcards` tag line is present
    pub has_tag: bool,
    /// The document ends mid-line, so an appended tag needs its own line break
    pub ends_mid_line: bool,
}

impl MarkerState {
    /// Presence tests over the full document text
    pub fn detect(text: &str) -> Self {
        Self {
            has_header: has_generated_header(text),
            has_tag: has_flashcards_tag(text),
            ends_mid_line: !text.is_empty() && !text.ends_with('\n'),
        }
    }
}

/// Whether the generated-section heading is present
pub fn has_generated_header(text: &str) -> bool {
    HEADER_REGEX.is_match(text)
}

/// Whether a `#flashcards` tag line is present
pub fn has_flashcards_tag(text: &str) -> bool {
    TAG_REGEX.is_match(text)
}

/// Text after the last `#flashcards` tag line, or `None` without a tag
pub fn existing_flashcards(text: &str) -> Option<&str> {
    let tag = TAG_REGEX.find_iter(text).last()?;
    let rest = &text[tag.end()..];
    Some(rest.strip_prefix('\n').unwrap_or(rest))
}

/// Count `question <sep> answer` lines in `text`
pub fn count_flashcards(text: &str, separator: &str) -> usize {
    if separator.is_empty() {
        return 0;
    }
    text.lines().filter(|line| line.contains(separator)).count()
}

/// Build the block appended to the document
///
/// The header and tag are emitted only when `markers` says they are missing. Each
/// non-empty generated line is trimmed; entries are separated by a blank line.
pub fn assemble_block(generated: &str, markers: MarkerState) -> String {
    let mut block = String::new();

    if !markers.has_header {
        block.push_str("\n\n");
        block.push_str(GENERATED_HEADER);
        block.push('\n');
    }

    if !markers.has_tag {
        if markers.has_header && markers.ends_mid_line {
            block.push('\n');
        }
        block.push_str(FLASHCARDS_TAG);
        block.push('\n');
    }

    block.push_str("\n\n");
    block.push_str(
        &generated
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"),
    );

    block
}
