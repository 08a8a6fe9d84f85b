//! Structural outline of a note
//!
//! Computes section boundaries from a note's heading hierarchy so a transclusion
//! subpath can be turned into a byte span:
//!
//! - `""` is the whole note
//! - `"Heading"` runs from the heading to the next heading of the same or higher level
//! - `"Parent#Child"` looks for `Child` only inside `Parent`'s section
//! - `"^block-id"` is the paragraph ending in ` ^block-id`
//!
//! When no later boundary exists a section runs to the end of the note.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Markdown heading with its position in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1-6)
    pub level: u8,

    /// Heading text (without `#` markers)
    pub text: String,

    /// Byte offset of the first character of the heading
    pub start: usize,
}

/// Byte range of a resolved section; `end` is exclusive, `None` means end of content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive), or `None` for end of content
    pub end: Option<usize>,
}

impl SectionSpan {
    /// The span covering a whole note
    pub fn whole() -> Self {
        Self {
            start: 0,
            end: None,
        }
    }

    /// Extract the spanned text; out-of-range or non-boundary offsets yield `""`
    pub fn extract<'a>(&self, content: &'a str) -> &'a str {
        let end = self.end.unwrap_or(content.len()).min(content.len());
        content.get(self.start..end).unwrap_or("")
    }
}

/// Collect ATX and setext headings, skipping code blocks and YAML frontmatter
pub fn headings(content: &str) -> Vec<Heading> {
    let parser = Parser::new_ext(content, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut headings = Vec::new();
    let mut current: Option<Heading> = None;

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some(Heading {
                    level: level as u8,
                    text: String::new(),
                    start: range.start,
                });
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(mut heading) = current.take() {
                    heading.text = heading.text.trim().to_string();
                    headings.push(heading);
                }
            }
            _ => {}
        }
    }

    headings
}

/// Resolve a transclusion subpath (the part after the first `#`) to a span
pub fn resolve_subpath(content: &str, subpath: &str) -> Option<SectionSpan> {
    let subpath = subpath.trim();
    let subpath = subpath.strip_prefix('#').unwrap_or(subpath);

    if let Some(block_id) = subpath.strip_prefix('^') {
        return resolve_block(content, block_id.trim());
    }

    let parts: Vec<&str> = subpath
        .split('#')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        return Some(SectionSpan::whole());
    }

    resolve_heading_path(&headings(content), &parts)
}

fn resolve_heading_path(headings: &[Heading], parts: &[&str]) -> Option<SectionSpan> {
    let mut search_from = 0;
    let mut search_to = headings.len();
    let mut parent_level = 0u8;
    let mut found = None;

    for part in parts {
        let wanted = normalize_heading(part);
        let index = (search_from..search_to).find(|&i| {
            headings[i].level > parent_level && normalize_heading(&headings[i].text) == wanted
        })?;

        let level = headings[index].level;
        let boundary = (index + 1..headings.len())
            .find(|&j| headings[j].level <= level)
            .unwrap_or(headings.len());

        search_from = index + 1;
        search_to = boundary;
        parent_level = level;
        found = Some(index);
    }

    found.map(|index| SectionSpan {
        start: headings[index].start,
        end: headings.get(search_to).map(|next| next.start),
    })
}

fn resolve_block(content: &str, block_id: &str) -> Option<SectionSpan> {
    if block_id.is_empty() {
        return None;
    }

    let marker = format!("^{block_id}");
    let mut offset = 0;
    let mut paragraph_start = None;

    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches('\n').trim_end_matches('\r');

        if body.trim().is_empty() || is_atx_heading(body) {
            paragraph_start = None;
        } else {
            let start = *paragraph_start.get_or_insert(offset);
            let trimmed = body.trim_end();
            let tagged = trimmed == marker
                || trimmed
                    .strip_suffix(marker.as_str())
                    .is_some_and(|rest| rest.ends_with(char::is_whitespace));
            if tagged {
                return Some(SectionSpan {
                    start,
                    end: Some(offset + trimmed.len()),
                });
            }
        }

        offset += line.len();
    }

    None
}

/// `#`..`######` followed by a space or the end of the line
fn is_atx_heading(line: &str) -> bool {
    let line = line.trim_start();
    let hashes = line.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes)
        && line[hashes..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace)
}

/// Case-insensitive, whitespace-collapsed comparison key for heading text
fn normalize_heading(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTE: &str = "\
# Physics

Intro text.

## Kinematics

Velocity is $v = dx/dt$.

### Acceleration

$a = dv/dt$

## Dynamics

Newton's second law. ^newton

Closing paragraph
spanning two lines ^closing
";

    fn section<'a>(content: &'a str, subpath: &str) -> Option<&'a str> {
        resolve_subpath(content, subpath).map(|span| span.extract(content))
    }

    #[test]
    fn test_headings_collects_levels_and_offsets() {
        let found = headings(NOTE);
        let summary: Vec<(u8, &str)> = found.iter().map(|h| (h.level, h.text.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (1, "Physics"),
                (2, "Kinematics"),
                (3, "Acceleration"),
                (2, "Dynamics")
            ]
        );
        assert_eq!(found[0].start, 0);
        assert_eq!(&NOTE[found[1].start..found[1].start + 13], "## Kinematics");
    }

    #[test]
    fn test_headings_skip_code_blocks_and_tags() {
        let content = "# Real\n\n```\n# not a heading\n```\n\n#flashcards\nQ::A\n";
        let found = headings(content);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Real");
    }

    #[test]
    fn test_headings_ignore_frontmatter() {
        let content = "---\ntitle: Note\n---\n\n# Body\n";
        let found = headings(content);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Body");
    }

    #[test]
    fn test_setext_heading() {
        let content = "Title\n=====\n\nbody\n";
        let found = headings(content);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].level, 1);
        assert_eq!(found[0].start, 0);
    }

    #[test]
    fn test_empty_subpath_is_whole_note() {
        assert_eq!(resolve_subpath(NOTE, ""), Some(SectionSpan::whole()));
        assert_eq!(section(NOTE, ""), Some(NOTE));
    }

    #[test]
    fn test_section_ends_at_next_sibling() {
        let text = section(NOTE, "Kinematics").unwrap();
        assert!(text.starts_with("## Kinematics"));
        assert!(text.contains("### Acceleration"));
        assert!(!text.contains("## Dynamics"));
    }

    #[test]
    fn test_last_section_runs_to_end_of_content() {
        let span = resolve_subpath(NOTE, "Dynamics").unwrap();
        assert_eq!(span.end, None);
        assert!(span.extract(NOTE).ends_with("spanning two lines ^closing\n"));
    }

    #[test]
    fn test_leading_hash_and_case_are_ignored() {
        assert_eq!(section(NOTE, "#kinematics"), section(NOTE, "Kinematics"));
        assert_eq!(section(NOTE, "  ACCELERATION "), section(NOTE, "Acceleration"));
    }

    #[test]
    fn test_nested_subpath() {
        let text = section(NOTE, "Kinematics#Acceleration").unwrap();
        assert_eq!(text, "### Acceleration\n\n$a = dv/dt$\n\n");
    }

    #[test]
    fn test_nested_subpath_requires_child_inside_parent() {
        assert_eq!(resolve_subpath(NOTE, "Dynamics#Acceleration"), None);
    }

    #[test]
    fn test_unknown_heading_is_unresolved() {
        assert_eq!(resolve_subpath(NOTE, "Thermodynamics"), None);
    }

    #[test]
    fn test_block_reference() {
        assert_eq!(section(NOTE, "^newton"), Some("Newton's second law. ^newton"));
        assert_eq!(
            section(NOTE, "#^closing"),
            Some("Closing paragraph\nspanning two lines ^closing")
        );
        assert_eq!(resolve_subpath(NOTE, "^missing"), None);
        assert_eq!(resolve_subpath(NOTE, "^"), None);
    }

    #[test]
    fn test_block_directly_under_heading_excludes_heading() {
        let content = "## Function\nATP synthesis. ^atp\n";
        assert_eq!(section(content, "^atp"), Some("ATP synthesis. ^atp"));
        assert!(is_atx_heading("### Title"));
        assert!(is_atx_heading("#"));
        assert!(!is_atx_heading("#flashcards"));
        assert!(!is_atx_heading("####### seven"));
    }

    #[test]
    fn test_extract_clamps_out_of_range_spans() {
        let span = SectionSpan {
            start: 4,
            end: Some(400),
        };
        assert_eq!(span.extract("abcdefgh"), "efgh");

        let span = SectionSpan {
            start: 40,
            end: None,
        };
        assert_eq!(span.extract("abc"), "");
    }
}
