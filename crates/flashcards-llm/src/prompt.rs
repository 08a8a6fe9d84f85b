//! Prompt construction

use std::sync::LazyLock;

use regex::Regex;

static COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->\n?").expect("comment regex"));

/// Remove `<!-- ... -->` comments, each with at most one following newline
///
/// Matching is non-greedy and spans lines, so two comments on one line do not
/// swallow the text between them.
pub fn strip_comments(text: &str) -> String {
    COMMENT_REGEX.replace_all(text, "").into_owned()
}

/// Instruction text for a flashcard request
pub fn instructions(flashcard_count: u32, separator: &str) -> String {
    let count = flashcard_count;
    let sep = separator;
    format!(
        "You're an Anki Flashcards generator. The user will provide you with a note. \
At the end of the note are some flashcards. You should think step by step and generate flashcards following these rules:
  1. First identify which are the most important concepts within the note. Focus on important concepts, latex formulas and equations.
  2. At the end of user's note (that is after #flashcards tag), you will find some existing flashcards. Read those flashcards, ignore those basicblock-start and basicblock-end flags and AVOID CREATING FLASHCARDS WITH SIMILAR CONTENTS OR QUESTIONS LIKE THEM. DO NOT REPEAT OR REPHRASE THESE EXISTING FLASHCARDS.
  3. And then generate at most {count} new original flashcards in the format \"question {sep} answer\". Strictly use {sep} to separate a question from its answer. Separate flashcards with a single newline. An example is \"What is chemical formula of water {sep} H2O\". Do not use any prefix text, start generating right away. Try to make them as atomic as possible, but still challenging and rich of information.
  4. Please typeset equations and math formulas correctly (that is using the $ symbol).
  5. You should reply always in German if the input is in German.
  6. Your output flashcards should always follow \"question {sep} answer\" format with no flags from rule 3."
    )
}

/// Instructions plus the note content they apply to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Rendered [`instructions`]
    pub instructions: String,
    /// Note text, comments already stripped
    pub content: String,
}

impl Prompt {
    /// Render instructions for `flashcard_count` and `separator` around `content`
    pub fn new(flashcard_count: u32, separator: &str, content: impl Into<String>) -> Self {
        Self {
            instructions: instructions(flashcard_count, separator),
            content: content.into(),
        }
    }

    /// Single-string form used by completion-style models
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.instructions, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment_and_one_newline() {
        assert_eq!(strip_comments("Foo<!-- note -->\nBar"), "FooBar");
        assert_eq!(strip_comments("Foo<!-- note -->\n\nBar"), "Foo\nBar");
    }

    #[test]
    fn test_strip_is_non_greedy_and_multiline() {
        assert_eq!(
            strip_comments("a <!-- x --> keep <!-- y --> b"),
            "a  keep  b"
        );
        assert_eq!(strip_comments("a<!--\nmulti\nline\n-->\nb"), "ab");
        assert_eq!(strip_comments("no comments"), "no comments");
    }

    #[test]
    fn test_instructions_interpolate_count_and_separator() {
        let text = instructions(7, ";;");
        assert!(text.starts_with("You're an Anki Flashcards generator."));
        assert!(text.contains("generate at most 7 new original flashcards"));
        assert!(text.contains("\"question ;; answer\""));
        assert!(text.contains("Strictly use ;; to separate"));
        assert!(text.contains("\n  6. Your output flashcards"));
        assert!(!text.contains("{sep}"));
    }

    #[test]
    fn test_combined_prompt() {
        let prompt = Prompt::new(5, "::", "Note body");
        let combined = prompt.combined();
        assert!(combined.ends_with("with no flags from rule 3.\nNote body"));
    }
}
