//! Post-processing for model output.
//!
//! Some hosted models leak their reasoning into responses even when asked
//! not to. This is a pure text transform that strips the known thinking
//! markers before a turn is recorded in the transcript.

use std::sync::LazyLock;

use regex::Regex;

static THINKING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)<think>.*?</think>",
        r"(?is)<thinking>.*?</thinking>",
        r"(?is)<reason>.*?</reason>",
        r"(?is)<reasoning>.*?</reasoning>",
        r"(?is)\*\*thinking:\*\*.*?(?:\n\n|\z)",
        r"(?is)\*\*reasoning:\*\*.*?(?:\n\n|\z)",
        r"(?im)^let me think.*$",
        r"(?im)^i'll think about this.*$",
        r"(?im)^my reasoning.*$",
        r"(?im)^step by step.*$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("thinking pattern must compile"))
    .collect()
});

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline pattern must compile"));

/// Remove thinking/reasoning markers from a model response.
pub fn strip_thinking_patterns(text: &str) -> String {
    let mut cleaned = text.to_string();
    for pattern in THINKING_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    cleaned
}

/// Full clean-up pass for a completed model turn: strip thinking markers,
/// collapse runs of blank lines, and trim the edges.
pub fn clean_model_response(text: &str) -> String {
    let stripped = strip_thinking_patterns(text);
    let collapsed = EXCESS_NEWLINES.replace_all(&stripped, "\n\n");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_think_tags() {
        let input = "<think>should I?</think>Done! Created the todo.";
        assert_eq!(clean_model_response(input), "Done! Created the todo.");
    }

    #[test]
    fn test_strips_multiline_thinking_block() {
        let input = "<thinking>\nfirst...\nsecond...\n</thinking>\n\nHere is your list.";
        assert_eq!(clean_model_response(input), "Here is your list.");
    }

    #[test]
    fn test_strips_bold_thinking_section() {
        let input = "**Thinking:** maybe delete both\n\nDeleted 2 todos.";
        assert_eq!(clean_model_response(input), "Deleted 2 todos.");
    }

    #[test]
    fn test_strips_let_me_think_lines() {
        let input = "Let me think about the priorities.\nAll done.";
        assert_eq!(clean_model_response(input), "All done.");
    }

    #[test]
    fn test_collapses_excess_newlines() {
        let input = "First.\n\n\n\nSecond.";
        assert_eq!(clean_model_response(input), "First.\n\nSecond.");
    }

    #[test]
    fn test_leaves_clean_text_alone() {
        let input = "✅ **Created** a new todo: `Read a book` with **medium** priority";
        assert_eq!(clean_model_response(input), input);
    }
}
