//! Extraction of source code from interactive-session transcripts.
//!
//! A transcript mixes prompted input with printed output:
//!
//! ```text
//! >>> total = 0
//! >>> for i in range(3):
//! ...     total += i
//! >>> total
//! 3
//! ```
//!
//! Each example starts at a `>>>` line and continues over `...` lines; the
//! non-blank, non-`>>>` lines after it are its expected output. Only the
//! source survives into notebooks.

use crate::util::{dedent, expand_tabs, is_blank};

const PS1: &str = ">>>";
const PS2: &str = "...";
/// Prompt plus the space that follows it.
const PROMPT_WIDTH: usize = PS1.len() + 1;

/// One prompted example from a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Source lines with prompts removed, joined by `\n`.
    pub source: String,
    /// Expected output, one `\n`-terminated line per output line.
    pub want: String,
}

/// Indentation of a `>>>` line, or `None` for any other line.
fn ps1_indent(line: &str) -> Option<usize> {
    let rest = line.trim_start_matches(' ');
    rest.starts_with(PS1).then(|| line.len() - rest.len())
}

fn is_ps2(line: &str) -> bool {
    line.trim_start_matches(' ').starts_with(PS2)
}

/// Drop the first `width` characters of a line.
fn strip_prompt(line: &str, width: usize) -> &str {
    match line.char_indices().nth(width) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

/// Find every example in a transcript, left to right.
///
/// Tabs are expanded and common indentation removed first.
pub fn parse_examples(transcript: &str) -> Vec<Example> {
    let text = dedent(&expand_tabs(transcript));
    let lines: Vec<&str> = text.lines().collect();

    let mut examples = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let Some(indent) = ps1_indent(lines[i]) else {
            i += 1;
            continue;
        };

        let start = i;
        i += 1;
        while i < lines.len() && is_ps2(lines[i]) {
            i += 1;
        }
        let source = lines[start..i]
            .iter()
            .map(|line| strip_prompt(line, indent + PROMPT_WIDTH))
            .collect::<Vec<_>>()
            .join("\n");

        let mut want = String::new();
        while i < lines.len() && !is_blank(lines[i]) && ps1_indent(lines[i]).is_none() {
            want.push_str(lines[i]);
            want.push('\n');
            i += 1;
        }

        examples.push(Example { source, want });
    }
    examples
}

/// Source code of every example in a transcript, joined by `\n`.
///
/// Expected output is discarded. Returns an empty string when the text
/// contains no prompts.
pub fn parse_doctest(transcript: &str) -> String {
    parse_examples(transcript)
        .into_iter()
        .map(|example| example.source)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_lines_are_dropped() {
        assert_eq!(parse_doctest(">>> x = 1\n>>> x\n1\n"), "x = 1\nx");
    }

    #[test]
    fn test_continuation_lines_keep_relative_indent() {
        let transcript = "\
>>> for i in range(2):
...     print(i)
0
1
";
        assert_eq!(parse_doctest(transcript), "for i in range(2):\n    print(i)");
    }

    #[test]
    fn test_examples_and_want() {
        let examples = parse_examples(">>> a\n1\n2\n\nprose\n>>> b\n");
        assert_eq!(
            examples,
            vec![
                Example {
                    source: "a".to_string(),
                    want: "1\n2\n".to_string(),
                },
                Example {
                    source: "b".to_string(),
                    want: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_common_indent_and_tabs() {
        assert_eq!(parse_doctest("    >>> a = 1\n    >>> a\n    1"), "a = 1\na");
        assert_eq!(parse_doctest("\t>>> a\n\t>>> b"), "a\nb");
    }

    #[test]
    fn test_indented_example_strips_its_own_indent() {
        assert_eq!(parse_doctest("text\n  >>> y\n  ... z"), "y\nz");
    }

    #[test]
    fn test_no_prompts() {
        assert_eq!(parse_doctest("just some text\n"), "");
        assert_eq!(parse_doctest(""), "");
    }

    #[test]
    fn test_bare_prompt_gives_empty_line() {
        assert_eq!(parse_doctest(">>>\n>>> x"), "\nx");
    }
}
