//! Text utilities: whitespace cleanup, counting, case transforms.
//!
//! These are total functions over any string; there is nothing to validate.

use serde::{Deserialize, Serialize};

/// Trim the ends and collapse every interior whitespace run (spaces, tabs,
/// newlines) to a single space.
#[must_use]
pub fn cleanup(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Character/word/sentence/line tallies for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCounts {
    /// Unicode scalar values, whitespace included.
    pub chars: usize,
    /// Whitespace-separated words.
    pub words: usize,
    /// Runs terminated by `.`, `!` or `?`.
    pub sentences: usize,
    /// Lines, as split by `\n`. Empty input has zero lines.
    pub lines: usize,
}

/// Count characters, words, sentences, and lines.
#[must_use]
pub fn counts(input: &str) -> TextCounts {
    let sentences = input
        .split(['.', '!', '?'])
        .filter(|chunk| chunk.chars().any(|c| c.is_alphanumeric()))
        .count();
    TextCounts {
        chars: input.chars().count(),
        words: input.split_whitespace().count(),
        sentences,
        lines: if input.is_empty() {
            0
        } else {
            input.lines().count()
        },
    }
}

/// Case transform selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStyle {
    Upper,
    Lower,
    /// First letter of every word uppercased, the rest lowercased.
    Title,
}

/// Apply a case transform.
#[must_use]
pub fn transform_case(input: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Upper => input.to_uppercase(),
        CaseStyle::Lower => input.to_lowercase(),
        CaseStyle::Title => input
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}
