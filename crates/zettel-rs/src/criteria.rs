//! Criteria lists: suggestion picks merged with free-text entries.
//!
//! Each criteria category (must, nice-to-have, exclude) is filled from two
//! inputs: a multi-select over a fixed suggestion list and a text area with
//! one entry per line. The merged list keeps the picks first, then the
//! free-text entries, both in entry order. Nothing is deduplicated or
//! validated.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Merge suggestion picks with the cleaned lines of a free-text block.
///
/// Free text is split on line breaks, including the Unicode separators
/// (vertical tab, form feed, `\x1c`..`\x1e`, NEL, U+2028, U+2029). For each line a leading run of `-`
/// and space characters is stripped, then surrounding whitespace; lines that
/// end up empty are dropped. Picks that are not part of `suggestions` pass
/// through unchanged.
///
/// ```
/// use zettel_rs::criteria::collect_criteria;
///
/// let tags = collect_criteria(&["x", "y"], &["y"], "- eigene Anforderung\n\n");
/// assert_eq!(tags, vec!["y", "eigene Anforderung"]);
/// ```
pub fn collect_criteria<S: AsRef<str>>(
    suggestions: &[&str],
    selected: &[S],
    free_text: &str,
) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(selected.len());
    for pick in selected {
        let pick = pick.as_ref();
        if !suggestions.contains(&pick) {
            debug!(pick, "criteria pick is not a known suggestion");
        }
        tags.push(pick.to_string());
    }
    tags.extend(free_text_entries(free_text));
    tags
}

/// Characters that end a line in a free-text block.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Cleaned, non-empty lines of a free-text criteria block.
fn free_text_entries(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(LINE_BREAKS)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim_start_matches(['-', ' ']).trim().to_string())
        .filter(|entry| !entry.is_empty())
}

/// The three criteria lists as they appear under `constraints` in the header.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    pub must: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub exclude: Vec<String>,
}
