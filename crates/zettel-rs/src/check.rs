//! Reading a rendered prompt back and validating it.
//!
//! [`parse_prompt`] splits a prompt at its markers and deserializes the
//! header. [`check_prompt`] goes further: it validates the raw header JSON
//! against [`header_schema`], then reports catalog mismatches and layout
//! drift as warnings. Prompts edited by hand before pasting them into a GPT
//! are the main customer.

use serde_json::Value;
use tracing::debug;

use crate::catalog::{AUSDRUCKSMODUS, AUSGABEFORMAT, DENKHORIZONT, OptionSet, STRUKTUR, ZIEL};
use crate::header::PromptHeader;
use crate::render::header_json;
use crate::{
    CONTENT_END, CONTENT_START, HEADER_JSON_END, HEADER_JSON_START, LOCALE, PROFILE, PROTOCOL,
    json_schema_for,
};

/// JSON Schema of [`PromptHeader`].
pub fn header_schema() -> Value {
    json_schema_for::<PromptHeader>()
}

/// A prompt split back into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPrompt {
    pub header: PromptHeader,
    /// The header exactly as it appeared between the markers, trimmed.
    pub header_text: String,
    /// Content block, trimmed.
    pub briefing: String,
}

/// Header JSON text and briefing, located by the markers.
///
/// The end marker is only recognised at the start of a line. Pretty-printed
/// JSON escapes newlines inside strings, so a tag mentioning the marker can
/// never be mistaken for it.
fn split_markers(text: &str) -> Result<(&str, &str), String> {
    let text = text.trim();
    let rest = text
        .strip_prefix(HEADER_JSON_START)
        .ok_or_else(|| format!("prompt does not start with {HEADER_JSON_START}"))?;
    let (json, rest) = rest
        .split_once(&format!("\n{HEADER_JSON_END}"))
        .ok_or_else(|| format!("missing {HEADER_JSON_END}"))?;
    let (gap, content) = rest
        .split_once(CONTENT_START)
        .ok_or_else(|| format!("missing {CONTENT_START}"))?;
    if !gap.trim().is_empty() {
        return Err(format!(
            "unexpected text between {HEADER_JSON_END} and {CONTENT_START}"
        ));
    }
    let content = content
        .strip_suffix(CONTENT_END)
        .ok_or_else(|| format!("prompt does not end with {CONTENT_END}"))?;
    Ok((json.trim(), content.trim()))
}

/// Split a rendered prompt into its header and briefing.
pub fn parse_prompt(text: &str) -> Result<ParsedPrompt, String> {
    let (json, briefing) = split_markers(text)?;
    let header: PromptHeader =
        serde_json::from_str(json).map_err(|e| format!("invalid header JSON: {e}"))?;
    Ok(ParsedPrompt {
        header,
        header_text: json.to_string(),
        briefing: briefing.to_string(),
    })
}

/// Outcome of [`check_prompt`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Structural or schema errors. A prompt with problems is unusable.
    pub problems: Vec<String>,
    /// Values outside the catalog, drifted constants, non-canonical layout.
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Validate a rendered prompt.
pub fn check_prompt(text: &str) -> CheckReport {
    let mut report = CheckReport::default();

    let (json, _briefing) = match split_markers(text) {
        Ok(parts) => parts,
        Err(e) => {
            report.problems.push(e);
            return report;
        }
    };

    let value: Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(e) => {
            report.problems.push(format!("invalid header JSON: {e}"));
            return report;
        }
    };

    let schema = header_schema();
    match jsonschema::validator_for(&schema) {
        Ok(validator) => {
            report
                .problems
                .extend(validator.iter_errors(&value).map(|e| format!("schema: {e}")));
        }
        Err(e) => report.problems.push(format!("failed to compile header schema: {e}")),
    }
    if !report.problems.is_empty() {
        return report;
    }

    let header: PromptHeader = match serde_json::from_value(value) {
        Ok(h) => h,
        Err(e) => {
            report.problems.push(format!("invalid header: {e}"));
            return report;
        }
    };

    report.warnings.extend(header_warnings(&header));
    if header_json(&header) != json {
        report
            .warnings
            .push("header is not in canonical layout (key order or indentation)".to_string());
    }

    debug!(
        problems = report.problems.len(),
        warnings = report.warnings.len(),
        "checked prompt"
    );
    report
}

fn header_warnings(header: &PromptHeader) -> Vec<String> {
    let mut warnings = Vec::new();

    for (field, expected, actual) in [
        ("protocol", PROTOCOL, header.protocol.as_str()),
        ("locale", LOCALE, header.locale.as_str()),
        ("profile", PROFILE, header.profile.as_str()),
    ] {
        if expected != actual {
            warnings.push(format!("{field} is '{actual}', expected '{expected}'"));
        }
    }

    if !header.timestamp.ends_with('Z')
        || chrono::DateTime::parse_from_rfc3339(&header.timestamp).is_err()
    {
        warnings.push(format!(
            "timestamp '{}' is not an ISO-8601 UTC time",
            header.timestamp
        ));
    }

    let meta = &header.meta;
    for (set, value) in [
        (DENKHORIZONT, &meta.denkhorizont),
        (AUSDRUCKSMODUS, &meta.ausdrucksmodus),
        (ZIEL, &meta.ziel),
        (AUSGABEFORMAT, &meta.ausgabe_format),
    ] {
        warn_outside(&mut warnings, &set, value);
    }
    for tag in &header.struktur {
        warn_outside(&mut warnings, &STRUKTUR, tag);
    }

    warnings
}

fn warn_outside(warnings: &mut Vec<String>, set: &OptionSet, value: &str) {
    if !set.contains(value) {
        warnings.push(format!("'{value}' is not a known {} option", set.label));
    }
}
