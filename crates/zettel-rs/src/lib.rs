//! Zettelkasten prompt builder.
//!
//! `zettel-rs` turns a small set of form selections (thinking horizon, style,
//! goal, output format, target length, structure elements), three criteria
//! lists and a free-text briefing into a single text artifact: a JSON header
//! block followed by the briefing content block. The artifact is meant to be
//! pasted into a custom GPT whose system prompt knows how to read the header.
//!
//! # Getting started
//!
//! ```
//! use zettel_rs::prelude::*;
//!
//! let mut session = Session::new();
//! session.edit(|form| {
//!     form.must_text = "- These klar formulieren\n".into();
//!     form.briefing = "Begriff: Plastizität (Malabou)".into();
//! });
//!
//! let prompt = session.generate();
//! assert!(prompt.as_str().starts_with(HEADER_JSON_START));
//! assert!(prompt.as_str().ends_with(CONTENT_END));
//!
//! let clipboard = MemoryClipboard::default();
//! clipboard.copy(prompt.as_str()).unwrap();
//! ```
//!
//! # Where to find things
//!
//! - **Option sets and defaults:** [`catalog`].
//! - **Criteria lists:** [`criteria::collect_criteria`].
//! - **Header construction:** [`header::build_header`] and
//!   [`header::PromptHeader`].
//! - **Rendering:** [`render::render_prompt`] and [`render::FinalPrompt`].
//! - **Form state and the generate / reset cycle:** [`session::Session`].
//! - **Download and clipboard surfaces:** [`export`].
//! - **Reading a rendered prompt back and validating it:** [`check`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Closed option sets, defaults, [`WordCount`](catalog::WordCount) |
//! | [`criteria`] | Merging suggestion picks with free-text criteria |
//! | [`header`] | [`PromptHeader`](header::PromptHeader) and its construction |
//! | [`render`] | Marker template, [`FinalPrompt`](render::FinalPrompt) |
//! | [`session`] | [`FormState`](session::FormState), [`Session`](session::Session) |
//! | [`export`] | [`Download`](export::Download), [`Clipboard`](export::Clipboard) |
//! | [`check`] | Header JSON Schema, prompt parsing and validation |

pub mod catalog;
pub mod check;
pub mod criteria;
pub mod export;
pub mod header;
pub mod prelude;
pub mod render;
pub mod session;

use schemars::JsonSchema;

// Re-export schemars for downstream crates.
pub use schemars;

// ── Header constants ───────────────────────────────────────────────

/// Protocol identifier written into every header.
pub const PROTOCOL: &str = "zettel.app/1.0";

/// Locale written into every header.
pub const LOCALE: &str = "de-DE";

/// Profile written into every header.
pub const PROFILE: &str = "zettel";

/// Fixed compliance tags.
pub const COMPLIANCE: [&str; 1] = ["keine_personenbezogenen_daten"];

/// Fixed priority ordering of the header sections.
pub const PRIO: [&str; 3] = ["must", "meta", "nice_to_have"];

// ── Template markers ───────────────────────────────────────────────

pub const HEADER_JSON_START: &str = "[HEADER_JSON_START]";
pub const HEADER_JSON_END: &str = "[HEADER_JSON_END]";
pub const CONTENT_START: &str = "[CONTENT_START]";
pub const CONTENT_END: &str = "[CONTENT_END]";

// ── Download surface ───────────────────────────────────────────────

/// File name offered for the downloaded prompt.
pub const DOWNLOAD_FILE_NAME: &str = "zettel_prompt.txt";

/// MIME type of the downloaded prompt.
pub const DOWNLOAD_MIME: &str = "text/plain";

// ── Schema generation ──────────────────────────────────────────────

/// Generate a JSON Schema `serde_json::Value` from a type that implements
/// `schemars::JsonSchema`.
///
/// # Example
///
/// ```
/// use zettel_rs::json_schema_for;
/// use zettel_rs::header::PromptHeader;
///
/// let schema = json_schema_for::<PromptHeader>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["required"].as_array().unwrap().contains(&"constraints".into()));
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}
