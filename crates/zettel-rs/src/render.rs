//! Rendering the header and briefing into the final prompt text.
//!
//! The layout is fixed:
//!
//! ```text
//! [HEADER_JSON_START]
//! { ...header, 2-space indented... }
//! [HEADER_JSON_END]
//!
//! [CONTENT_START]
//! <trimmed briefing>
//! [CONTENT_END]
//! ```

use std::fmt;

use tracing::warn;

use crate::export::Download;
use crate::header::PromptHeader;
use crate::{CONTENT_END, CONTENT_START, HEADER_JSON_END, HEADER_JSON_START};

/// The rendered prompt, ready to copy or download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalPrompt(String);

impl FinalPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The download surface for this prompt (`zettel_prompt.txt`).
    pub fn download(&self) -> Download {
        Download::text(self.as_str())
    }
}

impl fmt::Display for FinalPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FinalPrompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Serialize a header the way it appears between the header markers:
/// 2-space indentation, non-ASCII characters written literally.
pub fn header_json(header: &PromptHeader) -> String {
    // PromptHeader holds only strings, integers, string lists and structs of
    // those, none of which can fail to serialize.
    serde_json::to_string_pretty(header).unwrap_or_else(|e| {
        warn!("failed to serialize prompt header: {e}");
        "{}".to_string()
    })
}

/// Render `header` and `briefing` into the final prompt.
///
/// The briefing is trimmed; an empty briefing still yields both content
/// markers around an empty line.
///
/// ```
/// use zettel_rs::criteria::Constraints;
/// use zettel_rs::header::{Selections, build_header};
/// use zettel_rs::render::render_prompt;
///
/// let header = build_header(&Selections::default(), &[], &Constraints::default());
/// let prompt = render_prompt(&header, "  Plastizität  ");
/// assert!(prompt.as_str().ends_with("[CONTENT_START]\nPlastizität\n[CONTENT_END]"));
/// ```
pub fn render_prompt(header: &PromptHeader, briefing: &str) -> FinalPrompt {
    let json = header_json(header);
    let content = briefing.trim();
    let text = format!(
        "{HEADER_JSON_START}\n{json}\n{HEADER_JSON_END}\n\n{CONTENT_START}\n{content}\n{CONTENT_END}"
    );
    FinalPrompt(text.trim().to_string())
}
