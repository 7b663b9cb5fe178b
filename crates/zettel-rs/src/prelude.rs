//! Convenience re-exports for common `zettel-rs` types.
//!
//! ```ignore
//! use zettel_rs::prelude::*;
//! ```

// ── Assembly ────────────────────────────────────────────────────────
pub use crate::criteria::{Constraints, collect_criteria};
pub use crate::header::{PromptHeader, Selections, build_header};
pub use crate::render::{FinalPrompt, render_prompt};
pub use crate::session::{FormState, Phase, Session, assemble};

// ── Catalog ─────────────────────────────────────────────────────────
pub use crate::catalog::{OptionSet, WordCount};

// ── Surfaces ────────────────────────────────────────────────────────
pub use crate::check::{CheckReport, check_prompt, parse_prompt};
pub use crate::export::{Clipboard, Download, MemoryClipboard};

// ── Markers ─────────────────────────────────────────────────────────
pub use crate::{CONTENT_END, CONTENT_START, HEADER_JSON_END, HEADER_JSON_START};
