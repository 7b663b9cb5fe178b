//! Command-line form for the zettel prompt builder.
//!
//! `zettel-cli` plays the role of the form: it restricts input to the
//! catalog, fills a [`FormState`](zettel_rs::session::FormState), and hands
//! the generated prompt to stdout, a file, or the clipboard.
//!
//! # Library usage
//!
//! ```ignore
//! use zettel_cli::{CommandClipboard, PromptConfig};
//! use zettel_rs::prelude::*;
//!
//! let config = PromptConfig {
//!     briefing: "Plastizität (Malabou) und Predictive Processing".into(),
//!     ..Default::default()
//! };
//! let mut session = Session::with_form(config.build_form_state()?);
//! let prompt = session.generate();
//! CommandClipboard::new("wl-copy").copy(prompt.as_str())?;
//! ```
//!
//! # Binary
//!
//! ```sh
//! zettel generate --ziel "Begriff klären" --length 300 --briefing "Resonanz (Rosa)"
//! zettel generate --preset preset.json --out . --copy
//! zettel options
//! zettel check zettel_prompt.txt
//! ```

pub mod clipboard;
pub mod config;

pub use clipboard::CommandClipboard;
pub use config::PromptConfig;
