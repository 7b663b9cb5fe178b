//! Form state and the generate / reset cycle.
//!
//! A [`Session`] owns the current [`FormState`] and, after a successful
//! generate, the resulting [`FinalPrompt`]. It is an ordinary value passed
//! to whoever drives the form; there is no ambient storage.
//!
//! ```text
//! Idle ──edit──▶ Idle
//! Idle ──generate──▶ PromptReady ──edit / reset──▶ Idle
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{DEFAULT_STRUKTUR, EXCLUDE_SUGGESTIONS, MUST_SUGGESTIONS, NICE_SUGGESTIONS};
use crate::criteria::{Constraints, collect_criteria};
use crate::header::{Selections, build_header};
use crate::render::{FinalPrompt, render_prompt};

/// Every editable field of the form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub selections: Selections,
    pub struktur: Vec<String>,
    pub must_select: Vec<String>,
    pub must_text: String,
    pub nice_select: Vec<String>,
    pub nice_text: String,
    pub exclude_select: Vec<String>,
    pub exclude_text: String,
    pub briefing: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            selections: Selections::default(),
            struktur: DEFAULT_STRUKTUR.iter().map(|s| s.to_string()).collect(),
            must_select: Vec::new(),
            must_text: String::new(),
            nice_select: Vec::new(),
            nice_text: String::new(),
            exclude_select: Vec::new(),
            exclude_text: String::new(),
            briefing: String::new(),
        }
    }
}

impl FormState {
    /// Merge the three criteria categories.
    pub fn constraints(&self) -> Constraints {
        Constraints {
            must: collect_criteria(MUST_SUGGESTIONS.options, &self.must_select, &self.must_text),
            nice_to_have: collect_criteria(
                NICE_SUGGESTIONS.options,
                &self.nice_select,
                &self.nice_text,
            ),
            exclude: collect_criteria(
                EXCLUDE_SUGGESTIONS.options,
                &self.exclude_select,
                &self.exclude_text,
            ),
        }
    }
}

/// Collect criteria, build the header and render the prompt for `form`.
pub fn assemble(form: &FormState) -> FinalPrompt {
    let header = build_header(&form.selections, &form.struktur, &form.constraints());
    render_prompt(&header, &form.briefing)
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PromptReady,
}

/// Current form values plus the last generated prompt.
#[derive(Debug, Clone, Default)]
pub struct Session {
    form: FormState,
    prompt: Option<FinalPrompt>,
}

impl Session {
    /// A session with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session starting from `form`.
    pub fn with_form(form: FormState) -> Self {
        Self { form, prompt: None }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn phase(&self) -> Phase {
        if self.prompt.is_some() {
            Phase::PromptReady
        } else {
            Phase::Idle
        }
    }

    /// The last generated prompt, if the session is in
    /// [`Phase::PromptReady`].
    pub fn prompt(&self) -> Option<&FinalPrompt> {
        self.prompt.as_ref()
    }

    /// Change form fields. Discards any generated prompt.
    pub fn edit(&mut self, f: impl FnOnce(&mut FormState)) {
        f(&mut self.form);
        if self.prompt.take().is_some() {
            debug!("form edited, discarding generated prompt");
        }
    }

    /// Assemble a prompt from the current form and hold on to it.
    pub fn generate(&mut self) -> &FinalPrompt {
        let prompt = assemble(&self.form);
        info!(chars = prompt.as_str().chars().count(), "generated prompt");
        self.prompt.insert(prompt)
    }

    /// Restore every field to its default and drop the generated prompt.
    pub fn reset(&mut self) {
        self.form = FormState::default();
        self.prompt = None;
        debug!("session reset to defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WordCount;
    use crate::{CONTENT_END, CONTENT_START, HEADER_JSON_START};

    fn edited_session() -> Session {
        let mut session = Session::new();
        session.edit(|form| {
            form.selections.ziel = "Begriff klären".into();
            form.selections.laenge_woerter = WordCount::try_from(150).unwrap();
            form.struktur = vec!["verweise".into()];
            form.must_select = vec!["Begriffe klar definiert".into()];
            form.nice_text = "- Bezug zu Malabou".into();
            form.exclude_select = vec!["Quellen erfinden".into()];
            form.briefing = "Plastizität".into();
        });
        session
    }

    #[test]
    fn starts_idle_with_defaults() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.prompt().is_none());
        assert_eq!(session.form().struktur, vec!["leitidee", "herleitung", "reflexion"]);
        assert_eq!(session.form().selections.denkhorizont, "Phänomenolog:in");
        assert_eq!(session.form().selections.ziel, "These entwickeln");
    }

    #[test]
    fn generate_moves_to_prompt_ready() {
        let mut session = edited_session();
        let text = session.generate().as_str().to_string();
        assert_eq!(session.phase(), Phase::PromptReady);
        assert!(text.starts_with(HEADER_JSON_START));
        assert!(text.contains("\"Begriffe klar definiert\""));
        assert!(text.contains("\"Bezug zu Malabou\""));
        assert!(text.contains("\"Quellen erfinden\""));
        assert!(text.contains("\"laenge_woerter\": 150"));
        assert!(text.ends_with("Plastizität\n[CONTENT_END]"));
    }

    #[test]
    fn edit_after_generate_returns_to_idle() {
        let mut session = edited_session();
        session.generate();
        session.edit(|form| form.briefing = "anderes Thema".into());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.prompt().is_none());
        assert_eq!(session.form().briefing, "anderes Thema");
    }

    #[test]
    fn reset_restores_defaults_and_drops_prompt() {
        let mut session = edited_session();
        session.generate();
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.form(), &FormState::default());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut session = edited_session();
        session.generate();
        session.reset();
        let once = session.form().clone();
        session.reset();
        assert_eq!(session.form(), &once);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn defaults_with_empty_briefing_keep_content_markers() {
        let prompt = assemble(&FormState::default());
        let text = prompt.as_str();
        assert!(text.ends_with(&format!("{CONTENT_START}\n\n{CONTENT_END}")));
    }

    #[test]
    fn constraints_merge_picks_and_text() {
        let form = FormState {
            must_select: vec!["These klar formuliert".into()],
            must_text: "- eigene\n".into(),
            ..FormState::default()
        };
        let constraints = form.constraints();
        assert_eq!(constraints.must, vec!["These klar formuliert", "eigene"]);
        assert!(constraints.nice_to_have.is_empty());
        assert!(constraints.exclude.is_empty());
    }
}
