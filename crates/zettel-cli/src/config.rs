//! Form configuration with the documented defaults.
//!
//! [`PromptConfig`] is what the command line fills in: defaults first, then
//! an optional JSON preset file, then individual flags. It is converted into
//! a [`FormState`] via [`build_form_state`](PromptConfig::build_form_state),
//! which is where user input is restricted to the catalog.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;
use zettel_rs::catalog::{
    AUSDRUCKSMODUS, AUSGABEFORMAT, DEFAULT_STRUKTUR, DENKHORIZONT, EXCLUDE_SUGGESTIONS,
    MUST_SUGGESTIONS, NICE_SUGGESTIONS, OptionSet, STRUKTUR, WordCount, ZIEL,
};
use zettel_rs::header::Selections;
use zettel_rs::session::FormState;

/// Settings for one generated prompt.
///
/// Every field defaults to the value the form opens with. Preset files may
/// set any subset of the fields; missing ones keep their defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PromptConfig {
    /// Default: `"Phänomenolog:in"`.
    pub denkhorizont: String,
    /// Default: `"präzise & analytisch"`.
    pub ausdrucksmodus: String,
    /// Default: `"These entwickeln"`.
    pub ziel: String,
    /// Default: `"markdown"`.
    pub ausgabe_format: String,
    /// Default: `500`.
    pub laenge_woerter: u32,
    /// Default: `["leitidee", "herleitung", "reflexion"]`.
    pub struktur: Vec<String>,
    pub must: Vec<String>,
    pub must_text: String,
    pub nice_to_have: Vec<String>,
    pub nice_text: String,
    pub exclude: Vec<String>,
    pub exclude_text: String,
    pub briefing: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        let form = FormState::default();
        Self {
            denkhorizont: form.selections.denkhorizont,
            ausdrucksmodus: form.selections.ausdrucksmodus,
            ziel: form.selections.ziel,
            ausgabe_format: form.selections.ausgabe_format,
            laenge_woerter: form.selections.laenge_woerter.get(),
            struktur: DEFAULT_STRUKTUR.iter().map(|s| s.to_string()).collect(),
            must: Vec::new(),
            must_text: String::new(),
            nice_to_have: Vec::new(),
            nice_text: String::new(),
            exclude: Vec::new(),
            exclude_text: String::new(),
            briefing: String::new(),
        }
    }
}

impl PromptConfig {
    /// Load a preset from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read preset '{}': {e}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse preset '{}': {e}", path.display()))?;
        debug!(path = %path.display(), "loaded preset");
        Ok(config)
    }

    /// Resolve every field against the catalog and build the form state.
    ///
    /// Selections and picks accept the exact option text or a 1-based index.
    /// Unknown values are rejected with the list of valid options.
    pub fn build_form_state(&self) -> Result<FormState, String> {
        let selections = Selections {
            denkhorizont: DENKHORIZONT.resolve(&self.denkhorizont)?.to_string(),
            ausdrucksmodus: AUSDRUCKSMODUS.resolve(&self.ausdrucksmodus)?.to_string(),
            ziel: ZIEL.resolve(&self.ziel)?.to_string(),
            ausgabe_format: AUSGABEFORMAT.resolve(&self.ausgabe_format)?.to_string(),
            laenge_woerter: WordCount::try_from(self.laenge_woerter)?,
        };
        Ok(FormState {
            selections,
            struktur: resolve_all(&STRUKTUR, &self.struktur)?,
            must_select: resolve_all(&MUST_SUGGESTIONS, &self.must)?,
            must_text: self.must_text.clone(),
            nice_select: resolve_all(&NICE_SUGGESTIONS, &self.nice_to_have)?,
            nice_text: self.nice_text.clone(),
            exclude_select: resolve_all(&EXCLUDE_SUGGESTIONS, &self.exclude)?,
            exclude_text: self.exclude_text.clone(),
            briefing: self.briefing.clone(),
        })
    }
}

fn resolve_all(set: &OptionSet, values: &[String]) -> Result<Vec<String>, String> {
    values
        .iter()
        .map(|v| set.resolve(v).map(str::to_string))
        .collect()
}
