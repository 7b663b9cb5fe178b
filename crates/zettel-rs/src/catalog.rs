//! Closed option sets offered by the form.
//!
//! Every selectable field draws from one of the [`OptionSet`]s below. The
//! sets are static; the form is expected to restrict user input to them, and
//! [`OptionSet::resolve`] is the helper a front-end uses to do so. The
//! library itself stores selections verbatim and never rejects an
//! out-of-domain value.
//!
//! The target length is the one field with a strong type: [`WordCount`] can
//! only hold one of [`WORD_COUNTS`].

use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, closed set of string options with a designated default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSet {
    /// Form label, e.g. `"Denkhorizont (Gedanklicher Rahmen)"`.
    pub label: &'static str,
    /// Allowed values in display order.
    pub options: &'static [&'static str],
    /// Index of the default option within `options`.
    pub default_index: usize,
}

impl OptionSet {
    /// The default value of this set.
    pub fn default_value(&self) -> &'static str {
        self.options[self.default_index]
    }

    /// Whether `value` is one of the allowed options.
    pub fn contains(&self, value: &str) -> bool {
        self.options.contains(&value)
    }

    /// Resolve user input to an allowed option.
    ///
    /// Accepts the exact option text or its 1-based position in the list.
    /// Leading and trailing whitespace is ignored.
    ///
    /// ```
    /// use zettel_rs::catalog::AUSGABEFORMAT;
    ///
    /// assert_eq!(AUSGABEFORMAT.resolve("yaml"), Ok("yaml"));
    /// assert_eq!(AUSGABEFORMAT.resolve("2"), Ok("liste"));
    /// assert!(AUSGABEFORMAT.resolve("pdf").is_err());
    /// ```
    pub fn resolve(&self, input: &str) -> Result<&'static str, String> {
        let input = input.trim();
        if let Some(found) = self.options.iter().copied().find(|o| *o == input) {
            return Ok(found);
        }
        if let Ok(n) = input.parse::<usize>()
            && (1..=self.options.len()).contains(&n)
        {
            return Ok(self.options[n - 1]);
        }
        Err(format!(
            "'{input}' is not a valid {} option (expected one of: {})",
            self.label,
            self.options.join(", ")
        ))
    }
}

pub const DENKHORIZONT: OptionSet = OptionSet {
    label: "Denkhorizont (Gedanklicher Rahmen)",
    options: &[
        "Erkenntnistheoretiker:in",
        "Systemtheoretiker:in (Luhmann)",
        "Phänomenolog:in",
        "Dialektiker:in",
        "Dekonstrukteur:in",
        "Kritische Theorie",
        "Strukturalist:in",
        "Poststrukturalist:in",
        "Analytische Philosophie",
        "Kognitionswissenschaft / Predictive Processing",
        "Essayist:in",
        "Poet:in",
        "Künstler:in",
        "Analogiebauer:in",
        "Narrativ-Designer:in",
    ],
    default_index: 2,
};

pub const AUSDRUCKSMODUS: OptionSet = OptionSet {
    label: "Ausdrucksmodus (Stil)",
    options: &[
        "präzise & analytisch",
        "spekulativ & offen",
        "poetisch & bildhaft",
        "aphoristisch & verdichtet",
        "systematisch & strukturiert",
        "kritisch & dialektisch",
        "experimentell & spielerisch",
    ],
    default_index: 0,
};

pub const ZIEL: OptionSet = OptionSet {
    label: "Ziel (Art des Zettels)",
    options: &[
        "Begriff klären",
        "These entwickeln",
        "Gegenzettel erzeugen",
        "Analogie entwerfen",
        "Theorie verbinden (Brückenzettel)",
        "Map of Content (Themenlandkarte)",
        "Kreativer Essay / Notiz",
    ],
    default_index: 1,
};

pub const AUSGABEFORMAT: OptionSet = OptionSet {
    label: "Ausgabeformat",
    options: &["markdown", "liste", "tabelle", "yaml", "json"],
    default_index: 0,
};

/// Structure element vocabulary. Multi-select; see [`DEFAULT_STRUKTUR`].
pub const STRUKTUR: OptionSet = OptionSet {
    label: "Strukturelemente",
    options: &[
        "leitidee",
        "herleitung",
        "beispiele",
        "reflexion",
        "implikationen",
        "offene_fragen",
        "begriffsarbeit",
        "verweise",
    ],
    default_index: 0,
};

/// Structure elements selected when the form opens.
pub const DEFAULT_STRUKTUR: [&str; 3] = ["leitidee", "herleitung", "reflexion"];

pub const MUST_SUGGESTIONS: OptionSet = OptionSet {
    label: "Muss-Kriterien",
    options: &[
        "keine personenbezogenen Daten",
        "prägnant, keine Füllwörter",
        "Begriffe klar definiert",
        "verwendete Theorie muss erkennbar sein",
        "These klar formuliert",
        "Zettellänge maximal wie angegeben",
    ],
    default_index: 0,
};

pub const NICE_SUGGESTIONS: OptionSet = OptionSet {
    label: "Nice-to-have",
    options: &[
        "überraschendes Bild",
        "prägnanter Merksatz",
        "Verbindung zu Luhmann",
        "analoge Beispiele",
        "Querverweise zu anderen Zetteln",
        "humorvolle Formulierung",
    ],
    default_index: 0,
};

pub const EXCLUDE_SUGGESTIONS: OptionSet = OptionSet {
    label: "Ausschlüsse",
    options: &[
        "Fachjargon ohne Erklärung",
        "Quellen erfinden",
        "GPT verweist auf sich selbst",
        "unbelegte Allgemeinplätze",
        "Floskeln ohne Gehalt",
    ],
    default_index: 0,
};

/// Single-choice sets in form order, for listing.
pub const SELECTIONS: [OptionSet; 4] = [DENKHORIZONT, AUSDRUCKSMODUS, ZIEL, AUSGABEFORMAT];

// ── WordCount ──────────────────────────────────────────────────────

/// Allowed target lengths in words.
pub const WORD_COUNTS: [u32; 6] = [150, 300, 500, 700, 1000, 1500];

/// Target length of the note in words. Always one of [`WORD_COUNTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WordCount(u32);

impl WordCount {
    pub const DEFAULT: WordCount = WordCount(500);

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for WordCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for WordCount {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if WORD_COUNTS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!(
                "invalid target length {value} (expected one of {WORD_COUNTS:?})"
            ))
        }
    }
}

impl From<WordCount> for u32 {
    fn from(value: WordCount) -> Self {
        value.0
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl JsonSchema for WordCount {
    fn schema_name() -> String {
        "WordCount".to_string()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::Integer.into()),
            enum_values: Some(WORD_COUNTS.iter().map(|n| (*n).into()).collect()),
            ..Default::default()
        }
        .into()
    }
}
