//! The JSON header that precedes the briefing.
//!
//! Field order in [`PromptHeader`] is the serialized key order and must not
//! change: protocol, timestamp, locale, profile, meta, struktur, compliance,
//! prio, constraints.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{AUSDRUCKSMODUS, AUSGABEFORMAT, DENKHORIZONT, WordCount, ZIEL};
use crate::criteria::Constraints;
use crate::{COMPLIANCE, LOCALE, PRIO, PROFILE, PROTOCOL};

/// The four single-choice selections plus the target length.
///
/// Serialized as the header's `meta` record. Values are stored verbatim;
/// nothing here checks them against the catalog.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct Selections {
    pub denkhorizont: String,
    pub ausdrucksmodus: String,
    pub ziel: String,
    pub ausgabe_format: String,
    pub laenge_woerter: WordCount,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            denkhorizont: DENKHORIZONT.default_value().to_string(),
            ausdrucksmodus: AUSDRUCKSMODUS.default_value().to_string(),
            ziel: ZIEL.default_value().to_string(),
            ausgabe_format: AUSGABEFORMAT.default_value().to_string(),
            laenge_woerter: WordCount::default(),
        }
    }
}

/// Structured metadata block written between the header markers.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct PromptHeader {
    pub protocol: String,
    /// UTC, ISO-8601 with microseconds and a trailing `Z`.
    pub timestamp: String,
    pub locale: String,
    pub profile: String,
    pub meta: Selections,
    pub struktur: Vec<String>,
    pub compliance: Vec<String>,
    pub prio: Vec<String>,
    pub constraints: Constraints,
}

/// Build a header stamped with the current time.
///
/// The timestamp is taken on every call, so two headers built from the same
/// inputs differ in `timestamp` alone.
pub fn build_header(
    selections: &Selections,
    structure: &[String],
    criteria: &Constraints,
) -> PromptHeader {
    build_header_at(selections, structure, criteria, Utc::now())
}

/// Build a header stamped with `now`.
pub fn build_header_at(
    selections: &Selections,
    structure: &[String],
    criteria: &Constraints,
    now: DateTime<Utc>,
) -> PromptHeader {
    let header = PromptHeader {
        protocol: PROTOCOL.to_string(),
        timestamp: format_timestamp(now),
        locale: LOCALE.to_string(),
        profile: PROFILE.to_string(),
        meta: selections.clone(),
        struktur: structure.to_vec(),
        compliance: COMPLIANCE.iter().map(|s| s.to_string()).collect(),
        prio: PRIO.iter().map(|s| s.to_string()).collect(),
        constraints: criteria.clone(),
    };
    debug!(
        timestamp = %header.timestamp,
        struktur = header.struktur.len(),
        must = header.constraints.must.len(),
        nice_to_have = header.constraints.nice_to_have.len(),
        exclude = header.constraints.exclude.len(),
        "built prompt header"
    );
    header
}

/// `2025-03-01T09:30:00.000000Z`
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    fn sample_constraints() -> Constraints {
        Constraints {
            must: vec!["These klar formuliert".into()],
            nice_to_have: vec!["prägnanter Merksatz".into()],
            exclude: vec![],
        }
    }

    #[test]
    fn constants_are_filled_in() {
        let header = build_header_at(
            &Selections::default(),
            &[],
            &Constraints::default(),
            fixed_instant(),
        );
        assert_eq!(header.protocol, "zettel.app/1.0");
        assert_eq!(header.locale, "de-DE");
        assert_eq!(header.profile, "zettel");
        assert_eq!(header.compliance, vec!["keine_personenbezogenen_daten"]);
        assert_eq!(header.prio, vec!["must", "meta", "nice_to_have"]);
    }

    #[test]
    fn timestamp_is_utc_iso8601_with_z() {
        assert_eq!(format_timestamp(fixed_instant()), "2025-03-01T09:30:00.000000Z");
        let live = build_header(&Selections::default(), &[], &Constraints::default());
        assert!(live.timestamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&live.timestamp).is_ok());
    }

    #[test]
    fn headers_differ_only_in_timestamp() {
        let struktur = vec!["leitidee".to_string(), "verweise".to_string()];
        let constraints = sample_constraints();
        let first = build_header_at(&Selections::default(), &struktur, &constraints, fixed_instant());
        let second = build_header_at(
            &Selections::default(),
            &struktur,
            &constraints,
            fixed_instant() + Duration::seconds(1),
        );
        assert_ne!(first, second);
        assert_ne!(first.timestamp, second.timestamp);

        let second = PromptHeader {
            timestamp: first.timestamp.clone(),
            ..second
        };
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_domain_selection_is_stored_verbatim() {
        let selections = Selections {
            denkhorizont: "Stoiker:in".into(),
            ..Selections::default()
        };
        let header = build_header(&selections, &[], &Constraints::default());
        assert_eq!(header.meta.denkhorizont, "Stoiker:in");
    }

    #[test]
    fn structure_order_is_preserved() {
        let struktur = vec!["verweise".to_string(), "leitidee".to_string()];
        let header = build_header(&Selections::default(), &struktur, &Constraints::default());
        assert_eq!(header.struktur, struktur);
    }

    #[test]
    fn serialized_key_order() {
        let header = build_header_at(
            &Selections::default(),
            &[],
            &sample_constraints(),
            fixed_instant(),
        );
        let json = serde_json::to_string(&header).unwrap();
        let keys = [
            "\"protocol\"",
            "\"timestamp\"",
            "\"locale\"",
            "\"profile\"",
            "\"meta\"",
            "\"struktur\"",
            "\"compliance\"",
            "\"prio\"",
            "\"constraints\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }
}
