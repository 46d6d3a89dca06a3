// ABOUTME: Label synonym table mapping human-readable table labels to canonical fields.
// ABOUTME: Used by the tabular extractor to classify label/value pairs.

//! Label synonym dictionary for the tabular extractor.
//!
//! Labels found on pages ("Course length", "Annual tuition", ...) are
//! lowercased and matched by substring against each field's synonym list.
//! Entry order matters: more specific entries come first so that
//! "International tuition" classifies as an international fee before the
//! generic tuition synonyms can claim it.

use crate::record::FieldName;

/// Read-only mapping from canonical field to lowercase label synonyms.
#[derive(Debug, Clone)]
pub struct LabelSynonymTable {
    entries: Vec<(FieldName, Vec<String>)>,
}

impl LabelSynonymTable {
    /// The built-in table covering common university course-page labels.
    pub fn builtin() -> Self {
        let entries = vec![
            (
                FieldName::FeesInternational,
                vec!["international fee", "overseas fee", "international tuition"],
            ),
            (
                FieldName::FeesDomestic,
                vec![
                    "domestic fee",
                    "csp",
                    "commonwealth supported",
                    "australian fee",
                    "fees",
                    "tuition",
                    "annual fee",
                    "course fee",
                    "cost",
                ],
            ),
            (
                FieldName::Duration,
                vec![
                    "duration",
                    "length",
                    "time to complete",
                    "study period",
                    "course length",
                ],
            ),
            (
                FieldName::Atar,
                vec!["atar", "selection rank", "guaranteed atar", "minimum atar"],
            ),
            (
                FieldName::Requirements,
                vec![
                    "entry requirement",
                    "admission requirement",
                    "prerequisite",
                    "eligibility",
                ],
            ),
            (
                FieldName::Intake,
                vec!["intake", "start date", "commencement", "start"],
            ),
            (
                FieldName::Campus,
                vec!["campus", "location", "study location"],
            ),
            (
                FieldName::StudyMode,
                vec![
                    "study mode",
                    "mode of delivery",
                    "delivery mode",
                    "attendance",
                ],
            ),
            (
                FieldName::Credential,
                vec!["qualification", "award", "credential"],
            ),
            (
                FieldName::Provider,
                vec!["university", "institution", "provider"],
            ),
        ];
        Self::from_entries(entries)
    }

    /// Builds a table from caller-supplied entries; synonyms are lowercased.
    pub fn from_entries<S: Into<String>>(entries: Vec<(FieldName, Vec<S>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(field, syns)| {
                (
                    field,
                    syns.into_iter()
                        .map(|s| s.into().to_lowercase())
                        .collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Classifies a lowercased label, returning the first field whose
    /// synonym occurs as a substring of the label.
    pub fn classify(&self, label: &str) -> Option<FieldName> {
        for (field, synonyms) in &self.entries {
            if synonyms.iter().any(|syn| label.contains(syn.as_str())) {
                return Some(*field);
            }
        }
        None
    }
}
