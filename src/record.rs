// ABOUTME: Canonical record types for course-page extraction.
// ABOUTME: Defines FieldName, FieldValue, StrategyKind, FieldCandidate, and CourseRecord.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of canonical fields a course record may hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    Description,
    Duration,
    FeesDomestic,
    FeesInternational,
    Requirements,
    Atar,
    StudyMode,
    Intake,
    Campus,
    CareerOutcomes,
    Credential,
    Provider,
}

impl FieldName {
    /// Every canonical field, in record order.
    pub const ALL: [FieldName; 13] = [
        FieldName::Name,
        FieldName::Description,
        FieldName::Duration,
        FieldName::FeesDomestic,
        FieldName::FeesInternational,
        FieldName::Requirements,
        FieldName::Atar,
        FieldName::StudyMode,
        FieldName::Intake,
        FieldName::Campus,
        FieldName::CareerOutcomes,
        FieldName::Credential,
        FieldName::Provider,
    ];

    /// Stable snake_case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Description => "description",
            FieldName::Duration => "duration",
            FieldName::FeesDomestic => "fees_domestic",
            FieldName::FeesInternational => "fees_international",
            FieldName::Requirements => "requirements",
            FieldName::Atar => "atar",
            FieldName::StudyMode => "study_mode",
            FieldName::Intake => "intake",
            FieldName::Campus => "campus",
            FieldName::CareerOutcomes => "career_outcomes",
            FieldName::Credential => "credential",
            FieldName::Provider => "provider",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved field value.
///
/// `Absent` is an explicit sentinel: the field was checked by every strategy
/// and none produced a surviving value. Consumers must treat it as distinct
/// from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Absent,
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Text content, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// List content, if this is a `List` value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Which extraction strategy produced a candidate.
///
/// Declaration order is merge priority: lower rank wins during resolution.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    StructuredData,
    Tabular,
    SelectorCascade,
    PatternMatch,
    Derived,
}

impl StrategyKind {
    /// Ordinal confidence rank; 0 is the most trusted source.
    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

/// An unresolved, strategy-specific proposed value for one field.
///
/// Candidates live only for the duration of a single extraction call.
#[derive(Debug, Clone)]
pub struct FieldCandidate {
    pub field: FieldName,
    pub value: FieldValue,
    pub source: StrategyKind,
}

impl FieldCandidate {
    pub fn text(field: FieldName, value: impl Into<String>, source: StrategyKind) -> Self {
        Self {
            field,
            value: FieldValue::Text(value.into()),
            source,
        }
    }

    pub fn list(field: FieldName, items: Vec<String>, source: StrategyKind) -> Self {
        Self {
            field,
            value: FieldValue::List(items),
            source,
        }
    }
}

/// The canonical output of one extraction call.
///
/// Every field in [`FieldName::ALL`] is present in `fields`, either with a
/// normalized value or the explicit `Absent` sentinel. `sources` traces the
/// winning strategy for each non-absent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub url: String,
    pub domain: String,
    pub fields: BTreeMap<FieldName, FieldValue>,
    pub sources: BTreeMap<FieldName, StrategyKind>,
    /// Set when the input could not be parsed as markup at all; every field
    /// is absent in that case.
    pub parse_failed: bool,
}

impl CourseRecord {
    /// A record with every field explicitly absent.
    pub fn all_absent(url: &str, domain: &str, parse_failed: bool) -> Self {
        let fields = FieldName::ALL
            .iter()
            .map(|f| (*f, FieldValue::Absent))
            .collect();
        Self {
            url: url.to_string(),
            domain: domain.to_string(),
            fields,
            sources: BTreeMap::new(),
            parse_failed,
        }
    }

    /// Value for a canonical field. Always present by construction.
    pub fn get(&self, field: FieldName) -> &FieldValue {
        &self.fields[&field]
    }

    /// The strategy that produced the field's value, if the field is present.
    pub fn source_of(&self, field: FieldName) -> Option<StrategyKind> {
        self.sources.get(&field).copied()
    }
}
