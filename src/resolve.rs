// ABOUTME: Field resolver merging strategy candidates by priority, with validation
// ABOUTME: and canonicalization of the winning value per field.

//! Merge policy.
//!
//! For every canonical field the candidates are scanned in ascending
//! strategy rank; the first one that survives resolver-side validation wins
//! outright. A candidate failing validation (fee outside the plausible
//! window, ATAR out of range, text empty after trimming) falls through to
//! the next rank. Candidates are never merged or concatenated across
//! strategies, so each resolved value is traceable to exactly one source.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::patterns::format_currency;
use crate::options::Thresholds;
use crate::record::{FieldCandidate, FieldName, FieldValue, StrategyKind};
use crate::text::truncate_chars;

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d[\d,]*(?:\.\d+)?)").unwrap());
static FLOAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)").unwrap());

/// Resolves all candidates into final field and source maps.
///
/// Every canonical field appears in the returned field map, explicit-absent
/// when no candidate survived.
pub fn resolve(
    candidates: Vec<FieldCandidate>,
    thresholds: &Thresholds,
) -> (
    BTreeMap<FieldName, FieldValue>,
    BTreeMap<FieldName, StrategyKind>,
) {
    let mut fields = BTreeMap::new();
    let mut sources = BTreeMap::new();

    for field in FieldName::ALL {
        let mut ranked: Vec<&FieldCandidate> =
            candidates.iter().filter(|c| c.field == field).collect();
        ranked.sort_by_key(|c| c.source.rank());

        let mut resolved = FieldValue::Absent;
        for candidate in ranked {
            if let Some(value) = canonicalize(field, &candidate.value, thresholds) {
                resolved = value;
                sources.insert(field, candidate.source);
                break;
            }
        }
        fields.insert(field, resolved);
    }

    (fields, sources)
}

/// Validates and normalizes one candidate value; `None` means the candidate
/// is rejected and resolution falls through to the next rank.
fn canonicalize(
    field: FieldName,
    value: &FieldValue,
    thresholds: &Thresholds,
) -> Option<FieldValue> {
    match value {
        FieldValue::Absent => None,
        FieldValue::List(items) => {
            let cleaned: Vec<String> = items
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                Some(FieldValue::List(cleaned))
            }
        }
        FieldValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            match field {
                FieldName::FeesDomestic | FieldName::FeesInternational => {
                    canonical_fee(trimmed, thresholds).map(FieldValue::Text)
                }
                FieldName::Atar => canonical_atar(trimmed, thresholds).map(FieldValue::Text),
                FieldName::Description => Some(FieldValue::Text(truncate_chars(
                    trimmed,
                    thresholds.description_max_len,
                ))),
                _ => Some(FieldValue::Text(trimmed.to_string())),
            }
        }
    }
}

/// Extracts the amount from fee text of any provenance ("$12,500 per year",
/// "32000") and reformats it; values outside the plausible window reject the
/// candidate.
fn canonical_fee(text: &str, thresholds: &Thresholds) -> Option<String> {
    let raw = AMOUNT_RE.captures(text)?.get(1)?.as_str().replace(',', "");
    let value: f64 = raw.parse().ok()?;
    if value > thresholds.fee_min && value < thresholds.fee_max {
        Some(format_currency(value))
    } else {
        None
    }
}

fn canonical_atar(text: &str, thresholds: &Thresholds) -> Option<String> {
    let value: f64 = FLOAT_RE.captures(text)?.get(1)?.as_str().parse().ok()?;
    if value >= thresholds.atar_min && value <= thresholds.atar_max {
        Some(format!("{}", value))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn thresholds() -> Thresholds {
        Thresholds::default()
    }

    #[test]
    fn test_highest_rank_wins() {
        let candidates = vec![
            FieldCandidate::text(FieldName::Name, "From Patterns", StrategyKind::PatternMatch),
            FieldCandidate::text(FieldName::Name, "From Schema", StrategyKind::StructuredData),
            FieldCandidate::text(FieldName::Name, "From Table", StrategyKind::Tabular),
        ];
        let (fields, sources) = resolve(candidates, &thresholds());
        assert_eq!(
            fields[&FieldName::Name],
            FieldValue::Text("From Schema".to_string())
        );
        assert_eq!(sources[&FieldName::Name], StrategyKind::StructuredData);
    }

    #[test]
    fn test_invalid_higher_rank_falls_through() {
        // The structured fee fails the gate; the tabular one survives.
        let candidates = vec![
            FieldCandidate::text(
                FieldName::FeesDomestic,
                "$250",
                StrategyKind::StructuredData,
            ),
            FieldCandidate::text(FieldName::FeesDomestic, "$11,000", StrategyKind::Tabular),
        ];
        let (fields, sources) = resolve(candidates, &thresholds());
        assert_eq!(
            fields[&FieldName::FeesDomestic],
            FieldValue::Text("$11,000".to_string())
        );
        assert_eq!(sources[&FieldName::FeesDomestic], StrategyKind::Tabular);
    }

    #[test]
    fn test_exhaustion_yields_explicit_absent() {
        let (fields, sources) = resolve(Vec::new(), &thresholds());
        for field in FieldName::ALL {
            assert_eq!(fields[&field], FieldValue::Absent);
            assert!(!sources.contains_key(&field));
        }
    }

    #[test]
    fn test_fee_reformatted_from_loose_text() {
        let candidates = vec![FieldCandidate::text(
            FieldName::FeesInternational,
            "AUD 38,500.00 per annum (indicative)",
            StrategyKind::Tabular,
        )];
        let (fields, _) = resolve(candidates, &thresholds());
        assert_eq!(
            fields[&FieldName::FeesInternational],
            FieldValue::Text("$38,500".to_string())
        );
    }

    #[test]
    fn test_atar_validated_and_normalized() {
        let candidates = vec![FieldCandidate::text(
            FieldName::Atar,
            "88.45",
            StrategyKind::Tabular,
        )];
        let (fields, _) = resolve(candidates, &thresholds());
        assert_eq!(fields[&FieldName::Atar], FieldValue::Text("88.45".to_string()));

        let candidates = vec![FieldCandidate::text(
            FieldName::Atar,
            "101.2",
            StrategyKind::Tabular,
        )];
        let (fields, _) = resolve(candidates, &thresholds());
        assert_eq!(fields[&FieldName::Atar], FieldValue::Absent);
    }

    #[test]
    fn test_description_truncated_with_ellipsis() {
        let long = "x".repeat(600);
        let candidates = vec![FieldCandidate::text(
            FieldName::Description,
            long,
            StrategyKind::SelectorCascade,
        )];
        let (fields, _) = resolve(candidates, &thresholds());
        let text = fields[&FieldName::Description].as_text().unwrap().to_string();
        assert_eq!(text.len(), 503);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_duration_trimmed() {
        let candidates = vec![FieldCandidate::text(
            FieldName::Duration,
            "  3 years full-time  ",
            StrategyKind::Tabular,
        )];
        let (fields, _) = resolve(candidates, &thresholds());
        assert_eq!(
            fields[&FieldName::Duration],
            FieldValue::Text("3 years full-time".to_string())
        );
    }

    #[test]
    fn test_empty_list_rejected() {
        let candidates = vec![
            FieldCandidate::list(
                FieldName::CareerOutcomes,
                vec!["  ".to_string()],
                StrategyKind::StructuredData,
            ),
            FieldCandidate::list(
                FieldName::CareerOutcomes,
                vec!["Engineer".to_string()],
                StrategyKind::SelectorCascade,
            ),
        ];
        let (fields, sources) = resolve(candidates, &thresholds());
        assert_eq!(
            fields[&FieldName::CareerOutcomes],
            FieldValue::List(vec!["Engineer".to_string()])
        );
        assert_eq!(
            sources[&FieldName::CareerOutcomes],
            StrategyKind::SelectorCascade
        );
    }
}
