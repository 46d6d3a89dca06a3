// ABOUTME: Structured-data parser for embedded JSON-LD metadata blocks.
// ABOUTME: Extracts course attributes from whitelisted schema.org types.

//! JSON-LD structured-data extraction.
//!
//! Pages that embed `script[type="application/ld+json"]` blocks describing a
//! Course or Program are the most reliable source available, so candidates
//! from this module carry the highest confidence rank. A malformed block is
//! logged and skipped; it never aborts the page.

use scraper::Html;
use serde_json::Value;
use tracing::debug;

use crate::error::ExtractError;
use crate::extractors::compiled::get_or_compile;
use crate::record::{FieldCandidate, FieldName, StrategyKind};

/// Schema.org types the parser accepts.
const TYPE_WHITELIST: [&str; 5] = [
    "Course",
    "Program",
    "EducationalOccupationalProgram",
    "CollegeOrUniversity",
    "Organization",
];

/// Extracts candidates from every JSON-LD block in the document.
///
/// Later blocks overwrite earlier ones for the same field, matching how the
/// blocks build on each other on real pages (an Organization block followed
/// by the Course block it publishes).
pub fn extract(doc: &Html) -> Vec<FieldCandidate> {
    let selector = match get_or_compile("script[type=\"application/ld+json\"]") {
        Some(s) => s,
        None => return Vec::new(),
    };

    let mut found: Vec<FieldCandidate> = Vec::new();
    for script in doc.select(&selector) {
        let raw = script.text().collect::<String>();
        match parse_block(&raw) {
            Ok(candidates) => {
                for candidate in candidates {
                    // Replace any earlier candidate for the same field.
                    found.retain(|c| c.field != candidate.field);
                    found.push(candidate);
                }
            }
            Err(err) => {
                debug!(error = %err, "skipping structured-data block");
            }
        }
    }
    found
}

/// Parses one JSON-LD block into candidates.
///
/// Accepts a single object, an array of objects, or objects nested under
/// `@graph`. Non-whitelisted types contribute nothing.
pub fn parse_block(raw: &str) -> Result<Vec<FieldCandidate>, ExtractError> {
    let value: Value = serde_json::from_str(raw).map_err(ExtractError::structured_block)?;
    let mut candidates = Vec::new();
    collect_items(&value, &mut candidates);
    Ok(candidates)
}

fn collect_items(value: &Value, out: &mut Vec<FieldCandidate>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_items(item, out);
            }
        }
        Value::Object(map) => {
            if is_whitelisted(map.get("@type")) {
                extract_item(map, out);
            }
            if let Some(graph) = map.get("@graph") {
                collect_items(graph, out);
            }
        }
        _ => {}
    }
}

fn is_whitelisted(type_value: Option<&Value>) -> bool {
    match type_value {
        Some(Value::String(s)) => TYPE_WHITELIST.iter().any(|t| t.eq_ignore_ascii_case(s)),
        Some(Value::Array(arr)) => arr.iter().any(|v| is_whitelisted(Some(v))),
        _ => false,
    }
}

fn extract_item(map: &serde_json::Map<String, Value>, out: &mut Vec<FieldCandidate>) {
    if let Some(name) = str_field(map, "name") {
        push(out, FieldName::Name, name);
    }
    if let Some(description) = str_field(map, "description") {
        push(out, FieldName::Description, description);
    }
    // Duration appears under either key depending on the schema vintage.
    if let Some(duration) = str_field(map, "timeToComplete").or_else(|| str_field(map, "duration"))
    {
        push(out, FieldName::Duration, duration);
    }
    if let Some(price) = offer_price(map.get("offers")) {
        push(out, FieldName::FeesDomestic, format!("${price}"));
    }
    if let Some(provider) = map.get("provider").and_then(provider_name) {
        push(out, FieldName::Provider, provider);
    }
    if let Some(credential) = str_field(map, "educationalCredentialAwarded") {
        push(out, FieldName::Credential, credential);
    }
    match map.get("occupationalCategory") {
        Some(Value::String(s)) if !s.trim().is_empty() => {
            out.retain(|c| c.field != FieldName::CareerOutcomes);
            out.push(FieldCandidate::text(
                FieldName::CareerOutcomes,
                s.trim(),
                StrategyKind::StructuredData,
            ));
        }
        Some(Value::Array(arr)) => {
            let items: Vec<String> = arr
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !items.is_empty() {
                out.retain(|c| c.field != FieldName::CareerOutcomes);
                out.push(FieldCandidate::list(
                    FieldName::CareerOutcomes,
                    items,
                    StrategyKind::StructuredData,
                ));
            }
        }
        _ => {}
    }
}

fn push(out: &mut Vec<FieldCandidate>, field: FieldName, value: String) {
    out.retain(|c| c.field != field);
    out.push(FieldCandidate::text(
        field,
        value,
        StrategyKind::StructuredData,
    ));
}

fn str_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    let s = map.get(key)?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Provider name from either a nested organization object or a bare string.
fn provider_name(provider: &Value) -> Option<String> {
    match provider {
        Value::Object(map) => str_field(map, "name"),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Price from an `offers` value: a single offer object or the first element
/// of an offer array. Numbers and numeric strings both occur in the wild.
fn offer_price(offers: Option<&Value>) -> Option<String> {
    let offer = match offers? {
        obj @ Value::Object(_) => obj,
        Value::Array(arr) => arr.first()?,
        _ => return None,
    };
    match offer.get("price")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
