// ABOUTME: Last-resort derived candidates: course name from the URL slug and
// ABOUTME: credential classification from the resolved course name.

//! Derived fallbacks.
//!
//! When every page-content strategy misses, two facts can still be inferred:
//! the course name from the URL's final path segment, and the credential
//! from keywords in whatever name was resolved. Both carry the lowest
//! confidence rank.

use url::Url;

use crate::record::{FieldCandidate, FieldName, StrategyKind};

/// Credential keywords checked most-specific-first, so "Graduate Diploma"
/// classifies before plain "Diploma" can claim it.
const CREDENTIAL_KEYWORDS: [(&str, &str); 9] = [
    ("bachelor", "Bachelor Degree"),
    ("master", "Master Degree"),
    ("juris doctor", "Professional Doctorate"),
    ("graduate certificate", "Graduate Certificate"),
    ("graduate diploma", "Graduate Diploma"),
    ("diploma", "Diploma"),
    ("certificate", "Certificate"),
    ("phd", "Doctorate"),
    ("doctorate", "Doctorate"),
];

/// URL-based candidates, produced up front alongside the page strategies.
pub fn extract(url: &str) -> Vec<FieldCandidate> {
    match name_from_url(url) {
        Some(name) => vec![FieldCandidate::text(
            FieldName::Name,
            name,
            StrategyKind::Derived,
        )],
        None => Vec::new(),
    }
}

/// Title-cased name from the last URL path segment longer than three
/// characters, with hyphens turned into spaces.
fn name_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|s| s.len() > 3)
        .last()?
        .to_string();
    let name = segment
        .split('-')
        .filter(|part| !part.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Classifies the credential from a resolved course name, if any keyword
/// occurs in it.
pub fn credential_from_name(name: &str) -> Option<String> {
    let lower = name.to_lowercase();
    CREDENTIAL_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, credential)| credential.to_string())
}
