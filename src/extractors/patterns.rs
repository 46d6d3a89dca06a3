// ABOUTME: Pattern-matching extractor operating on flattened page text.
// ABOUTME: Ordered regex lists per field plus keyword scans for study mode and campus.

//! Regex fallback extraction.
//!
//! When a page offers no structured data, no recognizable table, and no
//! selector hit, the flattened text still tends to contain the facts in
//! prose. Each field keeps an ordered pattern list from most structured
//! ("Duration: 3 years") to most generic (bare "3 years"); the first pattern
//! that matches decides the pass. A match that fails its numeric gate is
//! discarded without retrying later patterns, since unrelated numbers near
//! the keyword are the usual cause.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::options::Thresholds;
use crate::record::{FieldCandidate, FieldName, StrategyKind};
use crate::text::truncate_chars;

static DURATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:duration|length|time)[:\s]+(\d+(?:\.\d+)?[\s-]*(?:to[\s-]*\d+(?:\.\d+)?)?\s*(?:years?|months?|semesters?|weeks?)(?:\s*(?:full[- ]?time|part[- ]?time|FT|PT))?)",
        r"(?i)(\d+(?:\.\d+)?[\s-]*(?:to[\s-]*\d+(?:\.\d+)?)?\s*years?\s*(?:full[- ]?time|part[- ]?time)?)",
        r"(?i)full[- ]?time[:\s]+(\d+(?:\.\d+)?\s*(?:years?|months?|semesters?))",
        r"(?i)part[- ]?time[:\s]+(\d+(?:\.\d+)?\s*(?:years?|months?|semesters?))",
        r"(?i)(\d+[\s-]*(?:year|yr)s?\s+(?:full[- ]?time|FT))",
        r"(?i)(\d+[\s-]*(?:year|yr)s?\s+(?:part[- ]?time|PT))",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Domestic fee patterns; the final generic form carries no qualifier words,
/// so it is gated against the narrower typical-domestic window.
static FEES_DOMESTIC_PATTERNS: Lazy<Vec<(Regex, bool)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)(?:domestic|australian|local)[\s\w]*(?:fee|cost|tuition)s?[:\s]*\$?([\d,]+(?:\.\d{2})?)").unwrap(),
            false,
        ),
        (
            Regex::new(r"(?i)(?:CSP|commonwealth\s*supported)[:\s]*\$?([\d,]+)").unwrap(),
            false,
        ),
        (
            Regex::new(r"(?i)(?:annual\s*)?(?:fee|tuition)[:\s]*\$?([\d,]+)\s*(?:per\s*year|p\.?a\.?|annually)").unwrap(),
            false,
        ),
        (
            Regex::new(r"(?i)\$([\d,]+)\s*(?:per\s*year|annually|p\.?a\.?)").unwrap(),
            true,
        ),
    ]
});

static FEES_INTERNATIONAL_PATTERNS: Lazy<Vec<(Regex, bool)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)(?:international|overseas)[\s\w]*(?:fee|cost|tuition)s?[:\s]*\$?([\d,]+(?:\.\d{2})?)").unwrap(),
            false,
        ),
        (
            Regex::new(r"(?i)international[\s\w]*\$([\d,]+)\s*(?:per\s*year|p\.?a\.?)").unwrap(),
            false,
        ),
    ]
});

static ATAR_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)ATAR[:\s]+(\d{2}(?:\.\d{1,2})?)",
        r"(?i)(?:selection\s+rank|minimum\s+ATAR)[:\s]+(\d{2}(?:\.\d{1,2})?)",
        r"(?i)(\d{2}(?:\.\d{1,2})?)\s*ATAR",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static INTAKE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:intake|start|commence)s?[:\s]+(?:in\s+)?([A-Za-z]+\s+\d{4})",
        r"(?i)(?:semester\s+[12]|term\s+[1-4])[,\s]+(\d{4})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static REQUIREMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:entry requirements?|admission requirements?|prerequisites?)[:\s]+([^.]+\.)",
        r"(?i)(?:you(?:'ll)?\s+need|applicants?\s+must\s+have)[:\s]+([^.]+\.)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Study modes in canonical output order, each with its trigger keywords.
const MODE_GROUPS: [(&str, &[&str]); 5] = [
    ("On-campus", &["on-campus", "on campus", "face-to-face", "in person"]),
    ("Online", &["online", "distance", "remote"]),
    ("Flexible", &["flexible", "blended", "hybrid"]),
    ("Part-time", &["part-time", "part time"]),
    ("Full-time", &["full-time", "full time"]),
];

/// Known campus locations, scanned in list order.
const CAMPUSES: [&str; 13] = [
    "Sydney",
    "Melbourne",
    "Brisbane",
    "Perth",
    "Canberra",
    "Adelaide",
    "Gold Coast",
    "Parramatta",
    "Kensington",
    "St Lucia",
    "Gatton",
    "Clayton",
    "Parkville",
];

static MODE_SCANNER: Lazy<(AhoCorasick, Vec<usize>)> = Lazy::new(|| {
    let mut keywords = Vec::new();
    let mut group_of = Vec::new();
    for (group_idx, (_, words)) in MODE_GROUPS.iter().enumerate() {
        for word in *words {
            keywords.push(*word);
            group_of.push(group_idx);
        }
    }
    let ac = AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(&keywords)
        .expect("mode keywords");
    (ac, group_of)
});

static CAMPUS_SCANNER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(CAMPUSES)
        .expect("campus names")
});

/// Runs every pattern list against the flattened text.
pub fn extract(text: &str, thresholds: &Thresholds) -> Vec<FieldCandidate> {
    let mut candidates = Vec::new();
    let mut push = |field: FieldName, value: Option<String>| {
        if let Some(value) = value {
            candidates.push(FieldCandidate::text(field, value, StrategyKind::PatternMatch));
        }
    };

    push(FieldName::Duration, duration(text));
    push(
        FieldName::FeesDomestic,
        fee(text, &FEES_DOMESTIC_PATTERNS, thresholds),
    );
    push(
        FieldName::FeesInternational,
        fee(text, &FEES_INTERNATIONAL_PATTERNS, thresholds),
    );
    push(FieldName::Atar, atar(text, thresholds));
    push(FieldName::Intake, intake(text));
    push(FieldName::Requirements, requirements(text));
    push(FieldName::StudyMode, study_mode(text));
    push(FieldName::Campus, campus(text));
    candidates
}

fn duration(text: &str) -> Option<String> {
    for re in DURATION_PATTERNS.iter() {
        if let Some(caps) = re.captures(text) {
            let value = caps.get(1)?.as_str().trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// First matching pattern decides the pass; a gate failure discards the
/// candidate without trying later patterns.
fn fee(text: &str, patterns: &[(Regex, bool)], thresholds: &Thresholds) -> Option<String> {
    for (re, typical_window) in patterns {
        let Some(caps) = re.captures(text) else {
            continue;
        };
        let raw = caps.get(1)?.as_str().replace(',', "");
        let value: f64 = raw.parse().ok()?;
        let (lo, hi) = if *typical_window {
            (
                thresholds.fee_domestic_typical_min,
                thresholds.fee_domestic_typical_max,
            )
        } else {
            (thresholds.fee_min, thresholds.fee_max)
        };
        if value > lo && value < hi {
            return Some(format_currency(value));
        }
        return None;
    }
    None
}

fn atar(text: &str, thresholds: &Thresholds) -> Option<String> {
    for re in ATAR_PATTERNS.iter() {
        let Some(caps) = re.captures(text) else {
            continue;
        };
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;
        if value >= thresholds.atar_min && value <= thresholds.atar_max {
            return Some(format!("{}", value));
        }
        return None;
    }
    None
}

/// First pattern with any match wins; up to three unique values, joined in
/// document order so repeated runs stay byte-identical.
fn intake(text: &str) -> Option<String> {
    for re in INTAKE_PATTERNS.iter() {
        let mut seen = Vec::new();
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                let value = m.as_str().trim().to_string();
                if !value.is_empty() && !seen.contains(&value) {
                    seen.push(value);
                }
            }
            if seen.len() == 3 {
                break;
            }
        }
        if !seen.is_empty() {
            return Some(seen.join(", "));
        }
    }
    None
}

fn requirements(text: &str) -> Option<String> {
    for re in REQUIREMENT_PATTERNS.iter() {
        if let Some(caps) = re.captures(text) {
            let value = caps.get(1)?.as_str().trim();
            if !value.is_empty() {
                return Some(truncate_chars(value, 200));
            }
        }
    }
    None
}

/// Keyword presence scan; matched mode groups emit in canonical order.
fn study_mode(text: &str) -> Option<String> {
    let (ac, group_of) = &*MODE_SCANNER;
    let mut hit = [false; MODE_GROUPS.len()];
    for m in ac.find_overlapping_iter(text) {
        hit[group_of[m.pattern().as_usize()]] = true;
    }
    let modes: Vec<&str> = MODE_GROUPS
        .iter()
        .enumerate()
        .filter(|(i, _)| hit[*i])
        .map(|(_, (name, _))| *name)
        .collect();
    if modes.is_empty() {
        None
    } else {
        Some(modes.join(", "))
    }
}

/// First three campus names present in the text, in list order.
fn campus(text: &str) -> Option<String> {
    let mut hit = [false; CAMPUSES.len()];
    for m in CAMPUS_SCANNER.find_overlapping_iter(text) {
        hit[m.pattern().as_usize()] = true;
    }
    let found: Vec<&str> = CAMPUSES
        .iter()
        .enumerate()
        .filter(|(i, _)| hit[*i])
        .map(|(_, name)| *name)
        .take(3)
        .collect();
    if found.is_empty() {
        None
    } else {
        Some(found.join(", "))
    }
}

/// Formats a fee as `$N,NNN`, dropping cents.
pub(crate) fn format_currency(value: f64) -> String {
    let n = value.round() as i64;
    let digits = n.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}
