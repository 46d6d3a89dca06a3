// ABOUTME: Text flattening and normalization helpers shared by the extractors.
// ABOUTME: Produces whitespace-normalized visible text from a parsed document.

use scraper::{ElementRef, Html};

/// Collapses runs of whitespace into single spaces and trims the result.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Inner text of an element, whitespace-normalized.
pub fn element_text(el: ElementRef<'_>) -> String {
    normalize_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

/// Flattens a document into visible text for pattern matching.
///
/// Script, style, and noscript subtrees are skipped so that embedded JSON or
/// CSS cannot masquerade as page text; everything else is joined with spaces
/// and whitespace-normalized.
pub fn flatten_text(doc: &Html) -> String {
    let mut parts = Vec::new();
    collect_text(doc.root_element(), &mut parts);
    normalize_whitespace(&parts.join(" "))
}

fn collect_text(el: ElementRef<'_>, parts: &mut Vec<String>) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            if name == "script" || name == "style" || name == "noscript" {
                continue;
            }
            collect_text(child_el, parts);
        }
    }
}

/// Truncates `s` to at most `max` characters on a char boundary, appending
/// `...` when anything was cut.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str("...");
    out
}
