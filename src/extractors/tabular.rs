// ABOUTME: Tabular key-value extractor scanning dl lists, tables, and classed containers.
// ABOUTME: Maps discovered labels to canonical fields through the synonym table.

//! Label/value pair extraction from tabular DOM shapes.
//!
//! University pages tend to publish the key facts (duration, fees, ATAR) in
//! one of three shapes: definition lists, two-column table rows, or
//! generically-classed "key info" containers. Each discovered pair is
//! classified through the [`LabelSynonymTable`]; when several pairs land on
//! the same field the longer value text wins, on the assumption that the
//! richer rendering carries more detail.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::extractors::compiled::get_or_compile;
use crate::extractors::synonyms::LabelSynonymTable;
use crate::record::{FieldCandidate, FieldName, StrategyKind};
use crate::text::element_text;

static CONTAINER_CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)key-info|detail|fact|stat").unwrap());
static LABEL_CLASS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)label|title|key").unwrap());
static VALUE_CLASS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)value|content|data").unwrap());

/// Scans the document for label/value pairs and returns one candidate per
/// matched field.
pub fn extract(
    doc: &Html,
    synonyms: &LabelSynonymTable,
    min_value_len: usize,
) -> Vec<FieldCandidate> {
    let mut found: HashMap<FieldName, String> = HashMap::new();

    scan_definition_lists(doc, synonyms, min_value_len, &mut found);
    scan_tables(doc, synonyms, min_value_len, &mut found);
    scan_containers(doc, synonyms, min_value_len, &mut found);

    let mut candidates: Vec<FieldCandidate> = found
        .into_iter()
        .map(|(field, value)| FieldCandidate::text(field, value, StrategyKind::Tabular))
        .collect();
    candidates.sort_by_key(|c| c.field);
    candidates
}

/// `dl` elements: `dt` labels zipped with `dd` values in document order.
fn scan_definition_lists(
    doc: &Html,
    synonyms: &LabelSynonymTable,
    min_value_len: usize,
    found: &mut HashMap<FieldName, String>,
) {
    let (Some(dl_sel), Some(dt_sel), Some(dd_sel)) =
        (get_or_compile("dl"), get_or_compile("dt"), get_or_compile("dd"))
    else {
        return;
    };

    for dl in doc.select(&dl_sel) {
        let labels: Vec<_> = dl.select(&dt_sel).collect();
        let values: Vec<_> = dl.select(&dd_sel).collect();
        for (dt, dd) in labels.iter().zip(values.iter()) {
            record_pair(
                &element_text(*dt),
                &element_text(*dd),
                synonyms,
                min_value_len,
                found,
            );
        }
    }
}

/// Table rows with at least two cells: first cell is the label.
fn scan_tables(
    doc: &Html,
    synonyms: &LabelSynonymTable,
    min_value_len: usize,
    found: &mut HashMap<FieldName, String>,
) {
    let (Some(row_sel), Some(cell_sel)) = (get_or_compile("table tr"), get_or_compile("th, td"))
    else {
        return;
    };

    for row in doc.select(&row_sel) {
        let cells: Vec<_> = row.select(&cell_sel).collect();
        if cells.len() >= 2 {
            record_pair(
                &element_text(cells[0]),
                &element_text(cells[1]),
                synonyms,
                min_value_len,
                found,
            );
        }
    }
}

/// `div`/`li` containers whose class mentions key-info/detail/fact/stat,
/// pairing a label-classed child with a value-classed child.
fn scan_containers(
    doc: &Html,
    synonyms: &LabelSynonymTable,
    min_value_len: usize,
    found: &mut HashMap<FieldName, String>,
) {
    let (Some(container_sel), Some(label_sel), Some(value_sel)) = (
        get_or_compile("div, li"),
        get_or_compile("span, strong, h3, h4, dt"),
        get_or_compile("span, p, dd"),
    ) else {
        return;
    };

    for container in doc.select(&container_sel) {
        if !class_matches(container, &CONTAINER_CLASS_RE) {
            continue;
        }
        let label_el = container
            .select(&label_sel)
            .find(|el| class_matches(*el, &LABEL_CLASS_RE));
        let value_el = container
            .select(&value_sel)
            .find(|el| class_matches(*el, &VALUE_CLASS_RE));
        if let (Some(label_el), Some(value_el)) = (label_el, value_el) {
            record_pair(
                &element_text(label_el),
                &element_text(value_el),
                synonyms,
                min_value_len,
                found,
            );
        }
    }
}

fn class_matches(el: ElementRef<'_>, re: &Regex) -> bool {
    el.value()
        .attr("class")
        .map(|class| re.is_match(class))
        .unwrap_or(false)
}

/// Classifies one label/value pair and keeps the longer value per field.
fn record_pair(
    label: &str,
    value: &str,
    synonyms: &LabelSynonymTable,
    min_value_len: usize,
    found: &mut HashMap<FieldName, String>,
) {
    let value = value.trim();
    if value.chars().count() < min_value_len {
        return;
    }
    let Some(field) = synonyms.classify(&label.to_lowercase()) else {
        return;
    };
    match found.get(&field) {
        Some(existing) if existing.len() >= value.len() => {}
        _ => {
            found.insert(field, value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(html: &str) -> Vec<FieldCandidate> {
        let doc = Html::parse_document(html);
        extract(&doc, &LabelSynonymTable::builtin(), 2)
    }

    fn value_of(candidates: &[FieldCandidate], field: FieldName) -> Option<String> {
        candidates
            .iter()
            .find(|c| c.field == field)
            .and_then(|c| c.value.as_text().map(String::from))
    }

    #[test]
    fn test_definition_list_pairs() {
        let candidates = run(
            r#"<dl>
                <dt>Duration</dt><dd>3 years full-time</dd>
                <dt>ATAR</dt><dd>85.00</dd>
            </dl>"#,
        );
        assert_eq!(
            value_of(&candidates, FieldName::Duration),
            Some("3 years full-time".to_string())
        );
        assert_eq!(
            value_of(&candidates, FieldName::Atar),
            Some("85.00".to_string())
        );
        assert!(candidates.iter().all(|c| c.source == StrategyKind::Tabular));
    }

    #[test]
    fn test_table_rows() {
        let candidates = run(
            r#"<table>
                <tr><th>Annual fee</th><td>$9,500</td></tr>
                <tr><th>Campus</th><td>Kensington</td></tr>
                <tr><td>only one cell</td></tr>
            </table>"#,
        );
        assert_eq!(
            value_of(&candidates, FieldName::FeesDomestic),
            Some("$9,500".to_string())
        );
        assert_eq!(
            value_of(&candidates, FieldName::Campus),
            Some("Kensington".to_string())
        );
    }

    #[test]
    fn test_classed_container_pairs() {
        let candidates = run(
            r#"<div class="key-info-item">
                <span class="item-label">Study mode</span>
                <span class="item-value">Online</span>
            </div>"#,
        );
        assert_eq!(
            value_of(&candidates, FieldName::StudyMode),
            Some("Online".to_string())
        );
    }

    #[test]
    fn test_container_without_matching_class_is_ignored() {
        let candidates = run(
            r#"<div class="hero-banner">
                <span class="item-label">Duration</span>
                <span class="item-value">3 years</span>
            </div>"#,
        );
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_longer_value_wins_over_document_order() {
        let candidates = run(
            r#"<table>
                <tr><th>Duration</th><td>3 years full-time or 6 years part-time</td></tr>
                <tr><th>Duration</th><td>3 yrs</td></tr>
            </table>"#,
        );
        assert_eq!(
            value_of(&candidates, FieldName::Duration),
            Some("3 years full-time or 6 years part-time".to_string())
        );
    }

    #[test]
    fn test_richer_later_value_also_wins() {
        let candidates = run(
            r#"<dl>
                <dt>Duration</dt><dd>3 yrs</dd>
                <dt>Course length</dt><dd>3 years full-time, campus attendance required</dd>
            </dl>"#,
        );
        assert_eq!(
            value_of(&candidates, FieldName::Duration),
            Some("3 years full-time, campus attendance required".to_string())
        );
    }

    #[test]
    fn test_short_values_are_dropped() {
        let candidates = run("<table><tr><th>Duration</th><td>3</td></tr></table>");
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_international_fee_label_routes_correctly() {
        let candidates = run(
            r#"<table>
                <tr><th>International tuition</th><td>$45,000</td></tr>
                <tr><th>Domestic fee</th><td>$11,000</td></tr>
            </table>"#,
        );
        assert_eq!(
            value_of(&candidates, FieldName::FeesInternational),
            Some("$45,000".to_string())
        );
        assert_eq!(
            value_of(&candidates, FieldName::FeesDomestic),
            Some("$11,000".to_string())
        );
    }

    #[test]
    fn test_unknown_labels_yield_nothing() {
        let candidates = run("<dl><dt>Colour scheme</dt><dd>Blue and gold</dd></dl>");
        assert!(candidates.is_empty());
    }
}
