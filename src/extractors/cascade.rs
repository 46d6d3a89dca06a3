// ABOUTME: Selector cascade extractor driven by per-domain selector profiles.
// ABOUTME: Tries selectors in order and keeps the first match passing the field's plausibility filter.

//! Selector-cascade extraction.
//!
//! For each target field the page's profile supplies an ordered selector
//! list: global defaults, overridden per field by a site profile when one is
//! registered for the domain. Selectors run in listed order and the first
//! match whose text passes the field's plausibility filter wins; later
//! selectors are not evaluated. A miss is not an error, it simply yields no
//! candidate.
//!
//! Selectors starting with `meta` read the element's `content` attribute
//! instead of inner text, so og:title and meta-description fallbacks can sit
//! in the same cascade as structural selectors.

use scraper::Html;

use crate::extractors::compiled::get_or_compile;
use crate::extractors::profiles::ProfileRegistry;
use crate::options::Thresholds;
use crate::record::{FieldCandidate, FieldName, StrategyKind};
use crate::text::element_text;

/// Placeholder texts a course name must not equal (case-insensitively);
/// bare `h1` selectors on chrome-heavy pages match these.
const NAME_PLACEHOLDERS: [&str; 5] = ["menu", "navigation", "search", "home", "login"];

/// Fields the cascade attempts, in record order.
const CASCADE_FIELDS: [FieldName; 8] = [
    FieldName::Name,
    FieldName::Description,
    FieldName::Duration,
    FieldName::FeesDomestic,
    FieldName::FeesInternational,
    FieldName::Requirements,
    FieldName::Atar,
    FieldName::CareerOutcomes,
];

/// Runs the cascade for every configured field.
pub fn extract(
    doc: &Html,
    registry: &ProfileRegistry,
    domain: &str,
    thresholds: &Thresholds,
) -> Vec<FieldCandidate> {
    let mut candidates = Vec::new();
    for field in CASCADE_FIELDS {
        let Some(selectors) = registry.selectors_for(domain, field) else {
            continue;
        };
        if field == FieldName::CareerOutcomes {
            if let Some(items) = first_passing_list(doc, selectors, thresholds) {
                candidates.push(FieldCandidate::list(
                    field,
                    items,
                    StrategyKind::SelectorCascade,
                ));
            }
        } else if let Some(value) = first_passing_text(doc, selectors, field, thresholds) {
            candidates.push(FieldCandidate::text(
                field,
                value,
                StrategyKind::SelectorCascade,
            ));
        }
    }
    candidates
}

/// First selector whose first matching element passes the field filter.
fn first_passing_text(
    doc: &Html,
    selectors: &[String],
    field: FieldName,
    thresholds: &Thresholds,
) -> Option<String> {
    for css in selectors {
        let Some(selector) = get_or_compile(css) else {
            continue;
        };
        for el in doc.select(&selector) {
            let text = if css.trim_start().starts_with("meta") {
                el.value().attr("content").map(str::trim).unwrap_or("").to_string()
            } else {
                element_text(el)
            };
            if text.is_empty() {
                continue;
            }
            if passes(field, &text, thresholds) {
                return Some(text);
            }
            // One element per selector: a failing match does not cascade to
            // the next element, only to the next selector.
            break;
        }
    }
    None
}

/// Career outcomes: first selector whose matched list items survive the
/// length filter wins, capped at 10 items.
fn first_passing_list(
    doc: &Html,
    selectors: &[String],
    thresholds: &Thresholds,
) -> Option<Vec<String>> {
    for css in selectors {
        let Some(selector) = get_or_compile(css) else {
            continue;
        };
        let items: Vec<String> = doc
            .select(&selector)
            .map(element_text)
            .filter(|text| {
                let len = text.chars().count();
                len > thresholds.career_min_len && len < thresholds.career_max_len
            })
            .take(10)
            .collect();
        if !items.is_empty() {
            return Some(items);
        }
    }
    None
}

/// Field-specific plausibility filter for cascade matches.
fn passes(field: FieldName, text: &str, thresholds: &Thresholds) -> bool {
    let len = text.chars().count();
    match field {
        FieldName::Name => {
            len > thresholds.name_min_len
                && len < thresholds.name_max_len
                && !NAME_PLACEHOLDERS
                    .iter()
                    .any(|p| text.eq_ignore_ascii_case(p))
        }
        FieldName::Description => len > thresholds.description_min_len,
        FieldName::Duration => {
            let lower = text.to_lowercase();
            ["year", "month", "semester"]
                .iter()
                .any(|unit| lower.contains(unit))
        }
        FieldName::Requirements => {
            len > thresholds.requirements_min_len && len < thresholds.requirements_max_len
        }
        // Fee and ATAR text is re-validated numerically by the resolver.
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(html: &str, domain: &str) -> Vec<FieldCandidate> {
        let doc = Html::parse_document(html);
        extract(
            &doc,
            &ProfileRegistry::builtin(),
            domain,
            &Thresholds::default(),
        )
    }

    fn value_of(candidates: &[FieldCandidate], field: FieldName) -> Option<String> {
        candidates
            .iter()
            .find(|c| c.field == field)
            .and_then(|c| c.value.as_text().map(String::from))
    }

    #[test]
    fn test_first_matching_selector_wins() {
        let candidates = run(
            r#"<html><body>
                <h1 class="course-title">Bachelor of Arts</h1>
                <main><h1>Some Other Heading Here</h1></main>
            </body></html>"#,
            "example.edu",
        );
        assert_eq!(
            value_of(&candidates, FieldName::Name),
            Some("Bachelor of Arts".to_string())
        );
    }

    #[test]
    fn test_later_selector_used_when_earlier_miss() {
        // No h1.course-title etc.; only the bare h1 deep in the list matches.
        let candidates = run(
            "<html><body><h1>Master of Engineering</h1></body></html>",
            "example.edu",
        );
        assert_eq!(
            value_of(&candidates, FieldName::Name),
            Some("Master of Engineering".to_string())
        );
    }

    #[test]
    fn test_placeholder_name_is_rejected() {
        let candidates = run("<html><body><h1>Menu</h1></body></html>", "example.edu");
        assert!(value_of(&candidates, FieldName::Name).is_none());
    }

    #[test]
    fn test_name_length_bounds() {
        let candidates = run("<html><body><h1>BA</h1></body></html>", "example.edu");
        assert!(value_of(&candidates, FieldName::Name).is_none());
    }

    #[test]
    fn test_meta_selector_reads_content_attribute() {
        let long_desc = "This description of the course is comfortably longer than one hundred characters so the filter accepts it.";
        let html = format!(
            r#"<html><head><meta name="description" content="{long_desc}"></head><body></body></html>"#
        );
        let candidates = run(&html, "example.edu");
        assert_eq!(
            value_of(&candidates, FieldName::Description),
            Some(long_desc.to_string())
        );
    }

    #[test]
    fn test_short_description_is_rejected() {
        let html = r#"<html><head><meta name="description" content="Too short."></head><body></body></html>"#;
        let candidates = run(html, "example.edu");
        assert!(value_of(&candidates, FieldName::Description).is_none());
    }

    #[test]
    fn test_duration_must_mention_a_unit() {
        let candidates = run(
            r#"<html><body><div class="duration">flexible</div></body></html>"#,
            "example.edu",
        );
        assert!(value_of(&candidates, FieldName::Duration).is_none());

        let candidates = run(
            r#"<html><body><div class="duration">3 years full-time</div></body></html>"#,
            "example.edu",
        );
        assert_eq!(
            value_of(&candidates, FieldName::Duration),
            Some("3 years full-time".to_string())
        );
    }

    #[test]
    fn test_site_profile_overrides_global() {
        // .degree-title is only in the unsw profile; the page also has a
        // global-profile h1 that would match otherwise.
        let html = r#"<html><body>
            <div class="degree-title">Bachelor of Science (Honours)</div>
            <h1>Generic Page Heading</h1>
        </body></html>"#;
        let candidates = run(html, "unsw.edu.au");
        assert_eq!(
            value_of(&candidates, FieldName::Name),
            Some("Bachelor of Science (Honours)".to_string())
        );
    }

    #[test]
    fn test_requirements_entry_classed_container() {
        // Class mentions "entry" but none of the other requirement markers.
        let candidates = run(
            r#"<html><body>
                <div class="entry-score-panel">Completion of year 12 with English and mathematics.</div>
            </body></html>"#,
            "example.edu",
        );
        assert_eq!(
            value_of(&candidates, FieldName::Requirements),
            Some("Completion of year 12 with English and mathematics.".to_string())
        );
    }

    #[test]
    fn test_career_outcomes_list() {
        let candidates = run(
            r#"<html><body><ul class="career-outcomes">
                <li>Software Engineer</li>
                <li>Data Analyst</li>
                <li>ok</li>
            </ul></body></html>"#,
            "example.edu",
        );
        let careers = candidates
            .iter()
            .find(|c| c.field == FieldName::CareerOutcomes)
            .expect("careers");
        // The two-char item fails the length filter.
        assert_eq!(
            careers.value.as_list(),
            Some(&["Software Engineer".to_string(), "Data Analyst".to_string()][..])
        );
    }

    #[test]
    fn test_no_match_yields_no_candidate() {
        let candidates = run("<html><body><p>nothing here</p></body></html>", "example.edu");
        assert!(value_of(&candidates, FieldName::Name).is_none());
        assert!(candidates
            .iter()
            .all(|c| c.field != FieldName::CareerOutcomes));
    }
}
