// ABOUTME: The extraction pipeline entry point tying the four strategies to the resolver.
// ABOUTME: Pipeline is read-only after build and safe to share across worker threads.

//! Pipeline orchestration.
//!
//! One call to [`Pipeline::extract`] runs the four extraction strategies
//! independently over the parsed page, then merges their candidates through
//! the resolver. The pipeline holds only read-only configuration, performs
//! no I/O, and never fails: a page that cannot be parsed at all produces an
//! all-absent record flagged with `parse_failed`.

use scraper::Html;
use tracing::debug;

use crate::extractors::profiles::ProfileRegistry;
use crate::extractors::synonyms::LabelSynonymTable;
use crate::extractors::{cascade, derived, patterns, structured, tabular};
use crate::options::{PipelineBuilder, Thresholds};
use crate::page::RawPage;
use crate::record::{CourseRecord, FieldName, StrategyKind};
use crate::resolve;
use crate::text::flatten_text;

/// The multi-strategy course-page extraction pipeline.
///
/// Construction loads the selector profiles and synonym table once; after
/// that every `extract` call is a pure function of its inputs, so a single
/// instance may serve any number of threads concurrently.
#[derive(Debug)]
pub struct Pipeline {
    profiles: ProfileRegistry,
    synonyms: LabelSynonymTable,
    thresholds: Thresholds,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::builder().build()
    }
}

impl Pipeline {
    /// Starts a builder with the built-in configuration.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub(crate) fn from_parts(
        profiles: ProfileRegistry,
        synonyms: LabelSynonymTable,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            profiles,
            synonyms,
            thresholds,
        }
    }

    /// Extracts a [`CourseRecord`] from one fetched page.
    ///
    /// Never panics and never errors; see the crate docs for the failure
    /// contract.
    pub fn extract(&self, raw_html: &str, source_url: &str) -> CourseRecord {
        self.extract_page(RawPage::new(source_url, raw_html))
    }

    /// [`Pipeline::extract`] over an existing [`RawPage`].
    pub fn extract_page(&self, page: RawPage<'_>) -> CourseRecord {
        let domain = page.domain();

        if page.html.trim().is_empty() {
            debug!(url = page.url, "unparseable page, returning all-absent record");
            return CourseRecord::all_absent(page.url, &domain, true);
        }

        let doc = Html::parse_document(page.html);
        let text = flatten_text(&doc);

        let mut candidates = structured::extract(&doc);
        candidates.extend(tabular::extract(
            &doc,
            &self.synonyms,
            self.thresholds.min_value_len,
        ));
        candidates.extend(cascade::extract(
            &doc,
            &self.profiles,
            &domain,
            &self.thresholds,
        ));
        candidates.extend(patterns::extract(&text, &self.thresholds));
        candidates.extend(derived::extract(page.url));

        debug!(
            url = page.url,
            domain = %domain,
            candidates = candidates.len(),
            "resolving candidates"
        );

        let (mut fields, mut sources) = resolve::resolve(candidates, &self.thresholds);

        // The credential fallback classifies whatever name won resolution,
        // so it has to run after the merge.
        if fields[&FieldName::Credential].is_absent() {
            if let Some(name) = fields[&FieldName::Name].as_text() {
                if let Some(credential) = derived::credential_from_name(name) {
                    fields.insert(
                        FieldName::Credential,
                        crate::record::FieldValue::Text(credential),
                    );
                    sources.insert(FieldName::Credential, StrategyKind::Derived);
                }
            }
        }

        CourseRecord {
            url: page.url.to_string(),
            domain,
            fields,
            sources,
            parse_failed: false,
        }
    }
}
