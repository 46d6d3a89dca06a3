// ABOUTME: Main library entry point for the prospectus course-page extractor.
// ABOUTME: Re-exports the public API: Pipeline, CourseRecord, FieldName, FieldValue, configuration types.

//! Prospectus - multi-strategy extraction of course-catalog records from
//! university web pages.
//!
//! Given raw HTML and its source URL, the pipeline runs four independent
//! strategies - embedded structured data, tabular label/value pairs, CSS
//! selector cascades, and regex pattern matching over flattened text - and
//! merges their candidates per field by a fixed priority, with numeric
//! plausibility gates and canonicalization applied to the winner.
//!
//! Fetching, crawling, and export are out of scope: callers hand the
//! pipeline already-fetched content and consume the resulting
//! [`CourseRecord`].
//!
//! # Example
//!
//! ```
//! use prospectus::{FieldName, Pipeline};
//!
//! let pipeline = Pipeline::builder().build();
//! let html = r#"<html><body>
//!     <h1 class="course-title">Bachelor of Science</h1>
//!     <p>Duration: 3 years full-time. ATAR: 85.00</p>
//! </body></html>"#;
//! let record = pipeline.extract(html, "https://example.edu/bachelor-of-science");
//! assert_eq!(record.get(FieldName::Name).as_text(), Some("Bachelor of Science"));
//! ```

pub mod error;
pub mod extractors;
pub mod options;
pub mod page;
pub mod pipeline;
pub mod record;
pub mod resolve;
pub mod text;

pub use crate::error::ExtractError;
pub use crate::extractors::profiles::{ProfileRegistry, SelectorProfile};
pub use crate::extractors::synonyms::LabelSynonymTable;
pub use crate::options::{PipelineBuilder, Thresholds};
pub use crate::page::RawPage;
pub use crate::pipeline::Pipeline;
pub use crate::record::{CourseRecord, FieldCandidate, FieldName, FieldValue, StrategyKind};
