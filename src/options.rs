// ABOUTME: Configuration for the extraction pipeline: plausibility thresholds and the builder.
// ABOUTME: PipelineBuilder provides a fluent API for constructing Pipeline instances.

use crate::extractors::profiles::ProfileRegistry;
use crate::extractors::synonyms::LabelSynonymTable;
use crate::pipeline::Pipeline;

/// Numeric plausibility gates and length bounds used by the extractors and
/// the resolver.
///
/// The defaults are tuned to Australian fees and ATAR conventions; they are
/// configuration, not logic, so other locales can supply their own.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// A fee must fall strictly inside (fee_min, fee_max) to be plausible.
    pub fee_min: f64,
    pub fee_max: f64,
    /// Narrower window applied to the generic "$N per year" fallback, which
    /// has no domestic/international qualifier nearby.
    pub fee_domestic_typical_min: f64,
    pub fee_domestic_typical_max: f64,
    /// Admission rank must fall inside [atar_min, atar_max] inclusive.
    pub atar_min: f64,
    pub atar_max: f64,
    /// Course name length must fall strictly inside (name_min_len, name_max_len).
    pub name_min_len: usize,
    pub name_max_len: usize,
    /// Minimum description length accepted from a selector match.
    pub description_min_len: usize,
    /// Descriptions are truncated to this many characters on output.
    pub description_max_len: usize,
    pub requirements_min_len: usize,
    pub requirements_max_len: usize,
    pub career_min_len: usize,
    pub career_max_len: usize,
    /// Minimum length for a tabular value text to count at all.
    pub min_value_len: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            fee_min: 1000.0,
            fee_max: 200_000.0,
            fee_domestic_typical_min: 5000.0,
            fee_domestic_typical_max: 50_000.0,
            atar_min: 50.0,
            atar_max: 99.95,
            name_min_len: 5,
            name_max_len: 200,
            description_min_len: 100,
            description_max_len: 500,
            requirements_min_len: 20,
            requirements_max_len: 500,
            career_min_len: 5,
            career_max_len: 100,
            min_value_len: 2,
        }
    }
}

/// Builder for [`Pipeline`] instances.
///
/// All parts default to the built-in configuration: the embedded selector
/// profiles, the built-in label synonym table, and [`Thresholds::default`].
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    profiles: Option<ProfileRegistry>,
    synonyms: Option<LabelSynonymTable>,
    thresholds: Option<Thresholds>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selector-profile registry.
    pub fn profiles(mut self, profiles: ProfileRegistry) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Replaces the label synonym table.
    pub fn synonyms(mut self, synonyms: LabelSynonymTable) -> Self {
        self.synonyms = Some(synonyms);
        self
    }

    /// Replaces the plausibility thresholds.
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline::from_parts(
            self.profiles.unwrap_or_else(ProfileRegistry::builtin),
            self.synonyms.unwrap_or_else(LabelSynonymTable::builtin),
            self.thresholds.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_match_gate_contract() {
        let t = Thresholds::default();
        assert_eq!(t.fee_min, 1000.0);
        assert_eq!(t.fee_max, 200_000.0);
        assert_eq!(t.atar_min, 50.0);
        assert_eq!(t.atar_max, 99.95);
    }

    #[test]
    fn test_builder_defaults_build() {
        let pipeline = PipelineBuilder::new().build();
        let record = pipeline.extract("<html><body></body></html>", "https://example.edu/a");
        assert!(!record.parse_failed);
    }

    #[test]
    fn test_builder_custom_thresholds() {
        let thresholds = Thresholds {
            atar_max: 105.0,
            ..Default::default()
        };
        let pipeline = PipelineBuilder::new().thresholds(thresholds).build();
        let record = pipeline.extract(
            "<html><body><p>ATAR: 99.99</p></body></html>",
            "https://example.edu/a",
        );
        assert!(!record.get(crate::FieldName::Atar).is_absent());
    }
}
