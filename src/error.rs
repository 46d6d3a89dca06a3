// ABOUTME: Error types for the extraction pipeline.
// ABOUTME: Provides ExtractError for internally-recovered and configuration failures.

use thiserror::Error;

/// Errors raised inside the pipeline or while loading configuration.
///
/// Nothing here aborts an extraction call: malformed structured-data blocks
/// are skipped, and a page that cannot be parsed at all yields an all-absent
/// record with `parse_failed` set. `Profile` can only surface while building
/// a pipeline from custom configuration.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A machine-readable metadata block was not valid JSON.
    #[error("malformed structured-data block: {0}")]
    StructuredBlock(String),

    /// Selector-profile configuration could not be deserialized.
    #[error("invalid selector profile data: {0}")]
    Profile(String),
}

impl ExtractError {
    /// Creates a StructuredBlock error from an underlying JSON error.
    pub fn structured_block(err: impl std::fmt::Display) -> Self {
        ExtractError::StructuredBlock(err.to_string())
    }

    /// Creates a Profile error from an underlying deserialization error.
    pub fn profile(err: impl std::fmt::Display) -> Self {
        ExtractError::Profile(err.to_string())
    }
}
