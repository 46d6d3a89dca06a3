// ABOUTME: Extraction strategy modules: structured data, tabular, selector cascade,
// ABOUTME: pattern matching, and derived fallbacks, plus their shared configuration.

pub mod cascade;
pub mod compiled;
pub mod derived;
pub mod patterns;
pub mod profiles;
pub mod structured;
pub mod synonyms;
pub mod tabular;
