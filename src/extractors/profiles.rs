// ABOUTME: Per-domain selector profile data model and registry.
// ABOUTME: Loads the embedded profile JSON and resolves the profile for a page's domain.

//! Selector profiles for the cascade extractor.
//!
//! A profile maps canonical fields to ordered selector lists. Site-specific
//! profiles override the global profile per field (they replace the list,
//! they do not append to it). Profiles are plain configuration loaded once
//! at startup and never mutated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::record::FieldName;

/// Embedded JSON containing the global profile and the shipped site profiles.
const BUILTIN_PROFILES_JSON: &str = include_str!("../../data/selector_profiles.json");

/// Ordered selector lists for one domain (or for the global fallback).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SelectorProfile {
    /// Primary domain this profile applies to; empty for the global profile.
    #[serde(default)]
    pub domain: String,
    /// Field -> selectors, tried in listed order.
    #[serde(default)]
    pub selectors: HashMap<FieldName, Vec<String>>,
}

impl SelectorProfile {
    /// Selector list for a field, if configured.
    pub fn selectors_for(&self, field: FieldName) -> Option<&[String]> {
        self.selectors.get(&field).map(|v| v.as_slice())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ProfileData {
    global: SelectorProfile,
    #[serde(default)]
    sites: Vec<SelectorProfile>,
}

/// Registry resolving a page domain to its selector profile.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    global: SelectorProfile,
    sites: Vec<SelectorProfile>,
}

impl ProfileRegistry {
    /// Loads the built-in registry from embedded JSON.
    ///
    /// # Panics
    ///
    /// Panics if the embedded JSON is malformed; it ships with the crate and
    /// is covered by tests.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_PROFILES_JSON).expect("failed to parse builtin selector profiles")
    }

    /// Loads a registry from caller-supplied JSON with the same shape as the
    /// embedded data: `{"global": {...}, "sites": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        let data: ProfileData = serde_json::from_str(json).map_err(ExtractError::profile)?;
        Ok(Self {
            global: data.global,
            sites: data.sites,
        })
    }

    /// The profile for a page domain.
    ///
    /// A site profile matches when the page domain equals its domain or is a
    /// subdomain of it, so `study.uq.edu.au` resolves to the `uq.edu.au`
    /// profile. No match yields the global profile.
    pub fn site_for(&self, domain: &str) -> Option<&SelectorProfile> {
        if domain.is_empty() {
            return None;
        }
        self.sites.iter().find(|p| {
            domain == p.domain || domain.ends_with(&format!(".{}", p.domain))
        })
    }

    /// The domain-agnostic fallback profile.
    pub fn global(&self) -> &SelectorProfile {
        &self.global
    }

    /// Selector list for a field: the site override when present, otherwise
    /// the global list.
    pub fn selectors_for<'a>(&'a self, domain: &str, field: FieldName) -> Option<&'a [String]> {
        if let Some(site) = self.site_for(domain) {
            if let Some(selectors) = site.selectors_for(field) {
                return Some(selectors);
            }
        }
        self.global.selectors_for(field)
    }

    /// Number of shipped site profiles.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }
}
