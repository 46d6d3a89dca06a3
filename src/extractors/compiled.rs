// ABOUTME: Pre-compiled CSS selector cache shared by the DOM extractors.
// ABOUTME: Compiles each selector string once and reuses it across extraction calls.

//! Selector caching for efficient repeated DOM queries.
//!
//! Selector parsing is expensive relative to the actual matching, and the
//! same profile selectors run against every page. This cache compiles each
//! selector once; invalid selectors are cached as unusable so they are only
//! reported once.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::Selector;
use tracing::warn;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` for selectors that do not parse; such entries are cached
/// too, so a bad profile selector is skipped cheaply on every later page.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    {
        let cache = SELECTOR_CACHE.read().unwrap();
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    if compiled.is_none() {
        warn!(selector = css, "unparseable CSS selector, skipping");
    }
    let mut cache = SELECTOR_CACHE.write().unwrap();
    // Another thread may have inserted while we compiled.
    if let Some(cached) = cache.get(css) {
        return cached.clone();
    }
    cache.insert(css.to_string(), compiled.clone());
    compiled
}
