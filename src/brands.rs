//! Brand index: case-insensitive lookup of corpus rows by brand name.
//!
//! Brand names reach the engine from URL path segments, so they may still
//! carry percent-encoding ("Ralph%20Lauren"); lookup decodes first and
//! tolerates already-decoded input. An unknown brand is a valid outcome
//! signaled by an empty result, never an error.

use percent_encoding::percent_decode_str;

use crate::models::{BrandCount, Listing};

/// Decode a transport-level percent-encoded brand name. Input without any
/// escapes (or with invalid UTF-8 escapes) passes through unchanged.
pub fn decode_brand(name: &str) -> String {
    percent_decode_str(name)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| name.to_string())
}

/// All rows whose brand equals `name`, case-insensitively, whole string.
/// Rows with an absent or empty brand never match.
pub fn rows_for_brand<'a>(corpus: &'a [Listing], name: &str) -> Vec<&'a Listing> {
    let wanted = decode_brand(name).to_lowercase();
    corpus
        .iter()
        .filter(|l| {
            l.brand
                .as_deref()
                .is_some_and(|b| !b.is_empty() && b.to_lowercase() == wanted)
        })
        .collect()
}

/// Enumerate distinct non-empty brands with at least `min_count` listings,
/// sorted by count descending (ties broken by brand name for a stable
/// order).
pub fn list_brands(corpus: &[Listing], min_count: usize) -> Vec<BrandCount> {
    use std::collections::HashMap;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for listing in corpus {
        if let Some(brand) = listing.brand.as_deref() {
            if !brand.is_empty() {
                *counts.entry(brand).or_default() += 1;
            }
        }
    }

    let mut brands: Vec<BrandCount> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .map(|(brand, count)| BrandCount {
            brand: brand.to_string(),
            count,
        })
        .collect();

    brands.sort_by(|a, b| b.count.cmp(&a.count).then(a.brand.cmp(&b.brand)));
    brands
}
