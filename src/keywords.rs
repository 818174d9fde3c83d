//! Keyword frequency ranking and keyword-filtered price analysis.

use std::collections::HashMap;

use crate::models::{KeywordCount, Listing, PriceStats};
use crate::pricing::stats_of;
use crate::text::normalize;

/// The most frequent normalized tokens across a row subset's title and tag
/// fields, descending by count. Ties keep first-encountered order (stable
/// sort), so equal-count words rank in the order the corpus introduced them.
/// A non-positive `limit` yields an empty ranking.
pub fn top_keywords(rows: &[&Listing], limit: usize) -> Vec<KeywordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for listing in rows {
        for field in [
            listing.title.as_deref(),
            listing.categories.as_deref(),
            listing.colors.as_deref(),
            listing.materials.as_deref(),
            listing.styles.as_deref(),
        ] {
            for word in normalize(field) {
                match counts.get_mut(&word) {
                    Some(count) => *count += 1,
                    None => {
                        counts.insert(word.clone(), 1);
                        order.push(word);
                    }
                }
            }
        }
    }

    let mut ranking: Vec<KeywordCount> = order
        .into_iter()
        .map(|word| {
            let count = counts[&word];
            KeywordCount { word, count }
        })
        .collect();
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking.truncate(limit);
    ranking
}

/// Price statistics over the rows whose combined text contains every
/// keyword as a case-insensitive substring (conjunctive match). Returns
/// `None` when nothing matches — the caller's 404.
pub fn keyword_price_analysis(rows: &[&Listing], keywords: &[String]) -> Option<PriceStats> {
    let needles: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let prices: Vec<f64> = rows
        .iter()
        .filter(|l| {
            let text = l.combined_text();
            needles.iter().all(|k| text.contains(k.as_str()))
        })
        .filter_map(|l| l.price)
        .collect();

    stats_of(&prices)
}
