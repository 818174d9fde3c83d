//! TF-IDF similarity search over the whole corpus.
//!
//! Builds a term-weighted vector space (word unigrams through trigrams,
//! vocabulary capped to the most informative terms) over every priced
//! listing's combined text, then ranks listings by cosine similarity to a
//! query phrase and reports price statistics plus equal-frequency price
//! bands over the matched set.
//!
//! The index is corpus-global: vocabulary and idf weights depend on every
//! document, so it is rebuilt wholesale whenever the corpus changes, never
//! patched. Row order matches the indexed-listing order at build time.

use std::collections::HashMap;

use crate::config::SimilarityConfig;
use crate::models::{Listing, PriceBand, SimilarItem, SimilarityReport};
use crate::pricing::round2;
use crate::text::tokenize;

/// The slice of a listing the index keeps for reporting.
#[derive(Debug, Clone)]
struct IndexedListing {
    title: String,
    brand: String,
    price: f64,
}

/// A fitted TF-IDF vector space plus the listing table it was built from.
#[derive(Debug)]
pub struct SimilarityIndex {
    /// term -> column
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per column.
    idf: Vec<f64>,
    /// One L2-normalized sparse row per indexed listing, (column, weight)
    /// pairs sorted by column.
    rows: Vec<Vec<(usize, f64)>>,
    /// Parallel to `rows`.
    listings: Vec<IndexedListing>,
    /// Longest n-gram length, carried for query-side tokenization.
    ngram_max: usize,
    min_results: usize,
    top_items: usize,
}

impl SimilarityIndex {
    /// Fit the vector space over every listing with a usable price.
    ///
    /// Vocabulary selection keeps the `max_features` terms appearing in the
    /// most documents (ties broken lexicographically for determinism); idf
    /// is the smoothed form `ln((1 + n) / (1 + df)) + 1`.
    pub fn build(corpus: &[Listing], config: &SimilarityConfig) -> Self {
        let mut listings = Vec::new();
        let mut docs: Vec<Vec<String>> = Vec::new();

        for listing in corpus {
            let Some(price) = listing.price.filter(|p| p.is_finite()) else {
                continue;
            };
            listings.push(IndexedListing {
                title: listing.title.clone().unwrap_or_default(),
                brand: listing.brand.clone().unwrap_or_default(),
                price,
            });
            docs.push(ngrams(&listing.combined_text(), config.ngram_max));
        }

        // Document frequency per term
        let mut df: HashMap<&str, usize> = HashMap::new();
        for doc in &docs {
            let mut seen: Vec<&str> = doc.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *df.entry(term).or_default() += 1;
            }
        }

        // Cap the vocabulary to the terms seen in the most documents
        let mut ranked: Vec<(&str, usize)> = df.iter().map(|(t, c)| (*t, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        ranked.truncate(config.max_features);

        let n_docs = docs.len();
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (column, (term, count)) in ranked.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), column);
            idf.push(((1.0 + n_docs as f64) / (1.0 + count as f64)).ln() + 1.0);
        }

        let rows = docs
            .iter()
            .map(|doc| vectorize(doc, &vocabulary, &idf))
            .collect();

        SimilarityIndex {
            vocabulary,
            idf,
            rows,
            listings,
            ngram_max: config.ngram_max,
            min_results: config.min_results,
            top_items: config.top_items,
        }
    }

    /// Number of indexed listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Cosine similarity of every indexed listing against the query phrase,
    /// in index order. Scores live in [0, 1].
    fn score(&self, query: &str) -> Vec<f64> {
        let terms = ngrams(query, self.ngram_max);
        let query_vec = vectorize(&terms, &self.vocabulary, &self.idf);
        self.rows
            .iter()
            .map(|row| sparse_dot(&query_vec, row))
            .collect()
    }

    /// Rank listings against the joined query keywords and report price
    /// statistics over the matched set.
    ///
    /// Selection policy: every listing scoring at or above `threshold`; when
    /// fewer than `min_results` qualify, the top `min_results` by score
    /// regardless of threshold, so narrow queries still yield a usable set.
    /// An empty index (or a degenerate price distribution) yields `None`.
    pub fn find_similar(&self, keywords: &[String], threshold: f64) -> Option<SimilarityReport> {
        if self.is_empty() {
            return None;
        }

        let phrase = keywords.join(" ").to_lowercase();
        let scores = self.score(&phrase);

        let mut matched: Vec<usize> = (0..scores.len())
            .filter(|&i| scores[i] >= threshold)
            .collect();
        if matched.len() < self.min_results {
            let mut by_score: Vec<usize> = (0..scores.len()).collect();
            by_score.sort_by(|&a, &b| {
                scores[b]
                    .partial_cmp(&scores[a])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            by_score.truncate(self.min_results);
            matched = by_score;
        }

        // Highest similarity first; stable on index for deterministic ties
        matched.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let prices: Vec<f64> = matched.iter().map(|&i| self.listings[i].price).collect();
        let count = prices.len();

        let average = prices.iter().sum::<f64>() / count as f64;
        let median = median_of(&prices);
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if !(average.is_finite() && median.is_finite() && min.is_finite() && max.is_finite()) {
            return None;
        }

        let similar_items = matched
            .iter()
            .take(self.top_items)
            .filter(|&&i| self.listings[i].price.is_finite())
            .map(|&i| SimilarItem {
                title: self.listings[i].title.clone(),
                price: round2(self.listings[i].price),
                brand: self.listings[i].brand.clone(),
                similarity: (scores[i] * 1000.0).round() / 1000.0,
            })
            .collect();

        Some(SimilarityReport {
            average_price: round2(average),
            median_price: round2(median),
            min_price: round2(min),
            max_price: round2(max),
            count,
            price_ranges: price_bands(&prices),
            similar_items,
        })
    }
}

/// Word n-grams (1..=max) over the stop-word-filtered tokens of `text`,
/// space-joined. The unigram pass alone makes this the plain token list.
fn ngrams(text: &str, max: usize) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = Vec::new();
    for n in 1..=max.max(1) {
        if n > tokens.len() {
            break;
        }
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}

/// tf×idf over the fitted vocabulary, L2-normalized, sorted by column.
/// Terms outside the vocabulary are ignored (no refitting per query).
fn vectorize(terms: &[String], vocabulary: &HashMap<String, usize>, idf: &[f64]) -> Vec<(usize, f64)> {
    let mut tf: HashMap<usize, f64> = HashMap::new();
    for term in terms {
        if let Some(&column) = vocabulary.get(term) {
            *tf.entry(column).or_default() += 1.0;
        }
    }

    let mut vec: Vec<(usize, f64)> = tf
        .into_iter()
        .map(|(column, count)| (column, count * idf[column]))
        .collect();
    vec.sort_by_key(|&(column, _)| column);

    let norm = vec.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for entry in &mut vec {
            entry.1 /= norm;
        }
    }
    vec
}

/// Dot product of two column-sorted sparse vectors. Both sides are
/// L2-normalized, so this is cosine similarity.
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j, mut sum) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

fn median_of(prices: &[f64]) -> f64 {
    let mut sorted = prices.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Four equal-frequency price bands over the matched set's own distribution
/// (quartiles by rank, not by the whole corpus). Fewer than four candidates
/// produce fewer, non-empty bands.
fn price_bands(prices: &[f64]) -> Vec<PriceBand> {
    let mut sorted = prices.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();

    let mut bands = Vec::new();
    for quarter in 0..4 {
        let lo = quarter * n / 4;
        let hi = (quarter + 1) * n / 4;
        if lo >= hi {
            continue;
        }
        let slice = &sorted[lo..hi];
        let mean = slice.iter().sum::<f64>() / slice.len() as f64;
        bands.push(PriceBand {
            range: format!("{:.2}-{:.2}", slice[0], slice[slice.len() - 1]),
            count: slice.len(),
            average: round2(mean),
        });
    }
    bands
}
