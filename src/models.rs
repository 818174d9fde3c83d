//! Core data models used throughout Vintalytics.
//!
//! These types represent the listings held in the in-memory corpus and the
//! result records produced by the analytics engine. Result records serialize
//! to JSON for the CLI output.

use chrono::NaiveDate;
use serde::Serialize;

/// A single marketplace listing, one row of the corpus.
///
/// Every field that can be absent or unparsable in the raw data is an
/// `Option`; components skip rows missing the field they need and keep
/// them everywhere else.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Source identifier. Unique per raw row before deduplication, but not
    /// guaranteed unique in the corpus — dedup is on the full row tuple.
    pub id: String,
    pub brand: Option<String>,
    pub title: Option<String>,
    /// Parsed price. `None` when the raw value is missing or non-numeric;
    /// such rows still count toward plain listing counts.
    pub price: Option<f64>,
    /// Date the listing was observed. `None` excludes the row from
    /// time-bucketed queries only.
    pub item_date: Option<NaiveDate>,
    pub categories: Option<String>,
    pub colors: Option<String>,
    pub materials: Option<String>,
    pub styles: Option<String>,
    pub url: Option<String>,
}

impl Listing {
    /// Title plus all tag fields joined into one lower-cased text blob.
    /// Missing fields contribute an empty string. This is the text the
    /// keyword filter and the similarity index operate on.
    pub fn combined_text(&self) -> String {
        let parts = [
            self.title.as_deref().unwrap_or(""),
            self.categories.as_deref().unwrap_or(""),
            self.colors.as_deref().unwrap_or(""),
            self.materials.as_deref().unwrap_or(""),
            self.styles.as_deref().unwrap_or(""),
        ];
        parts.join(" ").to_lowercase()
    }
}

/// A brand paired with its listing count, from brand enumeration.
#[derive(Debug, Clone, Serialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: usize,
}

/// Price statistics over a row subset. Only rows with a usable price
/// contribute; `count` is the number of such rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Listing count for one timeframe bucket. `date` is the bucket's
/// period-end label, `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeBucket {
    pub date: String,
    pub count: usize,
}

/// Price statistics for one timeframe bucket.
#[derive(Debug, Clone, Serialize)]
pub struct BucketStats {
    pub date: String,
    #[serde(flatten)]
    pub stats: PriceStats,
}

/// A word and its frequency from the keyword ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

/// One equal-frequency price band of a similarity result set.
#[derive(Debug, Clone, Serialize)]
pub struct PriceBand {
    /// Formatted as `low-high` with two decimals.
    pub range: String,
    pub count: usize,
    pub average: f64,
}

/// A matched listing in a similarity result, ranked by score.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarItem {
    pub title: String,
    pub price: f64,
    pub brand: String,
    /// Cosine similarity against the query, in [0, 1], rounded to 3 decimals.
    pub similarity: f64,
}

/// Full price analysis over the listings matched by a similarity query.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityReport {
    pub average_price: f64,
    pub median_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub count: usize,
    pub price_ranges: Vec<PriceBand>,
    pub similar_items: Vec<SimilarItem>,
}
