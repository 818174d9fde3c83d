//! Price statistics and calendar-bucketed aggregation.
//!
//! Bucket boundary convention: buckets are labeled by their period-end date —
//! weeks end on Sunday, months on their last calendar day, years on Dec 31.
//! Buckets that match no rows are omitted, so output is a sparse ascending
//! series rather than a dense fixed-size one.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::{BucketStats, Listing, PriceStats, TimeBucket};

/// Calendar unit for timeframe bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Weekly,
    Monthly,
    Yearly,
}

/// Round a value to two decimal places for output. Internal computation
/// stays at full precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count/average/min/max over the rows that carry a usable price.
/// Returns `None` when no row does — distinct from a zero result.
pub fn price_stats(rows: &[&Listing]) -> Option<PriceStats> {
    let prices: Vec<f64> = rows.iter().filter_map(|l| l.price).collect();
    stats_of(&prices)
}

/// Stats over a bare price list; shared by the bucketed and keyword paths.
pub(crate) fn stats_of(prices: &[f64]) -> Option<PriceStats> {
    if prices.is_empty() {
        return None;
    }
    let sum: f64 = prices.iter().sum();
    let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some(PriceStats {
        average: round2(sum / prices.len() as f64),
        min: round2(min),
        max: round2(max),
        count: prices.len(),
    })
}

/// Number of rows in the subset, regardless of price validity.
pub fn count_listings(rows: &[&Listing]) -> usize {
    rows.len()
}

/// The period-end date of the bucket containing `date`.
pub fn period_end(date: NaiveDate, unit: TimeUnit) -> NaiveDate {
    match unit {
        TimeUnit::Weekly => {
            // num_days_from_monday: Monday = 0 .. Sunday = 6
            let until_sunday = 6 - date.weekday().num_days_from_monday() as u64;
            date.checked_add_days(Days::new(until_sunday)).unwrap_or(date)
        }
        TimeUnit::Monthly => {
            let (year, month) = if date.month() == 12 {
                (date.year() + 1, 1)
            } else {
                (date.year(), date.month() + 1)
            };
            NaiveDate::from_ymd_opt(year, month, 1)
                .and_then(|d| d.checked_sub_days(Days::new(1)))
                .unwrap_or(date)
        }
        TimeUnit::Yearly => NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date),
    }
}

/// Group rows into period-end buckets after applying the optional inclusive
/// date bounds. Rows without a parseable date are skipped silently.
fn bucketize<'a>(
    rows: &[&'a Listing],
    unit: TimeUnit,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> BTreeMap<NaiveDate, Vec<&'a Listing>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&Listing>> = BTreeMap::new();
    for listing in rows {
        let Some(date) = listing.item_date else {
            continue;
        };
        if start.is_some_and(|s| date < s) || end.is_some_and(|e| date > e) {
            continue;
        }
        buckets.entry(period_end(date, unit)).or_default().push(listing);
    }
    buckets
}

/// Listing counts per calendar bucket, ascending by bucket date.
/// Empty input (or everything filtered out) yields an empty sequence,
/// which callers treat as "not found".
pub fn time_bucketed_counts(
    rows: &[&Listing],
    unit: TimeUnit,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<TimeBucket> {
    bucketize(rows, unit, start, end)
        .into_iter()
        .map(|(date, group)| TimeBucket {
            date: date.format("%Y-%m-%d").to_string(),
            count: group.len(),
        })
        .collect()
}

/// Price statistics per calendar bucket. Buckets whose rows all lack a
/// usable price are omitted.
pub fn time_bucketed_price_stats(
    rows: &[&Listing],
    unit: TimeUnit,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<BucketStats> {
    bucketize(rows, unit, start, end)
        .into_iter()
        .filter_map(|(date, group)| {
            price_stats(&group).map(|stats| BucketStats {
                date: date.format("%Y-%m-%d").to_string(),
                stats,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: Option<f64>, date: Option<&str>) -> Listing {
        Listing {
            id: "1".to_string(),
            brand: Some("Nike".to_string()),
            title: None,
            price,
            item_date: date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            categories: None,
            colors: None,
            materials: None,
            styles: None,
            url: None,
        }
    }

    fn refs(listings: &[Listing]) -> Vec<&Listing> {
        listings.iter().collect()
    }

    #[test]
    fn test_price_stats_basic() {
        let rows = vec![
            listing(Some(50.0), Some("2024-01-10")),
            listing(Some(70.0), Some("2024-01-20")),
        ];
        let stats = price_stats(&refs(&rows)).unwrap();
        assert_eq!(stats.average, 60.0);
        assert_eq!(stats.min, 50.0);
        assert_eq!(stats.max, 70.0);
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_price_stats_skips_unpriced_rows() {
        let rows = vec![
            listing(Some(10.0), None),
            listing(None, None),
            listing(Some(20.0), None),
        ];
        let stats = price_stats(&refs(&rows)).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average, 15.0);
    }

    #[test]
    fn test_price_stats_none_when_no_priced_rows() {
        let rows = vec![listing(None, None), listing(None, None)];
        assert!(price_stats(&refs(&rows)).is_none());
        // ...while the plain count still sees every row
        assert_eq!(count_listings(&refs(&rows)), 2);
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        let rows = vec![
            listing(Some(10.0), None),
            listing(Some(10.0), None),
            listing(Some(10.01), None),
        ];
        let stats = price_stats(&refs(&rows)).unwrap();
        assert_eq!(stats.average, 10.0);
    }

    #[test]
    fn test_period_end_weekly_lands_on_sunday() {
        // 2024-01-10 is a Wednesday; its week ends Sunday 2024-01-14
        let d = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(
            period_end(d, TimeUnit::Weekly),
            NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()
        );
        // A Sunday is its own period end
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 14).unwrap();
        assert_eq!(period_end(sunday, TimeUnit::Weekly), sunday);
    }

    #[test]
    fn test_period_end_monthly_handles_december_and_leap() {
        let dec = NaiveDate::from_ymd_opt(2023, 12, 5).unwrap();
        assert_eq!(
            period_end(dec, TimeUnit::Monthly),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(
            period_end(feb, TimeUnit::Monthly),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_monthly_counts_scenario() {
        let rows = vec![
            listing(Some(50.0), Some("2024-01-10")),
            listing(Some(70.0), Some("2024-01-20")),
        ];
        let buckets = time_bucketed_counts(&refs(&rows), TimeUnit::Monthly, None, None);
        assert_eq!(
            buckets,
            vec![TimeBucket {
                date: "2024-01-31".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_buckets_are_exhaustive_and_non_overlapping() {
        let rows: Vec<Listing> = (1..=28)
            .map(|day| listing(Some(1.0), Some(&format!("2024-01-{:02}", day))))
            .collect();
        let buckets = time_bucketed_counts(&refs(&rows), TimeUnit::Weekly, None, None);
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 28);
        // Ascending, distinct labels
        let dates: Vec<&str> = buckets.iter().map(|b| b.date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let rows = vec![
            listing(Some(1.0), Some("2024-01-10")),
            listing(Some(1.0), Some("2024-01-20")),
            listing(Some(1.0), Some("2024-02-05")),
        ];
        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let buckets =
            time_bucketed_counts(&refs(&rows), TimeUnit::Monthly, Some(start), Some(end));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_rows_without_dates_are_skipped() {
        let rows = vec![listing(Some(1.0), None), listing(Some(1.0), Some("2024-03-01"))];
        let buckets = time_bucketed_counts(&refs(&rows), TimeUnit::Yearly, None, None);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date, "2024-12-31");
        assert_eq!(buckets[0].count, 1);
    }

    #[test]
    fn test_bucketed_price_stats_omits_unpriced_buckets() {
        let rows = vec![
            listing(Some(40.0), Some("2024-01-10")),
            listing(None, Some("2024-02-10")),
        ];
        let buckets = time_bucketed_price_stats(&refs(&rows), TimeUnit::Monthly, None, None);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date, "2024-01-31");
        assert_eq!(buckets[0].stats.average, 40.0);
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        let rows: Vec<&Listing> = Vec::new();
        assert!(time_bucketed_counts(&rows, TimeUnit::Weekly, None, None).is_empty());
        assert!(time_bucketed_price_stats(&rows, TimeUnit::Weekly, None, None).is_empty());
    }
}
