//! Corpus statistics and health overview.
//!
//! Provides a quick summary of what's loaded: listing counts, price and
//! date coverage, the observed date range, and a top-brands breakdown.
//! Used by `vinta stats` to give confidence that a dataset loaded as
//! expected before querying it.

use crate::brands;
use crate::models::Listing;

/// Run the stats command: summarize the corpus and print a report.
pub fn run_stats(corpus: &[Listing], indexed: usize) {
    let total = corpus.len();
    let priced = corpus.iter().filter(|l| l.price.is_some()).count();
    let dated = corpus.iter().filter(|l| l.item_date.is_some()).count();

    let first_date = corpus.iter().filter_map(|l| l.item_date).min();
    let last_date = corpus.iter().filter_map(|l| l.item_date).max();

    let all_brands = brands::list_brands(corpus, 1);

    println!("Vintalytics — Corpus Stats");
    println!("==========================");
    println!();
    println!("  Listings:    {}", total);
    println!("  Priced:      {} / {} ({}%)", priced, total, percent(priced, total));
    println!("  Dated:       {} / {} ({}%)", dated, total, percent(dated, total));
    println!("  Indexed:     {} (similarity)", indexed);
    println!("  Brands:      {}", all_brands.len());

    if let (Some(first), Some(last)) = (first_date, last_date) {
        println!(
            "  Date range:  {} .. {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        );
    }

    if !all_brands.is_empty() {
        println!();
        println!("  Top brands:");
        println!("  {:<28} {:>8}", "BRAND", "LISTINGS");
        println!("  {}", "-".repeat(38));
        for brand in all_brands.iter().take(10) {
            println!("  {:<28} {:>8}", brand.brand, brand.count);
        }
    }

    println!();
}

fn percent(part: usize, whole: usize) -> usize {
    if whole > 0 {
        part * 100 / whole
    } else {
        0
    }
}
