//! # Vintalytics CLI (`vinta`)
//!
//! The `vinta` binary is the query surface for the listing analytics
//! engine. It loads the CSV dataset into an in-memory snapshot, then runs
//! one analytical query and prints the result as JSON (reports like
//! `stats` print plain text).
//!
//! ## Usage
//!
//! ```bash
//! vinta --config ./config/vinta.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `vinta stats` | Corpus overview: counts, coverage, top brands |
//! | `vinta brands` | Qualified brands with listing counts |
//! | `vinta count <brand> <unit>` | Listing counts per calendar bucket |
//! | `vinta pricing <brand> <unit>` | Price statistics per calendar bucket |
//! | `vinta keywords <brand>` | Top title/tag keywords for a brand |
//! | `vinta keyword-pricing <brand> <list>` | Price stats for listings matching every keyword |
//! | `vinta similar <list>` | TF-IDF similar listings with price analysis |
//!
//! Queries with no matching data print `No results.` and exit 0 — the
//! CLI equivalent of the API layer's 404.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vintalytics::brands;
use vintalytics::config;
use vintalytics::engine::Engine;
use vintalytics::keywords;
use vintalytics::pricing::{self, TimeUnit};
use vintalytics::stats;

/// Vintalytics CLI — analytical queries over a corpus of secondhand
/// marketplace listings.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file naming the dataset directory and engine defaults.
#[derive(Parser)]
#[command(
    name = "vinta",
    about = "Vintalytics — price, keyword, and similarity analytics over marketplace listings",
    version,
    long_about = "Vintalytics loads a deduplicated corpus of crawled marketplace listings \
    from CSV exports and answers analytical queries over it: brand-scoped price statistics, \
    time-bucketed listing counts, keyword frequency rankings, and TF-IDF similarity search."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/vinta.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Print a corpus overview.
    ///
    /// Shows listing totals, price/date coverage, the observed date range,
    /// and the largest brands. Useful for verifying a dataset before
    /// querying it.
    Stats,

    /// List brands with at least a minimum number of listings.
    ///
    /// Brands are sorted by listing count, descending. The minimum defaults
    /// to `brands.min_count` from the config.
    Brands {
        /// Minimum listing count for a brand to qualify.
        #[arg(long)]
        min_count: Option<usize>,
    },

    /// Listing counts for a brand, bucketed by calendar period.
    ///
    /// Buckets are labeled with their period-end date (weeks end on Sunday,
    /// months and years on their last calendar day); empty buckets are
    /// omitted.
    Count {
        /// Brand name (case-insensitive; may be percent-encoded).
        brand: String,

        /// Calendar unit: weekly, monthly, or yearly.
        #[arg(value_enum)]
        unit: TimeUnit,

        /// Inclusive lower bound on item date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// Inclusive upper bound on item date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,
    },

    /// Price statistics for a brand, bucketed by calendar period.
    ///
    /// Reports average/min/max/count per bucket over rows with a usable
    /// price; buckets without priced rows are omitted.
    Pricing {
        /// Brand name (case-insensitive; may be percent-encoded).
        brand: String,

        /// Calendar unit: weekly, monthly, or yearly.
        #[arg(value_enum)]
        unit: TimeUnit,

        /// Inclusive lower bound on item date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// Inclusive upper bound on item date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,
    },

    /// Top keywords across a brand's titles and tag fields.
    Keywords {
        /// Brand name (case-insensitive; may be percent-encoded).
        brand: String,

        /// Ranking size. Defaults to `keywords.default_limit` from config.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Price statistics for a brand's listings matching every keyword.
    ///
    /// Keywords are comma-separated and matched as case-insensitive
    /// substrings of the combined title + tag text (conjunctive AND).
    KeywordPricing {
        /// Brand name (case-insensitive; may be percent-encoded).
        brand: String,

        /// Comma-separated keyword list, e.g. "leather,jacket".
        keywords: String,
    },

    /// Find listings similar to a keyword phrase and analyze their prices.
    ///
    /// Ranks every indexed listing by TF-IDF cosine similarity against the
    /// joined keywords; reports price statistics, quartile price bands, and
    /// the top matches.
    Similar {
        /// Comma-separated keyword list, e.g. "wool,coat".
        keywords: String,

        /// Minimum similarity score in [0, 1]. Defaults to
        /// `similarity.threshold` from config.
        #[arg(long)]
        threshold: Option<f64>,
    },
}

/// Validate an optional `YYYY-MM-DD` bound before any engine call.
fn parse_bound(raw: &Option<String>) -> Result<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Ok(Some(date)),
            Err(_) => bail!("Invalid date format: '{}'. Use YYYY-MM-DD", s),
        },
    }
}

/// Split a comma-separated keyword list, trimming blanks.
fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    let engine = Engine::load(&cfg)?;
    let snapshot = engine.snapshot();

    match cli.command {
        Commands::Stats => {
            stats::run_stats(&snapshot.listings, snapshot.similarity.len());
        }
        Commands::Brands { min_count } => {
            let min_count = min_count.unwrap_or(cfg.brands.min_count);
            let list = brands::list_brands(&snapshot.listings, min_count);
            print_json(&serde_json::json!({ "brands": list }))?;
        }
        Commands::Count {
            brand,
            unit,
            start,
            end,
        } => {
            let (start, end) = (parse_bound(&start)?, parse_bound(&end)?);
            let rows = brands::rows_for_brand(&snapshot.listings, &brand);
            let data = pricing::time_bucketed_counts(&rows, unit, start, end);
            if data.is_empty() {
                println!("No results.");
                return Ok(());
            }
            print_json(&serde_json::json!({
                "brand": brand,
                "time_unit": unit,
                "data": data,
            }))?;
        }
        Commands::Pricing {
            brand,
            unit,
            start,
            end,
        } => {
            let (start, end) = (parse_bound(&start)?, parse_bound(&end)?);
            let rows = brands::rows_for_brand(&snapshot.listings, &brand);
            let data = pricing::time_bucketed_price_stats(&rows, unit, start, end);
            if data.is_empty() {
                println!("No results.");
                return Ok(());
            }
            print_json(&serde_json::json!({
                "brand": brand,
                "time_unit": unit,
                "data": data,
            }))?;
        }
        Commands::Keywords { brand, limit } => {
            let limit = limit.unwrap_or(cfg.keywords.default_limit);
            let rows = brands::rows_for_brand(&snapshot.listings, &brand);
            let ranking = keywords::top_keywords(&rows, limit);
            if ranking.is_empty() {
                println!("No results.");
                return Ok(());
            }
            print_json(&serde_json::json!({
                "brand": brand,
                "keywords": ranking,
            }))?;
        }
        Commands::KeywordPricing { brand, keywords } => {
            let list = split_keywords(&keywords);
            if list.is_empty() {
                bail!("Keyword list must not be empty");
            }
            let rows = brands::rows_for_brand(&snapshot.listings, &brand);
            match keywords::keyword_price_analysis(&rows, &list) {
                Some(analysis) => print_json(&serde_json::json!({
                    "brand": brand,
                    "keywords": list,
                    "analysis": analysis,
                }))?,
                None => println!("No results."),
            }
        }
        Commands::Similar {
            keywords,
            threshold,
        } => {
            let list = split_keywords(&keywords);
            if list.is_empty() {
                bail!("Keyword list must not be empty");
            }
            let threshold = threshold.unwrap_or(cfg.similarity.threshold);
            if !(0.0..=1.0).contains(&threshold) {
                bail!("Threshold must be in [0.0, 1.0]");
            }
            match snapshot.similarity.find_similar(&list, threshold) {
                Some(analysis) => print_json(&serde_json::json!({
                    "keywords": list,
                    "analysis": analysis,
                }))?,
                None => println!("No results."),
            }
        }
    }

    Ok(())
}
