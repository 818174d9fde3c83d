//! # Vintalytics
//!
//! An in-memory analytics engine for secondhand-clothing marketplace
//! listings.
//!
//! Vintalytics loads a deduplicated corpus of crawled listings from CSV
//! exports and answers analytical queries over it: brand-scoped price
//! statistics, time-bucketed listing counts, keyword frequency rankings,
//! and TF-IDF similarity search with price breakdowns.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌─────────────────────────┐
//! │ CSV files │──▶│    Loader     │──▶│   Snapshot (immutable)  │
//! │ (crawler) │   │ parse + dedup │   │ corpus + TF-IDF index   │
//! └──────────┘   └───────────────┘   └─────┬──────────┬────────┘
//!                                          │          │
//!                                    ┌─────▼────┐ ┌───▼──────┐
//!                                    │ Brand    │ │ Similarity│
//!                                    │ queries  │ │ queries   │
//!                                    └──────────┘ └──────────┘
//! ```
//!
//! Data flows one direction: the loader builds the corpus, the brand index
//! scopes rows, and the aggregation/keyword components compute over those
//! subsets per query. The similarity index is brand-agnostic and is rebuilt
//! whenever the corpus is reloaded.
//!
//! ## Quick Start
//!
//! ```bash
//! vinta stats                              # corpus overview
//! vinta brands --min-count 100             # qualified brands
//! vinta count Nike monthly                 # listings per month
//! vinta pricing Nike weekly --start 2024-01-01
//! vinta keywords Nike --limit 15
//! vinta keyword-pricing Nike "air,hoodie"
//! vinta similar "leather,jacket" --threshold 0.1
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`loader`] | CSV corpus loading and deduplication |
//! | [`text`] | Tokenization and stop-word normalization |
//! | [`brands`] | Case-insensitive brand lookup and enumeration |
//! | [`pricing`] | Price statistics and calendar bucketing |
//! | [`keywords`] | Keyword rankings and conjunctive price filters |
//! | [`similar`] | TF-IDF similarity search |
//! | [`engine`] | Snapshot ownership and atomic reload |
//! | [`stats`] | Corpus overview report |

pub mod brands;
pub mod config;
pub mod engine;
pub mod keywords;
pub mod loader;
pub mod models;
pub mod pricing;
pub mod similar;
pub mod stats;
pub mod text;
