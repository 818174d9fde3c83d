//! TOML configuration parsing and validation.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub brands: BrandsConfig,
    #[serde(default)]
    pub keywords: KeywordsConfig,
    #[serde(default)]
    pub similarity: SimilarityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    /// Directory scanned for `*.csv` listing exports.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrandsConfig {
    /// Minimum listing count for a brand to appear in enumeration.
    #[serde(default = "default_min_count")]
    pub min_count: usize,
}

impl Default for BrandsConfig {
    fn default() -> Self {
        Self {
            min_count: default_min_count(),
        }
    }
}

fn default_min_count() -> usize {
    100
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeywordsConfig {
    /// Default size of the top-keywords ranking.
    #[serde(default = "default_keyword_limit")]
    pub default_limit: usize,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            default_limit: default_keyword_limit(),
        }
    }
}

fn default_keyword_limit() -> usize {
    15
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimilarityConfig {
    /// Minimum cosine similarity for a listing to count as a match.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Vocabulary cap for the term-weight matrix.
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    /// Longest word n-gram entered into the vocabulary.
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
    /// Fallback result-set size when the threshold matches fewer listings.
    #[serde(default = "default_min_results")]
    pub min_results: usize,
    /// How many ranked listings a similarity report includes.
    #[serde(default = "default_top_items")]
    pub top_items: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            max_features: default_max_features(),
            ngram_max: default_ngram_max(),
            min_results: default_min_results(),
            top_items: default_top_items(),
        }
    }
}

fn default_threshold() -> f64 {
    0.1
}
fn default_max_features() -> usize {
    5000
}
fn default_ngram_max() -> usize {
    3
}
fn default_min_results() -> usize {
    20
}
fn default_top_items() -> usize {
    10
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if !(0.0..=1.0).contains(&config.similarity.threshold) {
        anyhow::bail!("similarity.threshold must be in [0.0, 1.0]");
    }
    if config.similarity.max_features == 0 {
        anyhow::bail!("similarity.max_features must be > 0");
    }
    if config.similarity.ngram_max == 0 {
        anyhow::bail!("similarity.ngram_max must be > 0");
    }
    if config.similarity.min_results == 0 {
        anyhow::bail!("similarity.min_results must be > 0");
    }

    Ok(config)
}
