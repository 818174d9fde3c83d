//! Corpus loading: scan a dataset directory for CSV exports, parse rows
//! into typed [`Listing`]s, and deduplicate.
//!
//! Deduplication is on the full raw row tuple, not on the `ID` column —
//! the crawler re-observes listings across runs, and two rows sharing an
//! id but differing elsewhere are distinct listings.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use globset::Glob;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::models::Listing;

/// Load every `*.csv` file under `dir` into one deduplicated corpus.
///
/// Zero files or zero rows is a valid empty corpus. Unreadable or
/// malformed files are errors with path context.
pub fn load_corpus(dir: &Path) -> Result<Vec<Listing>> {
    if !dir.exists() {
        bail!("Dataset directory does not exist: {}", dir.display());
    }

    let matcher = Glob::new("*.csv")
        .context("Invalid dataset glob")?
        .compile_matcher();

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| matcher.is_match(entry.file_name()))
        .map(|entry| entry.into_path())
        .collect();
    // Deterministic corpus order across runs
    files.sort();

    let mut corpus = Vec::new();
    let mut seen: HashSet<Vec<String>> = HashSet::new();

    for file in &files {
        read_file(file, &mut corpus, &mut seen)
            .with_context(|| format!("Failed to load dataset file: {}", file.display()))?;
    }

    Ok(corpus)
}

/// Column positions resolved from one file's header row. Files from
/// different crawler versions order (and include) columns differently.
struct Columns {
    id: Option<usize>,
    brand: Option<usize>,
    title: Option<usize>,
    price: Option<usize>,
    item_date: Option<usize>,
    categories: Option<usize>,
    colors: Option<usize>,
    materials: Option<usize>,
    styles: Option<usize>,
    url: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Columns {
            id: find("ID"),
            brand: find("Brand"),
            title: find("Title"),
            price: find("Price"),
            item_date: find("Item_Date"),
            categories: find("Categories"),
            colors: find("Colors"),
            materials: find("Materials"),
            styles: find("Styles"),
            url: find("URL"),
        }
    }
}

fn read_file(
    path: &Path,
    corpus: &mut Vec<Listing>,
    seen: &mut HashSet<Vec<String>>,
) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let columns = Columns::from_headers(reader.headers()?);

    for record in reader.records() {
        let record = record?;

        let raw: Vec<String> = record.iter().map(str::to_string).collect();
        if !seen.insert(raw) {
            continue;
        }

        corpus.push(parse_row(&record, &columns));
    }

    Ok(())
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Listing {
    let field = |index: Option<usize>| {
        index
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Listing {
        id: field(columns.id).unwrap_or_default(),
        brand: field(columns.brand),
        title: field(columns.title),
        price: field(columns.price).as_deref().and_then(parse_price),
        item_date: field(columns.item_date).as_deref().and_then(parse_date),
        categories: field(columns.categories),
        colors: field(columns.colors),
        materials: field(columns.materials),
        styles: field(columns.styles),
        url: field(columns.url),
    }
}

/// Parse a raw price cell. Non-numeric and non-finite values become `None`;
/// the row itself is kept.
fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Parse an item date, `YYYY-MM-DD` first, with a datetime-prefix fallback
/// for older exports that stored full timestamps.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            raw.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}
