//! The engine snapshot: a loaded corpus plus its derived similarity index,
//! immutably shared by every query.
//!
//! The corpus is read-mostly and query-parallel. A [`Snapshot`] is built in
//! one pass and never mutated; [`Engine`] publishes it behind a single
//! swappable `Arc`, so a reload builds the replacement off to the side and
//! readers observe either the old snapshot or the new one in full, never a
//! partially rebuilt state. In-flight queries keep the `Arc` they cloned.

use anyhow::Result;
use std::sync::{Arc, RwLock};

use crate::config::Config;
use crate::loader;
use crate::models::Listing;
use crate::similar::SimilarityIndex;

/// One immutable view of the corpus and its similarity index.
pub struct Snapshot {
    pub listings: Vec<Listing>,
    pub similarity: SimilarityIndex,
}

impl Snapshot {
    /// Load the dataset and fit the similarity index over it. The index is
    /// corpus-global, so it is always rebuilt here rather than patched.
    pub fn build(config: &Config) -> Result<Self> {
        let listings = loader::load_corpus(&config.dataset.dir)?;
        eprintln!("Creating text vectors for {} listings...", listings.len());
        let similarity = SimilarityIndex::build(&listings, &config.similarity);
        Ok(Snapshot {
            listings,
            similarity,
        })
    }
}

/// Owner of the current snapshot reference.
pub struct Engine {
    current: RwLock<Arc<Snapshot>>,
}

impl Engine {
    pub fn load(config: &Config) -> Result<Self> {
        let snapshot = Snapshot::build(config)?;
        Ok(Engine {
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// The current snapshot. Queries hold this `Arc` for their lifetime and
    /// are unaffected by concurrent reloads.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Rebuild the snapshot from disk and swap it in atomically. The old
    /// snapshot stays alive as long as any reader still holds it.
    pub fn reload(&self, config: &Config) -> Result<()> {
        let fresh = Arc::new(Snapshot::build(config)?);
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = fresh;
        Ok(())
    }
}
