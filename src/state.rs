use std::sync::{Mutex, MutexGuard};

use log::info;

use crate::config::AppConfig;
use crate::db::review_store::{ReviewStore, StoreError};
use crate::services::dataset_cache::{DatasetCache, Datasets};

/// Everything the handlers share: the read-only tables and the review cache.
pub struct AppState {
    pub datasets: Datasets,
    store: Mutex<ReviewStore>,
}

impl AppState {
    pub fn new(datasets: Datasets, store: ReviewStore) -> Self {
        Self {
            datasets,
            store: Mutex::new(store),
        }
    }

    /// Loads both tables and rebuilds the review cache. Runs once per process.
    pub fn initialize(config: &AppConfig) -> Result<Self, StoreError> {
        let mut cache = DatasetCache::new();
        let datasets = Datasets::load(config, &mut cache);

        let mut store = ReviewStore::open(&config.db_path)?;
        store.rebuild(&datasets.reviews.rows)?;
        info!(
            "Review cache ready at {} ({} reviews, {} activities)",
            config.db_path,
            datasets.reviews.rows.len(),
            datasets.activities.rows.len()
        );

        Ok(Self::new(datasets, store))
    }

    pub fn store(&self) -> Result<MutexGuard<'_, ReviewStore>, StoreError> {
        self.store.lock().map_err(|_| StoreError::LockPoisoned)
    }
}
