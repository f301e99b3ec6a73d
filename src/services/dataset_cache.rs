use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use log::debug;

use crate::config::AppConfig;
use crate::models::{activity::Activity, review::Review};
use crate::services::loader::{self, Loaded};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl CacheKey {
    fn for_path(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            modified: fs::metadata(path).and_then(|m| m.modified()).ok(),
        }
    }
}

/// Single-slot memo for one table, keyed by file path and modification time.
pub struct Memo<T> {
    entry: Option<(CacheKey, Arc<Loaded<T>>)>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<T> Memo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &mut self,
        path: &Path,
        load: impl FnOnce(&Path) -> Loaded<T>,
    ) -> Arc<Loaded<T>> {
        let key = CacheKey::for_path(path);
        if let Some((cached_key, table)) = &self.entry {
            if *cached_key == key {
                debug!("Reusing cached table for {}", path.display());
                return Arc::clone(table);
            }
        }

        let table = Arc::new(load(path));
        self.entry = Some((key, Arc::clone(&table)));
        table
    }
}

/// Both source tables, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub reviews: Arc<Loaded<Review>>,
    pub activities: Arc<Loaded<Activity>>,
}

impl Datasets {
    pub fn load(config: &AppConfig, cache: &mut DatasetCache) -> Self {
        Self {
            reviews: cache
                .reviews
                .get_or_load(&config.reviews_path, loader::load_reviews),
            activities: cache
                .activities
                .get_or_load(&config.activities_path, loader::load_activities),
        }
    }

    pub fn warnings(&self) -> Vec<String> {
        [&self.reviews.warning, &self.activities.warning]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }

    /// Itinerary generation needs both tables.
    pub fn itinerary_available(&self) -> bool {
        !self.reviews.is_empty() && !self.activities.is_empty()
    }
}

#[derive(Default)]
pub struct DatasetCache {
    reviews: Memo<Review>,
    activities: Memo<Activity>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    #[test]
    fn test_memo_reuses_unchanged_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.csv");
        fs::write(&path, "x").unwrap();

        let calls = Cell::new(0);
        let mut memo: Memo<u8> = Memo::new();
        let load = |_: &Path| {
            calls.set(calls.get() + 1);
            Loaded {
                rows: vec![1],
                warning: None,
            }
        };

        let first = memo.get_or_load(&path, load);
        let second = memo.get_or_load(&path, load);
        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_memo_reloads_for_a_different_path() {
        let dir = TempDir::new().unwrap();
        let calls = Cell::new(0);
        let mut memo: Memo<u8> = Memo::new();
        let load = |_: &Path| {
            calls.set(calls.get() + 1);
            Loaded::empty("missing")
        };

        memo.get_or_load(&dir.path().join("a.csv"), load);
        memo.get_or_load(&dir.path().join("b.csv"), load);
        memo.get_or_load(&dir.path().join("b.csv"), load);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_datasets_report_warnings_and_availability() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(crate::config::ACTIVITIES_FILE),
            "Activity Category,Activity,District\nHiking,Trail walk,Badulla\n",
        )
        .unwrap();

        let config = AppConfig::for_data_dir(dir.path());
        let datasets = Datasets::load(&config, &mut DatasetCache::new());

        assert!(datasets.reviews.is_empty());
        assert_eq!(datasets.activities.rows.len(), 1);
        assert!(!datasets.itinerary_available());

        let warnings = datasets.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Final_Cleaned_Tourist_Reviews.csv"));
    }
}
