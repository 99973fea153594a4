use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::LoadError;
use super::loader::load_file;
use super::model::NewsDataset;
use crate::config::ColumnConfig;

// ---------------------------------------------------------------------------
// Source identity
// ---------------------------------------------------------------------------

/// What a loaded dataset was read from. A change in any field means the
/// cached dataset is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceKey {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
    columns: ColumnConfig,
}

impl SourceKey {
    fn probe(path: &Path, columns: &ColumnConfig) -> Result<Self, LoadError> {
        let path = path.canonicalize()?;
        let meta = std::fs::metadata(&path)?;
        Ok(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
            path,
            columns: columns.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// DatasetCache – load once, reuse until the file changes
// ---------------------------------------------------------------------------

/// Memoizes the most recently loaded dataset by source identity.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<(SourceKey, Arc<NewsDataset>)>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, reloading only if the file (or the
    /// column selection) changed since the last load.
    pub fn get_or_load(
        &mut self,
        path: &Path,
        columns: &ColumnConfig,
    ) -> Result<Arc<NewsDataset>, LoadError> {
        let key = SourceKey::probe(path, columns)?;

        if let Some((cached_key, dataset)) = &self.entry {
            if *cached_key == key {
                log::debug!("Dataset cache hit for {}", key.path.display());
                return Ok(Arc::clone(dataset));
            }
        }

        log::debug!("Dataset cache miss for {}", key.path.display());
        let dataset = Arc::new(load_file(&key.path, columns)?);
        self.entry = Some((key, Arc::clone(&dataset)));
        Ok(dataset)
    }

    /// Drop the cached dataset.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    #[cfg(test)]
    fn is_cached(&self, path: &Path) -> bool {
        let Ok(path) = path.canonicalize() else {
            return false;
        };
        self.entry
            .as_ref()
            .is_some_and(|(key, _)| key.path == path)
    }
}
