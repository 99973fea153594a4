use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui::Color32;

use crate::color::{generate_palette, LabelColors};
use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::error::LoadError;
use crate::data::model::{Label, NewsDataset};
use crate::ui::wordcloud::CloudLayout;
use crate::view::DashboardView;

/// Number of distinct hues cycled through by the word clouds.
const CLOUD_PALETTE_SIZE: usize = 12;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Memoized loads, keyed by source identity.
    pub cache: DatasetCache,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<NewsDataset>>,

    /// File the current dataset came from.
    pub source: Option<PathBuf>,

    /// Derived values handed to the renderer.
    pub view: Option<DashboardView>,

    /// Current "number of most common words", always within the configured bounds.
    pub top_n: usize,

    pub colors: LabelColors,
    pub cloud_palette: Vec<Color32>,

    /// Word-cloud layouts per label, dropped whenever the dataset changes.
    pub clouds: BTreeMap<Label, Option<CloudLayout>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            top_n: config.top_n.clamp(config.top_n.default),
            colors: LabelColors::from_config(&config.colors),
            cloud_palette: generate_palette(CLOUD_PALETTE_SIZE),
            config,
            cache: DatasetCache::new(),
            dataset: None,
            source: None,
            view: None,
            clouds: BTreeMap::new(),
            status_message: None,
        }
    }

    /// Load `path` (through the cache) and make it the current dataset.
    ///
    /// On failure the previous dataset is discarded so nothing stale is rendered.
    pub fn open(&mut self, path: &Path) -> Result<(), LoadError> {
        match self.cache.get_or_load(path, &self.config.columns) {
            Ok(dataset) => {
                self.source = Some(path.to_path_buf());
                self.set_dataset(dataset);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.source = None;
                self.view = None;
                self.clouds.clear();
                self.status_message = Some(format!("Error loading {}: {e}", path.display()));
                Err(e)
            }
        }
    }

    /// Re-read the current source from disk, bypassing the cache.
    pub fn reload(&mut self) -> Result<(), LoadError> {
        let Some(path) = self.source.clone() else {
            return Ok(());
        };
        self.cache.invalidate();
        self.open(&path)
    }

    /// Ingest a newly loaded dataset and derive the view.
    pub fn set_dataset(&mut self, dataset: Arc<NewsDataset>) {
        self.clouds.clear();
        match DashboardView::build(&dataset, self.top_n) {
            Ok(view) => {
                self.view = Some(view);
                self.status_message = None;
            }
            Err(e) => {
                self.view = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
        self.dataset = Some(dataset);
    }

    /// Change N. The value is clamped to the configured bounds, and only the
    /// top-N lists are recomputed.
    pub fn set_top_n(&mut self, n: usize) {
        let n = self.config.top_n.clamp(n);
        if n == self.top_n {
            return;
        }
        self.top_n = n;

        let Some(view) = &self.view else {
            return;
        };
        log::debug!("Recomputing top-{n} word lists");
        match view.with_top_n(n) {
            Ok(updated) => self.view = Some(updated),
            Err(e) => self.status_message = Some(format!("Error: {e}")),
        }
    }

    /// Write the current view as pretty JSON.
    pub fn export_view(&self, path: &Path) -> Result<()> {
        let view = self
            .view
            .as_ref()
            .context("no dataset loaded, nothing to export")?;
        let json = view.to_json_pretty()?;
        std::fs::write(path, json)
            .with_context(|| format!("writing summary to {}", path.display()))?;
        log::info!("Exported dashboard summary to {}", path.display());
        Ok(())
    }
}
