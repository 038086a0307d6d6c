//! Shared application state for the web server.

use std::sync::Arc;

use tcga_explorer_common::{ExplorerConfig, Result};
use tcga_explorer_data::{Dataset, DatasetCache, SourcePaths};

/// Shared state injected into every Axum handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The joined table every page reads from.
    pub dataset: Arc<Dataset>,
    pub config: Arc<ExplorerConfig>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, config: ExplorerConfig) -> Self {
        Self {
            dataset,
            config: Arc::new(config),
        }
    }

    /// Build the dataset for `config.data` through `cache`.
    pub fn load(config: ExplorerConfig, cache: &DatasetCache) -> Result<Self> {
        let dataset = cache.get_or_load(&SourcePaths::from(&config.data))?;
        Ok(Self::new(dataset, config))
    }
}

pub type SharedState = Arc<AppState>;
