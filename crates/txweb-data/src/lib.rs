//! Dataset provider for txweb
//!
//! Loads a `{count, info}` JSON export from disk and keeps it in memory
//! behind [`DatasetStore`]. The provider's `count` is carried through
//! verbatim; it is not required to match the number of records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use txweb_config::Config;
use txweb_core::{Dataset, Transaction, DISPLAY_WINDOW};

pub mod error;

pub use error::{DataError, DataResult};

// ==================== Source Trait ====================

/// Source reference type
pub type SourceRef = Arc<dyn DatasetSourceTrait>;

/// Trait for dataset sources
#[async_trait]
pub trait DatasetSourceTrait: Send + Sync {
    /// Decode a dataset from raw content
    async fn parse(&self, content: &str) -> Result<Dataset, DataError>;

    /// Load a dataset from a file path
    async fn load_file(&self, path: PathBuf) -> Result<Dataset, DataError>;
}

/// Default source reading JSON files from disk
#[derive(Debug, Default)]
pub struct JsonDatasetSource;

#[async_trait]
impl DatasetSourceTrait for JsonDatasetSource {
    async fn parse(&self, content: &str) -> Result<Dataset, DataError> {
        serde_json::from_str(content).map_err(|e| DataError::InvalidJson {
            location: "parse".to_string(),
            message: e.to_string(),
        })
    }

    async fn load_file(&self, path: PathBuf) -> Result<Dataset, DataError> {
        if !path.exists() {
            return Err(DataError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }
        let content = tokio::fs::read_to_string(&path).await?;
        serde_json::from_str(&content).map_err(|e| DataError::InvalidJson {
            location: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })
    }
}

// ==================== Dataset Store ====================

/// Summary of the loaded dataset (JSON API)
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    /// Provider-reported record count
    pub count: u64,
    /// Number of records actually loaded
    pub rows: usize,
    /// Number of rows the table will display
    pub window: usize,
    /// When the dataset was last loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

/// In-memory dataset with its source and configuration
///
/// The server holds this behind `Arc<RwLock<_>>` so the reload endpoint
/// can swap the data without restarting.
pub struct DatasetStore {
    config: Config,
    source: SourceRef,
    dataset: Dataset,
    loaded_at: Option<DateTime<Utc>>,
}

impl DatasetStore {
    /// Create an empty store; call [`DatasetStore::load`] to populate it
    pub fn new(config: Config, source: SourceRef) -> Self {
        Self {
            config,
            source,
            dataset: Dataset::default(),
            loaded_at: None,
        }
    }

    /// The loaded dataset
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Provider-reported record count
    pub fn count(&self) -> u64 {
        self.dataset.count
    }

    /// The loaded transaction records
    pub fn rows(&self) -> &[Transaction] {
        &self.dataset.info
    }

    /// Load the dataset from the configured list file
    pub async fn load(&mut self) -> DataResult<()> {
        let path = self.config.list_path();
        log::info!("Loading dataset from {}", path.display());
        self.dataset = self.source.load_file(path).await?;
        self.loaded_at = Some(Utc::now());
        log::info!(
            "Dataset loaded: count={}, rows={}",
            self.dataset.count,
            self.dataset.info.len()
        );
        Ok(())
    }

    /// Re-read the list file, replacing the in-memory dataset
    pub async fn reload(&mut self) -> DataResult<()> {
        self.load().await
    }

    /// Summary for the JSON API and the page header cards
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            count: self.dataset.count,
            rows: self.dataset.info.len(),
            window: self.dataset.info.len().min(DISPLAY_WINDOW),
            loaded_at: self.loaded_at,
        }
    }
}

// ==================== Tests ====================
