//! Per-session dataset cache.
//!
//! The joined table is built at most once per distinct pair of source files.
//! Entries are keyed by the two paths plus a SHA-256 digest of each file's
//! bytes, so editing either export invalidates the cached table.
//!
//! # Example
//!
//! ```rust,no_run
//! use tcga_explorer_data::{DatasetCache, SourcePaths};
//!
//! fn main() -> anyhow::Result<()> {
//!     let cache = DatasetCache::new(256 * 1024 * 1024);
//!     let dataset = cache.get_or_load(&SourcePaths::new("clinical.tsv", "family_history.tsv"))?;
//!     println!("{} joined rows", dataset.table.len());
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tcga_explorer_common::{DataConfig, Result};
use tracing::{debug, info};

use crate::loader::{parse_tsv, read_source, RawTable};
use crate::pipeline::build_joined_table;
use crate::table::Table;

/// Locations of the two exports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourcePaths {
    pub clinical: PathBuf,
    pub family_history: PathBuf,
}

impl SourcePaths {
    pub fn new(clinical: impl Into<PathBuf>, family_history: impl Into<PathBuf>) -> Self {
        Self {
            clinical: clinical.into(),
            family_history: family_history.into(),
        }
    }
}

impl From<&DataConfig> for SourcePaths {
    fn from(config: &DataConfig) -> Self {
        Self::new(&config.clinical_path, &config.family_history_path)
    }
}

/// Cache key: where the data came from and what it contained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceFingerprint {
    pub paths: SourcePaths,
    pub clinical_sha256: String,
    pub family_history_sha256: String,
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// One source file read into memory, with its digest.
struct SourceBytes {
    content: Vec<u8>,
    sha256: String,
}

impl SourceBytes {
    fn read(path: &Path, max_bytes: u64) -> Result<Self> {
        let content = read_source(path, max_bytes)?;
        let sha256 = sha256_hex(&content);
        debug!(path = %path.display(), bytes = content.len(), sha256 = %sha256, "Read source");
        Ok(Self { content, sha256 })
    }
}

/// The typed joined table plus where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub table: Table,
    pub fingerprint: SourceFingerprint,
    pub loaded_at: DateTime<Utc>,
    pub clinical_rows: usize,
    pub family_history_rows: usize,
}

impl Dataset {
    /// Run the pipeline over already-parsed exports.
    pub fn build(fingerprint: SourceFingerprint, clinical: &RawTable, family_history: &RawTable) -> Result<Self> {
        let table = build_joined_table(clinical, family_history)?;
        Ok(Self {
            table,
            fingerprint,
            loaded_at: Utc::now(),
            clinical_rows: clinical.len(),
            family_history_rows: family_history.len(),
        })
    }

    /// Read, fingerprint and process both exports without caching.
    pub fn from_sources(paths: &SourcePaths, max_bytes: u64) -> Result<Self> {
        let (fingerprint, clinical, family) = read_fingerprinted(paths, max_bytes)?;
        let clinical = parse_tsv(&paths.clinical, &clinical.content)?;
        let family = parse_tsv(&paths.family_history, &family.content)?;
        Self::build(fingerprint, &clinical, &family)
    }
}

fn read_fingerprinted(paths: &SourcePaths, max_bytes: u64) -> Result<(SourceFingerprint, SourceBytes, SourceBytes)> {
    let clinical = SourceBytes::read(&paths.clinical, max_bytes)?;
    let family = SourceBytes::read(&paths.family_history, max_bytes)?;
    let fingerprint = SourceFingerprint {
        paths: paths.clone(),
        clinical_sha256: clinical.sha256.clone(),
        family_history_sha256: family.sha256.clone(),
    };
    Ok((fingerprint, clinical, family))
}

/// Memoized pipeline results shared by every page.
#[derive(Debug)]
pub struct DatasetCache {
    entries: RwLock<HashMap<SourceFingerprint, Arc<Dataset>>>,
    max_file_bytes: u64,
}

impl DatasetCache {
    pub fn new(max_file_bytes: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_file_bytes,
        }
    }

    /// Return the dataset for the current content of `paths`, building it
    /// on first use. Files are read once per call for hashing; parsing only
    /// happens on a miss.
    pub fn get_or_load(&self, paths: &SourcePaths) -> Result<Arc<Dataset>> {
        let (fingerprint, clinical, family) = read_fingerprinted(paths, self.max_file_bytes)?;

        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&fingerprint)
        {
            debug!(clinical = %paths.clinical.display(), "Dataset cache hit");
            return Ok(Arc::clone(hit));
        }

        info!(
            clinical = %paths.clinical.display(),
            family_history = %paths.family_history.display(),
            "Dataset cache miss, building joined table"
        );
        let clinical_raw = parse_tsv(&paths.clinical, &clinical.content)?;
        let family_raw = parse_tsv(&paths.family_history, &family.content)?;
        let dataset = Arc::new(Dataset::build(fingerprint.clone(), &clinical_raw, &family_raw)?);

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let stored = entries.entry(fingerprint).or_insert(dataset);
        Ok(Arc::clone(stored))
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(|e| e.into_inner()).clear();
    }
}
