//! Configuration loading for TCGA Explorer.
//! Reads tcga-explorer.toml from the current directory or the path in the
//! TCGA_EXPLORER_CONFIG env var.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};

pub const CONFIG_ENV_VAR: &str = "TCGA_EXPLORER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "tcga-explorer.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub overview: OverviewConfig,
    #[serde(default)]
    pub web: WebConfig,
}

// ── Data Sources ──────────────────────────────────────────────────────────────

/// Locations of the two GDC exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_clinical_path")]
    pub clinical_path: PathBuf,
    #[serde(default = "default_family_history_path")]
    pub family_history_path: PathBuf,
}

fn default_clinical_path()       -> PathBuf { PathBuf::from("clinical.tsv") }
fn default_family_history_path() -> PathBuf { PathBuf::from("family_history.tsv") }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            clinical_path: default_clinical_path(),
            family_history_path: default_family_history_path(),
        }
    }
}

// ── Limits ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Source files above this size are rejected before parsing.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Page computations slower than this are logged as warnings.
    #[serde(default = "default_slow_query_ms")]
    pub slow_query_ms: u64,
}

fn default_max_file_bytes() -> u64 { 256 * 1024 * 1024 }
fn default_slow_query_ms()  -> u64 { 500 }

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            slow_query_ms: default_slow_query_ms(),
        }
    }
}

// ── Overview Page ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewConfig {
    /// Cancer types pre-selected in the overview multi-select.
    #[serde(default = "default_cancers")]
    pub default_cancers: Vec<String>,
}

fn default_cancers() -> Vec<String> {
    [
        "Bone marrow",
        "Breast, NOS",
        "Cervix uteri",
        "Kidney, NOS",
        "Endometrium",
        "Upper lobe, lung",
        "Prostate gland",
        "Testis, NOS",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self { default_cancers: default_cancers() }
    }
}

// ── Web ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:8501".to_string() }

impl Default for WebConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

mod tests;

impl ExplorerConfig {
    /// Load configuration from tcga-explorer.toml.
    /// Checks TCGA_EXPLORER_CONFIG env var first, then current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        if !Path::new(&path).exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy tcga-explorer.example.toml to tcga-explorer.toml and edit it.",
                path
            );
        }

        Self::from_file(Path::new(&path))
    }

    /// Load from an explicit TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`ExplorerConfig::load`], but falls back to defaults when no file
    /// is present. A file that exists but does not parse is still an error.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        if Path::new(&path).exists() {
            Self::from_file(Path::new(&path))
        } else {
            tracing::warn!(config = %path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data.clinical_path.as_os_str().is_empty() {
            return Err(ExplorerError::Config("data.clinical_path is empty".to_string()));
        }
        if self.data.family_history_path.as_os_str().is_empty() {
            return Err(ExplorerError::Config("data.family_history_path is empty".to_string()));
        }
        if self.limits.max_file_bytes == 0 {
            return Err(ExplorerError::Config("limits.max_file_bytes must be positive".to_string()));
        }
        Ok(())
    }
}
