//! tcga-explorer-common: Shared error type and configuration used across all TCGA Explorer crates.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{DataConfig, ExplorerConfig, LimitsConfig, OverviewConfig, WebConfig};
pub use error::{ExplorerError, ReadErrorKind, Result};
