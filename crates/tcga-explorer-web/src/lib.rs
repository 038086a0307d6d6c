//! tcga-explorer-web: HTTP front for TCGA Explorer
//! Serves:
//!   - Landing page (HTML) and dataset summary
//!   - Overview-of-all-cancers chart specs
//!   - Specific-cancer chart specs
//!   - Health check

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
