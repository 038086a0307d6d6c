//! tcga-explorer-data: Clinical + family-history data pipeline.
//! Covers everything between the two GDC TSV exports and the chart tables:
//! - TSV loading
//! - Sentinel cleanup and stage collapsing
//! - Left join of family history onto clinical cases
//! - Age derivations and age-group bucketing
//! - Query/filter engine and linked selections
//! - Per-session dataset cache
//! - Page builders (landing, overview, specific cancer)

pub mod cache;
pub mod clean;
pub mod derive;
pub mod join;
pub mod loader;
pub mod pages;
pub mod pipeline;
pub mod schema;
pub mod selection;
pub mod stage;
pub mod table;

pub use cache::{Dataset, DatasetCache, SourceFingerprint, SourcePaths};
pub use derive::AgeGroup;
pub use loader::RawTable;
pub use selection::{LinkedSelection, Selection};
pub use table::{Table, Value};
