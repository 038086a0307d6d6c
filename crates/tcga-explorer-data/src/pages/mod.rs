//! Page builders.
//!
//! Each page is a pure function of the shared joined table and the page's
//! inputs (widget values and chart selections). Nothing is cached per page;
//! every request recomputes its charts from the shared table.

pub mod chart;
pub mod landing;
pub mod overview;
pub mod specific;

use std::time::Instant;

use tcga_explorer_common::Result;
use tracing::{debug, warn};

use crate::schema::TISSUE_OR_ORGAN_OF_ORIGIN;
use crate::table::Table;

pub use chart::{Aggregate, ChartSpec, Encoding, FieldKind, Mark, Section, SelectionBinding, SelectionRole};
pub use landing::{LandingPage, DatasetSummary};
pub use overview::{OverviewPage, OverviewParams};
pub use specific::{SpecificPage, SpecificParams};

/// Cancer types offered by the page widgets: distinct tissue/organ of origin
/// values in order of first appearance.
pub fn cancer_options(table: &Table) -> Result<Vec<String>> {
    Ok(table
        .distinct(TISSUE_OR_ORGAN_OF_ORIGIN)?
        .iter()
        .map(|v| v.to_string())
        .collect())
}

/// Run a page computation, warning when it takes longer than `slow_query_ms`.
pub fn timed<T, F>(page: &str, slow_query_ms: u64, build: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let start = Instant::now();
    let result = build();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    if elapsed_ms > slow_query_ms {
        warn!(page, elapsed_ms, slow_query_ms, "Slow page computation");
    } else {
        debug!(page, elapsed_ms, "Page computed");
    }
    result
}
