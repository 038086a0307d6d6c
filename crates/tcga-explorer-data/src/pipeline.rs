//! Raw exports → typed joined table.

use std::time::Instant;

use tcga_explorer_common::Result;
use tracing::info;

use crate::clean::{clean_clinical, clean_family_history};
use crate::join::{apply_types, left_join};
use crate::loader::RawTable;
use crate::table::Table;

/// Clean both exports, join them and type the result.
pub fn build_joined_table(clinical: &RawTable, family_history: &RawTable) -> Result<Table> {
    let start = Instant::now();

    let clinical = clean_clinical(clinical)?;
    let family_history = clean_family_history(family_history)?;
    let joined = apply_types(&left_join(&clinical, &family_history)?)?;

    info!(
        n_rows = joined.len(),
        n_columns = joined.columns().len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Built joined table"
    );
    Ok(joined)
}
