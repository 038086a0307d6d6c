//! Sentinel cleanup, stage collapsing and projection of the raw exports.
//!
//! Cells stay strings here. The sentinel becomes `""` so that the stage
//! concatenation below never picks up marker text; `""` only turns into
//! `Value::Absent` after the join.

use tcga_explorer_common::Result;
use tracing::{debug, info};

use crate::loader::RawTable;
use crate::schema::{CLINICAL_COLUMNS, CLINICAL_TABLE, FAMILY_HISTORY_COLUMNS, FAMILY_HISTORY_TABLE, STAGE};
use crate::stage::{canonical_stage, is_canonical, stage_candidates};

/// The GDC export's "no value" token.
pub const SENTINEL: &str = "'--";

pub fn replace_sentinel(table: &RawTable) -> RawTable {
    table.map_cells(|cell| {
        if cell.trim() == SENTINEL {
            String::new()
        } else {
            cell.to_string()
        }
    })
}

/// Append the collapsed `stage` column: every candidate staging column
/// concatenated in header order, then remapped to its canonical label.
///
/// Any pre-existing `stage` column is itself a candidate and is replaced.
pub fn collapse_stage(table: &RawTable) -> RawTable {
    let candidates = stage_candidates(table.headers());
    debug!(
        candidates = ?candidates.iter().map(|&i| table.headers()[i].as_str()).collect::<Vec<_>>(),
        "Collapsing stage columns"
    );

    let existing = table.column_index(STAGE);
    let mut headers = table.headers().to_vec();
    if existing.is_none() {
        headers.push(STAGE.to_string());
    }

    let rows = table
        .rows()
        .iter()
        .map(|row| {
            let joined: String = candidates.iter().map(|&i| row[i].as_str()).collect();
            let stage = canonical_stage(&joined);
            let mut out = row.clone();
            match existing {
                Some(i) => out[i] = stage,
                None => out.push(stage),
            }
            out
        })
        .collect();

    let out = RawTable::new(headers, rows);
    if let Some(col) = out.column_index(STAGE) {
        let unlisted = out
            .rows()
            .iter()
            .filter(|r| !r[col].is_empty() && !is_canonical(&r[col]))
            .count();
        debug!(unlisted, "Stage labels outside the canonical vocabulary");
    }
    out
}

/// Clinical export → projected clinical table with `stage`.
pub fn clean_clinical(raw: &RawTable) -> Result<RawTable> {
    let cleaned = collapse_stage(&replace_sentinel(raw));
    let projected = cleaned.project(CLINICAL_TABLE, &CLINICAL_COLUMNS)?;
    info!(
        n_rows = projected.len(),
        n_source_columns = raw.headers().len(),
        "Cleaned clinical table"
    );
    Ok(projected)
}

/// Family-history export → projected family-history table.
pub fn clean_family_history(raw: &RawTable) -> Result<RawTable> {
    let projected = replace_sentinel(raw).project(FAMILY_HISTORY_TABLE, &FAMILY_HISTORY_COLUMNS)?;
    info!(n_rows = projected.len(), "Cleaned family-history table");
    Ok(projected)
}
