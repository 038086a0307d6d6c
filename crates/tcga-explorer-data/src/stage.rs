//! Canonical cancer-stage labels.
//!
//! The collapsed `stage` field concatenates several staging columns, so the
//! same stage shows up as `Stage 1`, `I`, or a doubled `Stage IIAStage IIA`.
//! The remap table folds those variants into the canonical vocabulary by
//! exact string match. Labels not listed pass through unchanged.

use lazy_static::lazy_static;
use regex::Regex;

use crate::schema::EXCLUDED_STAGE_COLUMNS;

pub const NOT_REPORTED: &str = "Not Reported";

/// Ordered `(variant, canonical)` pairs. Composite fixes such as
/// `Not ReportedNot Reported` come before the general doubled forms.
pub const STAGE_REMAP: [(&str, &str); 13] = [
    ("Stage 1", "Stage I"),
    ("Stage 2", "Stage II"),
    ("Stage 3", "Stage III"),
    ("Stage 4", "Stage IV"),
    ("I", "Stage I"),
    ("II", "Stage II"),
    ("III", "Stage III"),
    ("IV", "Stage IV"),
    ("Unknown", NOT_REPORTED),
    ("Not ReportedNot Reported", NOT_REPORTED),
    ("Stage IIAStage IIA", "Stage IIA"),
    ("Stage IIICStage IIIC", "Stage IIIC"),
    ("Stage IIBStage IIB", "Stage IIB"),
];

lazy_static! {
    /// Column names treated as staging columns.
    static ref STAGE_COLUMN: Regex = Regex::new(r"stage").expect("valid stage column regex");
    /// Canonical labels: `Stage` + roman numeral + optional sub-stage letter(s).
    static ref CANONICAL_STAGE: Regex =
        Regex::new(r"^Stage (0|IS|I{1,3}|IV)([A-C][1-3]?)?$").expect("valid canonical stage regex");
}

/// Map one label through the remap table, applying every rule in order.
pub fn canonical_stage(label: &str) -> String {
    let mut current = label;
    for (variant, canonical) in STAGE_REMAP.iter() {
        if current == *variant {
            current = canonical;
        }
    }
    current.to_string()
}

/// Is `column` one of the general staging columns merged into `stage`?
pub fn is_stage_candidate(column: &str) -> bool {
    STAGE_COLUMN.is_match(column) && !EXCLUDED_STAGE_COLUMNS.contains(&column)
}

/// Stage-candidate columns of a header, in header order.
pub fn stage_candidates(headers: &[String]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| is_stage_candidate(h))
        .map(|(i, _)| i)
        .collect()
}

/// Is `label` in the canonical vocabulary (`Stage I`..`Stage IV`, lettered
/// sub-stages, `Not Reported`)? Unlisted variants fail this check and are
/// worth surfacing when validating a new export.
pub fn is_canonical(label: &str) -> bool {
    label == NOT_REPORTED || CANONICAL_STAGE.is_match(label)
}
