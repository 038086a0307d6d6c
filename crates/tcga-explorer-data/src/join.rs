//! Left join of family history onto clinical cases, and post-join typing.

use std::collections::HashMap;

use tcga_explorer_common::Result;
use tracing::{debug, info};

use crate::loader::RawTable;
use crate::schema::{
    CASE_ID, CLINICAL_TABLE, FAMILY_COLLISION_PREFIX, FAMILY_HISTORY_TABLE, NUMERIC_COLUMNS,
    RELATIVE_WITH_CANCER_HISTORY,
};
use crate::table::{Table, Value};

/// Left outer join on `case_id`.
///
/// Output order is clinical row order and, within a case, family row order.
/// Cases without family rows appear once with the family columns absent.
/// Empty keys never match. Every `""` in the joined rows becomes absent.
pub fn left_join(clinical: &RawTable, family: &RawTable) -> Result<Table> {
    let left_key = clinical.require_column(CLINICAL_TABLE, CASE_ID)?;
    let right_key = family.require_column(FAMILY_HISTORY_TABLE, CASE_ID)?;

    let right_columns: Vec<usize> = (0..family.headers().len()).filter(|&i| i != right_key).collect();

    let mut columns: Vec<String> = clinical.headers().to_vec();
    for &i in &right_columns {
        let name = &family.headers()[i];
        if clinical.column_index(name).is_some() {
            columns.push(format!("{FAMILY_COLLISION_PREFIX}{name}"));
        } else {
            columns.push(name.clone());
        }
    }

    let mut by_case: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, row) in family.rows().iter().enumerate() {
        let key = row[right_key].as_str();
        if !key.is_empty() {
            by_case.entry(key).or_default().push(idx);
        }
    }
    debug!(n_cases = by_case.len(), "Indexed family-history rows by case");

    let mut rows = Vec::with_capacity(clinical.len());
    for left in clinical.rows() {
        let matches = by_case
            .get(left[left_key].as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        if matches.is_empty() {
            let mut row: Vec<Value> = left.iter().map(|c| Value::from_field(c)).collect();
            row.extend(right_columns.iter().map(|_| Value::Absent));
            rows.push(row);
            continue;
        }
        for &m in matches {
            let right = &family.rows()[m];
            let mut row: Vec<Value> = left.iter().map(|c| Value::from_field(c)).collect();
            row.extend(right_columns.iter().map(|&i| Value::from_field(&right[i])));
            rows.push(row);
        }
    }

    let joined = Table::from_rows(columns, rows)?;
    info!(
        n_clinical = clinical.len(),
        n_family = family.len(),
        n_joined = joined.len(),
        "Joined family history onto clinical"
    );
    Ok(joined)
}

/// Number-typed view of a cell. Numeric text becomes a number, other text
/// is kept as it is.
pub fn parse_number(value: &Value) -> Value {
    match value {
        Value::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => value.clone(),
        },
        other => other.clone(),
    }
}

/// `"yes"` → 1, any other present answer → 0, absent stays absent.
pub fn parse_history_flag(value: &Value) -> Value {
    match value {
        Value::Absent => Value::Absent,
        Value::Text(s) if s.trim().eq_ignore_ascii_case("yes") => Value::Number(1.0),
        Value::Number(n) if *n != 0.0 => Value::Number(1.0),
        _ => Value::Number(0.0),
    }
}

/// Type the numeric columns and the family-history flag of a joined table.
pub fn apply_types(joined: &Table) -> Result<Table> {
    let mut typed = joined.clone();
    for column in NUMERIC_COLUMNS {
        typed = typed.map_column(column, parse_number)?;
    }
    typed.map_column(RELATIVE_WITH_CANCER_HISTORY, parse_history_flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn clinical() -> RawTable {
        raw(
            &["project_id", "case_id", "gender"],
            &[&["TCGA-LUAD", "c1", "female"], &["TCGA-BRCA", "c2", ""], &["TCGA-PRAD", "", "male"]],
        )
    }

    fn family() -> RawTable {
        raw(
            &["case_id", "project_id", "relationship_type"],
            &[
                &["c2", "TCGA-BRCA", "Mother"],
                &["c9", "TCGA-GBM", "Father"],
                &["c2", "TCGA-BRCA", "Sister"],
                &["", "TCGA-PRAD", "Brother"],
            ],
        )
    }

    #[test]
    fn test_collision_is_prefixed() {
        let t = left_join(&clinical(), &family()).unwrap();
        assert_eq!(
            t.columns(),
            &["project_id", "case_id", "gender", "family_project_id", "relationship_type"]
        );
    }

    #[test]
    fn test_row_order_and_cardinality() {
        let t = left_join(&clinical(), &family()).unwrap();
        assert_eq!(t.len(), 4);
        let types: Vec<String> = t
            .column_values("relationship_type")
            .unwrap()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(types, vec!["", "Mother", "Sister", ""]);
        assert_eq!(t.value(1, "case_id"), Some(&Value::text("c2")));
        assert_eq!(t.value(2, "case_id"), Some(&Value::text("c2")));
    }

    #[test]
    fn test_empty_strings_become_absent_on_both_sides() {
        let t = left_join(&clinical(), &family()).unwrap();
        assert_eq!(t.value(1, "gender"), Some(&Value::Absent));
        assert_eq!(t.value(0, "family_project_id"), Some(&Value::Absent));
        assert_eq!(t.value(3, "case_id"), Some(&Value::Absent));
    }

    #[test]
    fn test_empty_key_does_not_match() {
        let t = left_join(&clinical(), &family()).unwrap();
        assert_eq!(t.value(3, "relationship_type"), Some(&Value::Absent));
    }

    #[test]
    fn test_history_flag() {
        assert_eq!(parse_history_flag(&Value::text("yes")), Value::Number(1.0));
        assert_eq!(parse_history_flag(&Value::text("no")), Value::Number(0.0));
        assert_eq!(parse_history_flag(&Value::text("Unknown")), Value::Number(0.0));
        assert_eq!(parse_history_flag(&Value::Absent), Value::Absent);
    }

    #[test]
    fn test_parse_number_keeps_non_numeric_text() {
        assert_eq!(parse_number(&Value::text("2010")), Value::Number(2010.0));
        assert_eq!(parse_number(&Value::text("n/a")), Value::text("n/a"));
        assert_eq!(parse_number(&Value::Absent), Value::Absent);
    }
}
