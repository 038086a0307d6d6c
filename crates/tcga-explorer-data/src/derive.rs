//! Age derivations and age-group bucketing.

use std::fmt;

use serde::Serialize;
use tcga_explorer_common::{ExplorerError, Result};
use tracing::{debug, warn};

use crate::schema::{
    AGE_AT_DIAGNOSIS, AGE_AT_DIAGNOSIS_YEAR, AGE_GROUP, AGE_OF_DEATH, YEAR_OF_BIRTH, YEAR_OF_DEATH,
};
use crate::table::{RowView, Table, Value};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Four buckets over `[0, ∞)` plus `Unknown` for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AgeGroup {
    #[serde(rename = "Ages 0-19")]
    Ages0To19,
    #[serde(rename = "Ages 20-39")]
    Ages20To39,
    #[serde(rename = "Ages 40-59")]
    Ages40To59,
    #[serde(rename = "Over 60")]
    Over60,
    Unknown,
}

impl AgeGroup {
    /// Bucket an age in years. Negative, NaN and infinite ages are `Unknown`.
    pub fn from_years(age: f64) -> AgeGroup {
        if !age.is_finite() || age < 0.0 {
            AgeGroup::Unknown
        } else if age < 20.0 {
            AgeGroup::Ages0To19
        } else if age < 40.0 {
            AgeGroup::Ages20To39
        } else if age < 60.0 {
            AgeGroup::Ages40To59
        } else {
            AgeGroup::Over60
        }
    }

    pub fn from_value(age: &Value) -> AgeGroup {
        age.as_f64().map(AgeGroup::from_years).unwrap_or(AgeGroup::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Ages0To19 => "Ages 0-19",
            AgeGroup::Ages20To39 => "Ages 20-39",
            AgeGroup::Ages40To59 => "Ages 40-59",
            AgeGroup::Over60 => "Over 60",
            AgeGroup::Unknown => "Unknown",
        }
    }

    /// Buckets in axis order.
    pub fn ordered() -> [AgeGroup; 4] {
        [
            AgeGroup::Ages0To19,
            AgeGroup::Ages20To39,
            AgeGroup::Ages40To59,
            AgeGroup::Over60,
        ]
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn age_years(row: &RowView<'_>) -> Value {
    match row.get(AGE_AT_DIAGNOSIS).as_f64() {
        Some(days) => Value::Number(days / DAYS_PER_YEAR),
        None => Value::Absent,
    }
}

fn death_age(row: &RowView<'_>) -> Value {
    match (row.get(YEAR_OF_DEATH).as_f64(), row.get(YEAR_OF_BIRTH).as_f64()) {
        (Some(death), Some(birth)) => Value::Number(death - birth),
        _ => Value::Absent,
    }
}

/// Warn when a derivation produced nothing for a non-empty table. Individual
/// absent results are expected and drop out at `drop_missing`.
fn check_coverage(table: &Table, field: &str, inputs: &str) {
    let Some(col) = table.column_index(field) else {
        return;
    };
    if table.is_empty() {
        return;
    }
    let derived = table.rows().iter().filter(|r| !r[col].is_absent()).count();
    debug!(field, derived, n_rows = table.len(), "Derived column");
    if derived == 0 {
        let err = ExplorerError::Derivation {
            field: field.to_string(),
            reason: format!("no row has numeric {inputs}"),
        };
        warn!(error = %err, "Derivation produced no values");
    }
}

/// Add `age_at_diagnosis_year` (days / 365).
pub fn with_age_at_diagnosis_year(table: &Table) -> Table {
    let out = table.with_column(AGE_AT_DIAGNOSIS_YEAR, age_years);
    check_coverage(&out, AGE_AT_DIAGNOSIS_YEAR, AGE_AT_DIAGNOSIS);
    out
}

/// Add `age_of_death` (year of death minus year of birth).
pub fn with_age_of_death(table: &Table) -> Table {
    let out = table.with_column(AGE_OF_DEATH, death_age);
    check_coverage(&out, AGE_OF_DEATH, "year_of_death and year_of_birth");
    out
}

/// Add `age_group`, bucketed from `age_at_diagnosis_year`.
pub fn with_age_group(table: &Table) -> Table {
    table.with_column(AGE_GROUP, |row| {
        Value::text(AgeGroup::from_value(row.get(AGE_AT_DIAGNOSIS_YEAR)).label())
    })
}

/// Keep rows with a known age group.
pub fn drop_unknown_age_groups(table: &Table) -> Result<Table> {
    let known: Vec<Value> = AgeGroup::ordered()
        .iter()
        .map(|g| Value::text(g.label()))
        .collect();
    table.restrict_to(AGE_GROUP, &known)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ages(days: &[Value]) -> Table {
        Table::from_rows(
            [AGE_AT_DIAGNOSIS],
            days.iter().map(|d| vec![d.clone()]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(AgeGroup::from_years(0.0), AgeGroup::Ages0To19);
        assert_eq!(AgeGroup::from_years(19.99), AgeGroup::Ages0To19);
        assert_eq!(AgeGroup::from_years(20.0), AgeGroup::Ages20To39);
        assert_eq!(AgeGroup::from_years(39.999), AgeGroup::Ages20To39);
        assert_eq!(AgeGroup::from_years(40.0), AgeGroup::Ages40To59);
        assert_eq!(AgeGroup::from_years(60.0), AgeGroup::Over60);
        assert_eq!(AgeGroup::from_years(200.0), AgeGroup::Over60);
    }

    #[test]
    fn test_age_group_unknown_inputs() {
        assert_eq!(AgeGroup::from_years(-1.0), AgeGroup::Unknown);
        assert_eq!(AgeGroup::from_years(f64::NAN), AgeGroup::Unknown);
        assert_eq!(AgeGroup::from_years(f64::INFINITY), AgeGroup::Unknown);
        assert_eq!(AgeGroup::from_value(&Value::Absent), AgeGroup::Unknown);
        assert_eq!(AgeGroup::from_value(&Value::text("n/a")), AgeGroup::Unknown);
    }

    #[test]
    fn test_age_group_serializes_as_label() {
        assert_eq!(serde_json::to_string(&AgeGroup::Over60).unwrap(), r#""Over 60""#);
        assert_eq!(AgeGroup::Ages20To39.to_string(), "Ages 20-39");
    }

    #[test]
    fn test_age_in_years() {
        let t = with_age_at_diagnosis_year(&ages(&[Value::Number(7300.0), Value::Absent]));
        assert_eq!(t.value(0, AGE_AT_DIAGNOSIS_YEAR), Some(&Value::Number(20.0)));
        assert_eq!(t.value(1, AGE_AT_DIAGNOSIS_YEAR), Some(&Value::Absent));
    }

    #[test]
    fn test_age_of_death_needs_both_years() {
        let t = Table::from_rows(
            [YEAR_OF_BIRTH, YEAR_OF_DEATH],
            vec![
                vec![Value::Number(1940.0), Value::Number(2012.0)],
                vec![Value::Number(1950.0), Value::Absent],
            ],
        )
        .unwrap();
        let t = with_age_of_death(&t);
        assert_eq!(t.value(0, AGE_OF_DEATH), Some(&Value::Number(72.0)));
        assert_eq!(t.value(1, AGE_OF_DEATH), Some(&Value::Absent));
    }

    #[test]
    fn test_unknown_age_groups_dropped() {
        let t = ages(&[Value::Number(7300.0), Value::Absent, Value::Number(-365.0), Value::Number(25550.0)]);
        let t = with_age_group(&with_age_at_diagnosis_year(&t));
        let labels: Vec<String> = t.column_values(AGE_GROUP).unwrap().iter().map(|v| v.to_string()).collect();
        assert_eq!(labels, vec!["Ages 20-39", "Unknown", "Unknown", "Over 60"]);

        let kept = drop_unknown_age_groups(&t).unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.columns(), t.columns());
    }

    #[test]
    fn test_all_failed_derivation_is_not_fatal() {
        let t = with_age_at_diagnosis_year(&ages(&[Value::text("n/a"), Value::Absent]));
        assert_eq!(t.len(), 2);
        assert!(t.drop_missing().is_empty());
    }
}
