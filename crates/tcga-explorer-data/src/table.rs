//! Immutable in-memory table and the query/filter operations over it.
//!
//! Every operation borrows its input and returns a new [`Table`]; nothing is
//! mutated in place, so one query result can feed several charts.
//! An empty result is a valid table, never an error.

use std::fmt;

use serde::{Serialize, Serializer};
use tcga_explorer_common::{ExplorerError, Result};

use crate::selection::Selection;

/// One cell. `Absent` is the single "no value" marker.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Absent,
    Text(String),
    Number(f64),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Empty strings become `Absent`.
    pub fn from_field(s: &str) -> Self {
        if s.is_empty() {
            Value::Absent
        } else {
            Value::Text(s.to_string())
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the cell; numeric text is parsed, anything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Does this cell match a label chosen in a widget or chart click?
    pub fn matches_label(&self, label: &str) -> bool {
        match self {
            Value::Absent => false,
            Value::Text(s) => s == label,
            Value::Number(n) => label.trim().parse::<f64>().map(|l| l == *n).unwrap_or(false),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Absent => serializer.serialize_none(),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

/// Borrowed view of one row, addressed by column name.
pub struct RowView<'a> {
    columns: &'a [String],
    cells: &'a [Value],
}

impl<'a> RowView<'a> {
    /// Cell under `column`; unknown columns read as absent.
    pub fn get(&self, column: &str) -> &'a Value {
        static ABSENT: Value = Value::Absent;
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.cells.get(i))
            .unwrap_or(&ABSENT)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build from rows, checking every row has one cell per column.
    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns.len()) {
            return Err(ExplorerError::Shape {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    fn require(&self, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| ExplorerError::schema("query", column))
    }

    pub fn row(&self, index: usize) -> Option<RowView<'_>> {
        self.rows.get(index).map(|cells| RowView {
            columns: &self.columns,
            cells,
        })
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(move |cells| RowView {
            columns: &self.columns,
            cells,
        })
    }

    /// Cell at (`row`, `column`), if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn column_values(&self, column: &str) -> Result<Vec<&Value>> {
        let col = self.require(column)?;
        Ok(self.rows.iter().map(|r| &r[col]).collect())
    }

    // ── Query operations ─────────────────────────────────────────────────────

    /// Keep only `columns`, in the given order.
    pub fn project(&self, columns: &[&str]) -> Result<Table> {
        let indices = columns
            .iter()
            .map(|c| self.require(c))
            .collect::<Result<Vec<_>>>()?;
        let rows = self
            .rows
            .iter()
            .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
            .collect();
        Ok(Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Drop every row holding an absent value in any column. Charts need
    /// complete cases for exactly the fields they plot, so callers project first.
    pub fn drop_missing(&self) -> Table {
        self.filter_rows(|r| r.iter().all(|v| !v.is_absent()))
    }

    /// Keep rows whose `column` value is one of `values`.
    pub fn restrict_to(&self, column: &str, values: &[Value]) -> Result<Table> {
        let col = self.require(column)?;
        Ok(self.filter_rows(|r| !r[col].is_absent() && values.contains(&r[col])))
    }

    /// Keep rows matching the value picked on a companion chart.
    /// `Unselected` passes every row through.
    pub fn restrict_to_selection(&self, column: &str, selection: &Selection) -> Result<Table> {
        let col = self.require(column)?;
        match selection.value() {
            None => Ok(self.clone()),
            Some(selected) => Ok(self.filter_rows(|r| value_matches(&r[col], selected))),
        }
    }

    /// Replace absent cells of `column` with `fill`.
    pub fn fill_absent(&self, column: &str, fill: Value) -> Result<Table> {
        let col = self.require(column)?;
        let mut out = self.clone();
        for row in &mut out.rows {
            if row[col].is_absent() {
                row[col] = fill.clone();
            }
        }
        Ok(out)
    }

    /// Add (or replace) `column`, computed per row from the existing cells.
    pub fn with_column<F>(&self, column: &str, derive: F) -> Table
    where
        F: Fn(&RowView<'_>) -> Value,
    {
        let existing = self.column_index(column);
        let mut columns = self.columns.clone();
        if existing.is_none() {
            columns.push(column.to_string());
        }
        let rows = self
            .iter_rows()
            .map(|view| {
                let derived = derive(&view);
                let mut cells = view.cells.to_vec();
                match existing {
                    Some(i) => cells[i] = derived,
                    None => cells.push(derived),
                }
                cells
            })
            .collect();
        Table { columns, rows }
    }

    /// Rewrite every cell of `column` through `map`.
    pub fn map_column<F>(&self, column: &str, map: F) -> Result<Table>
    where
        F: Fn(&Value) -> Value,
    {
        let col = self.require(column)?;
        let mut out = self.clone();
        for row in &mut out.rows {
            row[col] = map(&row[col]);
        }
        Ok(out)
    }

    /// Distinct present values of `column` in order of first appearance.
    pub fn distinct(&self, column: &str) -> Result<Vec<Value>> {
        let col = self.require(column)?;
        let mut seen: Vec<Value> = Vec::new();
        for row in &self.rows {
            let v = &row[col];
            if !v.is_absent() && !seen.contains(v) {
                seen.push(v.clone());
            }
        }
        Ok(seen)
    }

    fn filter_rows<P>(&self, keep: P) -> Table
    where
        P: Fn(&[Value]) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

fn value_matches(cell: &Value, selected: &Value) -> bool {
    match selected {
        Value::Text(label) => cell.matches_label(label),
        other => cell == other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Table {
        Table::from_rows(
            ["tissue", "gender", "year"],
            vec![
                vec!["Lung, NOS".into(), "female".into(), Value::Number(2010.0)],
                vec!["Breast, NOS".into(), Value::Absent, Value::Number(2011.0)],
                vec!["Lung, NOS".into(), "male".into(), Value::Absent],
                vec![Value::Absent, "male".into(), Value::Number(2012.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let err = Table::from_rows(["a", "b"], vec![vec![Value::Absent]]).unwrap_err();
        assert!(matches!(err, ExplorerError::Shape { row: 0, expected: 2, found: 1 }));
    }

    #[test]
    fn test_project_reorders_and_rejects_unknown() {
        let t = sample();
        let p = t.project(&["year", "tissue"]).unwrap();
        assert_eq!(p.columns(), &["year".to_string(), "tissue".to_string()]);
        assert_eq!(p.rows()[0], vec![Value::Number(2010.0), Value::text("Lung, NOS")]);
        assert!(matches!(t.project(&["stage"]), Err(ExplorerError::Schema { .. })));
    }

    #[test]
    fn test_drop_missing_keeps_complete_cases_only() {
        let t = sample();
        assert_eq!(t.drop_missing().len(), 1);
        // Projection first: gender-only view keeps every row with a gender.
        assert_eq!(t.project(&["gender"]).unwrap().drop_missing().len(), 3);
    }

    #[test]
    fn test_restrict_to_value_set() {
        let t = sample();
        let lung = t.restrict_to("tissue", &[Value::text("Lung, NOS")]).unwrap();
        assert_eq!(lung.len(), 2);
        let none = t.restrict_to("tissue", &[]).unwrap();
        assert!(none.is_empty());
        assert_eq!(none.columns(), t.columns());
    }

    #[test]
    fn test_unselected_is_identity() {
        let t = sample();
        assert_eq!(t.restrict_to_selection("tissue", &Selection::Unselected).unwrap(), t);
    }

    #[test]
    fn test_selection_matches_numbers_by_label() {
        let t = sample();
        let sel = Selection::Selected(Value::text("2011"));
        let out = t.restrict_to_selection("year", &sel).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.value(0, "tissue"), Some(&Value::text("Breast, NOS")));
    }

    #[test]
    fn test_operations_leave_input_untouched() {
        let t = sample();
        let before = t.clone();
        let _ = t.fill_absent("gender", Value::text("unknown")).unwrap();
        let _ = t.with_column("flag", |_| Value::Number(1.0));
        let _ = t.drop_missing();
        assert_eq!(t, before);
    }

    #[test]
    fn test_with_column_reads_by_name() {
        let t = sample().with_column("next_year", |row| {
            row.get("year").as_f64().map(|y| Value::Number(y + 1.0)).unwrap_or_default()
        });
        assert_eq!(t.value(0, "next_year"), Some(&Value::Number(2011.0)));
        assert_eq!(t.value(2, "next_year"), Some(&Value::Absent));
    }

    #[test]
    fn test_distinct_in_first_appearance_order() {
        let values = sample().distinct("tissue").unwrap();
        assert_eq!(values, vec![Value::text("Lung, NOS"), Value::text("Breast, NOS")]);
    }

    #[test]
    fn test_absent_serializes_as_null() {
        let json = serde_json::to_string(&vec![Value::Absent, Value::text("x"), Value::Number(1.5)]).unwrap();
        assert_eq!(json, r#"[null,"x",1.5]"#);
    }

    #[test]
    fn test_display_drops_integral_fraction() {
        assert_eq!(Value::Number(2010.0).to_string(), "2010");
        assert_eq!(Value::Number(20.5).to_string(), "20.5");
        assert_eq!(Value::Absent.to_string(), "");
    }
}
