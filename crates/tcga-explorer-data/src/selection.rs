//! Linked-selection state for driving/dependent chart pairs.
//!
//! A click on the driving chart moves the pair from `Unselected` to
//! `Selected(value)`; clicking the same value again, or empty space, goes
//! back to `Unselected`. The dependent chart's rows are a pure function of
//! the current state, nothing else is remembered.

use serde::Serialize;
use tcga_explorer_common::Result;

use crate::table::{Table, Value};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Unselected,
    Selected(Value),
}

impl Selection {
    /// Next state after a click. `None` is a click on empty space.
    pub fn click(&self, clicked: Option<Value>) -> Selection {
        match (self, clicked) {
            (_, None) => Selection::Unselected,
            (_, Some(v)) if v.is_absent() => Selection::Unselected,
            (Selection::Selected(current), Some(v)) if *current == v => Selection::Unselected,
            (_, Some(v)) => Selection::Selected(v),
        }
    }

    /// State carried in a request parameter; missing or blank means unselected.
    pub fn from_param(param: Option<&str>) -> Selection {
        match param.map(str::trim) {
            Some(label) if !label.is_empty() => Selection::Selected(Value::text(label)),
            _ => Selection::Unselected,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(v) => Some(v),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }
}

/// A selection bound to the field it selects on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedSelection {
    pub field: String,
    pub selection: Selection,
}

impl LinkedSelection {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            selection: Selection::Unselected,
        }
    }

    pub fn with_selection(field: impl Into<String>, selection: Selection) -> Self {
        Self {
            field: field.into(),
            selection,
        }
    }

    pub fn click(&self, clicked: Option<Value>) -> Self {
        Self {
            field: self.field.clone(),
            selection: self.selection.click(clicked),
        }
    }

    /// Rows of the dependent chart for the current state.
    pub fn apply(&self, table: &Table) -> Result<Table> {
        table.restrict_to_selection(&self.field, &self.selection)
    }
}
