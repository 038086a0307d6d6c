//! Declarative chart specs handed to the renderer.
//!
//! A spec names the mark, the field encodings and the tidy table to draw.
//! Colours, sizes and layout are left to the renderer.

use serde::Serialize;

use crate::selection::Selection;
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Line,
    Bar,
    Boxplot,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Nominal,
    Ordinal,
    Quantitative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    Count,
    Sum,
    Mean,
}

/// One channel of a chart (x, y, colour or a tooltip entry).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Encoding {
    /// `None` only for a bare `count` aggregate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<Aggregate>,
    pub title: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub log_scale: bool,
    /// Sort categories by the y value, largest first.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sort_descending: bool,
    /// Explicit category order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<String>,
}

impl Encoding {
    pub fn field(name: &str, kind: FieldKind, title: &str) -> Self {
        Self {
            field: Some(name.to_string()),
            kind,
            aggregate: None,
            title: title.to_string(),
            log_scale: false,
            sort_descending: false,
            order: Vec::new(),
        }
    }

    pub fn nominal(name: &str, title: &str) -> Self {
        Self::field(name, FieldKind::Nominal, title)
    }

    pub fn ordinal(name: &str, title: &str) -> Self {
        Self::field(name, FieldKind::Ordinal, title)
    }

    pub fn quantitative(name: &str, title: &str) -> Self {
        Self::field(name, FieldKind::Quantitative, title)
    }

    /// Row count per group.
    pub fn count(title: &str) -> Self {
        Self {
            field: None,
            kind: FieldKind::Quantitative,
            aggregate: Some(Aggregate::Count),
            title: title.to_string(),
            log_scale: false,
            sort_descending: false,
            order: Vec::new(),
        }
    }

    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    pub fn log_scale(mut self) -> Self {
        self.log_scale = true;
        self
    }

    pub fn sort_descending(mut self) -> Self {
        self.sort_descending = true;
        self
    }

    pub fn order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = order.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRole {
    /// Clicks on this chart change the selection.
    Driver,
    /// This chart's data is already filtered by the selection.
    Dependent,
}

/// Ties a chart to one side of a linked pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionBinding {
    /// Query parameter carrying the selection for this pair.
    pub param: String,
    pub role: SelectionRole,
    /// Field the selection filters on.
    pub field: String,
    pub selection: Selection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: String,
    pub title: String,
    pub mark: Mark,
    pub x: Encoding,
    pub y: Encoding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Encoding>,
    pub tooltip: Vec<Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionBinding>,
    pub data: Table,
}

impl ChartSpec {
    pub fn new(id: &str, title: &str, mark: Mark, x: Encoding, y: Encoding, data: Table) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            mark,
            x,
            y,
            color: None,
            tooltip: Vec::new(),
            selection: None,
            data,
        }
    }

    pub fn color(mut self, color: Encoding) -> Self {
        self.color = Some(color);
        self
    }

    pub fn tooltip(mut self, tooltip: Vec<Encoding>) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn driver(self, param: &str, field: &str, selection: &Selection) -> Self {
        self.bind(param, SelectionRole::Driver, field, selection)
    }

    pub fn dependent(self, param: &str, field: &str, selection: &Selection) -> Self {
        self.bind(param, SelectionRole::Dependent, field, selection)
    }

    fn bind(mut self, param: &str, role: SelectionRole, field: &str, selection: &Selection) -> Self {
        self.selection = Some(SelectionBinding {
            param: param.to_string(),
            role,
            field: field.to_string(),
            selection: selection.clone(),
        });
        self
    }
}

/// A headed group of charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub charts: Vec<ChartSpec>,
}

impl Section {
    pub fn new(heading: &str, charts: Vec<ChartSpec>) -> Self {
        Self {
            heading: heading.to_string(),
            charts,
        }
    }

    pub fn chart(&self, id: &str) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;
    use serde_json::json;

    #[test]
    fn test_count_encoding_serializes_without_field() {
        let enc = Encoding::count("Count of records").log_scale();
        assert_eq!(
            serde_json::to_value(&enc).unwrap(),
            json!({
                "kind": "quantitative",
                "aggregate": "count",
                "title": "Count of records",
                "log_scale": true
            })
        );
    }

    #[test]
    fn test_chart_spec_json_shape() {
        let data = Table::from_rows(["stage"], vec![vec![Value::text("Stage I")]]).unwrap();
        let chart = ChartSpec::new(
            "stage_gender",
            "Cancer stage by gender",
            Mark::Bar,
            Encoding::ordinal("stage", "Cancer stage"),
            Encoding::count("Count"),
            data,
        )
        .driver("gender_stage", "stage", &Selection::Selected(Value::text("Stage I")));

        let v = serde_json::to_value(&chart).unwrap();
        assert_eq!(v["mark"], "bar");
        assert_eq!(v["x"]["field"], "stage");
        assert_eq!(v["selection"]["role"], "driver");
        assert_eq!(v["selection"]["selection"], json!({"state": "selected", "value": "Stage I"}));
        assert_eq!(v["data"]["rows"], json!([["Stage I"]]));
        assert!(v.get("color").is_none());
    }
}
