//! Overview-of-all-cancers endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tcga_explorer_data::pages::{overview, timed, OverviewPage, OverviewParams};
use tcga_explorer_data::Selection;

use crate::error::ApiError;
use crate::state::SharedState;

/// Separator for multi-value parameters. Cancer labels contain commas.
pub const MULTI_VALUE_SEPARATOR: char = '|';

#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    /// `|`-separated cancer types. Missing means the configured defaults;
    /// present but empty means no cancer type at all.
    pub cancers: Option<String>,
    pub age_trend: Option<String>,
    pub family: Option<String>,
}

pub fn split_multi(param: &str) -> Vec<String> {
    param
        .split(MULTI_VALUE_SEPARATOR)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

impl From<OverviewQuery> for OverviewParams {
    fn from(query: OverviewQuery) -> Self {
        Self {
            cancers: query.cancers.as_deref().map(split_multi),
            age_trend: Selection::from_param(query.age_trend.as_deref()),
            family: Selection::from_param(query.family.as_deref()),
        }
    }
}

/// GET /api/overview?cancers=A|B&age_trend=X&family=Y
pub async fn api_overview(
    State(state): State<SharedState>,
    Query(query): Query<OverviewQuery>,
) -> Result<Json<OverviewPage>, ApiError> {
    let params = OverviewParams::from(query);
    let defaults = &state.config.overview.default_cancers;
    let page = timed("overview", state.config.limits.slow_query_ms, || {
        overview::build(&state.dataset.table, &params, defaults)
    })?;
    Ok(Json(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcga_explorer_data::Value;

    #[test]
    fn test_split_multi_keeps_commas() {
        assert_eq!(split_multi("Lung, NOS|Breast, NOS"), vec!["Lung, NOS", "Breast, NOS"]);
        assert_eq!(split_multi(" Bone marrow | "), vec!["Bone marrow"]);
        assert!(split_multi("").is_empty());
    }

    #[test]
    fn test_query_to_params() {
        let params = OverviewParams::from(OverviewQuery {
            cancers: None,
            age_trend: Some("Lung, NOS".to_string()),
            family: Some(String::new()),
        });
        assert_eq!(params.cancers, None);
        assert_eq!(params.age_trend, Selection::Selected(Value::text("Lung, NOS")));
        assert_eq!(params.family, Selection::Unselected);
    }
}
