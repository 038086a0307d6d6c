//! Specific-cancer endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tcga_explorer_data::pages::{specific, timed, SpecificPage, SpecificParams};
use tcga_explorer_data::Selection;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct SpecificQuery {
    pub cancer: Option<String>,
    pub gender_stage: Option<String>,
    pub ethnicity_stage: Option<String>,
}

impl From<SpecificQuery> for SpecificParams {
    fn from(query: SpecificQuery) -> Self {
        Self {
            cancer: query
                .cancer
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            gender_stage: Selection::from_param(query.gender_stage.as_deref()),
            ethnicity_stage: Selection::from_param(query.ethnicity_stage.as_deref()),
        }
    }
}

/// GET /api/specific?cancer=C&gender_stage=S&ethnicity_stage=S
pub async fn api_specific(
    State(state): State<SharedState>,
    Query(query): Query<SpecificQuery>,
) -> Result<Json<SpecificPage>, ApiError> {
    let params = SpecificParams::from(query);
    let page = timed("specific", state.config.limits.slow_query_ms, || {
        specific::build(&state.dataset.table, &params)
    })?;
    Ok(Json(page))
}
