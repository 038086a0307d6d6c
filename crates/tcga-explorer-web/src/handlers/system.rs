//! Health check and widget options.

use axum::{extract::State, Json};
use serde::Serialize;
use tcga_explorer_data::pages::cancer_options;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub joined_rows: usize,
    pub clinical_sha256: String,
    pub family_history_sha256: String,
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let fingerprint = &state.dataset.fingerprint;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        joined_rows: state.dataset.table.len(),
        clinical_sha256: fingerprint.clinical_sha256.clone(),
        family_history_sha256: fingerprint.family_history_sha256.clone(),
    })
}

#[derive(Debug, Serialize)]
pub struct CancerOptions {
    pub options: Vec<String>,
    /// Configured overview defaults present in the data.
    pub overview_defaults: Vec<String>,
}

/// GET /api/cancers: options for the cancer-type widgets
pub async fn api_cancers(State(state): State<SharedState>) -> Result<Json<CancerOptions>, ApiError> {
    let options = cancer_options(&state.dataset.table)?;
    let overview_defaults = tcga_explorer_data::pages::overview::default_selection(
        &options,
        &state.config.overview.default_cancers,
    );
    Ok(Json(CancerOptions {
        options,
        overview_defaults,
    }))
}
