//! Error responses for the JSON API.
//!
//! Loader, schema and config failures abort the page and come back as a 500
//! with a JSON `{"error": ...}` body. Empty results are not errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tcga_explorer_common::ExplorerError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub ExplorerError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Page computation failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_error_maps_to_500() {
        let response = ApiError::from(ExplorerError::schema("clinical", "case_id")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
