//! TCGA Explorer web server
//!
//! Run with: cargo run -p tcga-explorer-web

use anyhow::Context;
use tcga_explorer_common::ExplorerConfig;
use tcga_explorer_data::DatasetCache;
use tcga_explorer_web::{router::build_router, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

const BIND_ENV_VAR: &str = "TCGA_EXPLORER_BIND";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tcga_explorer=debug,info")),
        )
        .init();

    info!("TCGA Explorer starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = ExplorerConfig::load_or_default()?;
    info!(
        clinical = %config.data.clinical_path.display(),
        family_history = %config.data.family_history_path.display(),
        "Configuration loaded"
    );

    // The joined table is built once here and shared by every request.
    let cache = DatasetCache::new(config.limits.max_file_bytes);
    let bind = std::env::var(BIND_ENV_VAR).unwrap_or_else(|_| config.web.bind.clone());
    let state = AppState::load(config, &cache).context("Failed to load the TCGA exports")?;
    info!(n_rows = state.dataset.table.len(), "Dataset ready");

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    info!("Server listening on http://{}", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
