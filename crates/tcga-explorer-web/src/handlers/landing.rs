//! Landing page: introduction and dataset summary.

use axum::{extract::State, response::Html, Json};
use tcga_explorer_data::pages::{landing, timed, LandingPage};

use crate::error::ApiError;
use crate::state::SharedState;

fn build(state: &SharedState) -> Result<LandingPage, ApiError> {
    let page = timed("landing", state.config.limits.slow_query_ms, || {
        landing::build(&state.dataset)
    })?;
    Ok(page)
}

/// GET /: landing page as HTML
pub async fn landing_page(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    Ok(Html(render_landing(&build(&state)?)))
}

/// GET /api/landing: landing page content as JSON
pub async fn api_landing(State(state): State<SharedState>) -> Result<Json<LandingPage>, ApiError> {
    Ok(Json(build(&state)?))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_landing(page: &LandingPage) -> String {
    let s = &page.summary;
    let stats = [
        ("Cases", s.cases),
        ("Cancer types", s.cancer_types),
        ("Family-history records", s.family_history_rows),
        ("Joined rows", s.joined_rows),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            r#"
        <div class="stat-card">
            <div class="stat-value">{}</div>
            <div class="stat-label">{}</div>
        </div>"#,
            value, label
        )
    })
    .collect::<String>();

    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>TCGA Explorer</title>
</head>
<body>
<main class="main-content">
    <div class="page-header">
        <h1 class="page-title">{title}</h1>
        <p class="text-muted">{intro}</p>
        <p>The data is publicly available at the <a href="{url}">GDC data portal</a> ({url}).</p>
    </div>

    <div class="stats-grid">{stats}
    </div>

    <nav class="page-links">
        <a href="/api/overview">Overview of all cancers</a>
        <a href="/api/specific">Explore a specific cancer</a>
    </nav>

    <p class="text-muted small">Dataset loaded {loaded_at}</p>
</main>
</body>
</html>"#,
        title = escape_html(&page.title),
        intro = escape_html(&page.intro),
        url = escape_html(&page.data_portal_url),
        stats = stats,
        loaded_at = s.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}
