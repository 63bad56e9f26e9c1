//! Router and request handlers

use crate::badge::BadgeClient;
use crate::config;
use crate::score::cache::ReportCache;
use crate::score::error::CacheError;
use crate::score::report::Scorer;
use axum::{
    Extension, Json, Router,
    extract::Query,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;
use url::Url;

/// Shared state behind every handler
pub struct AppState {
    pub cache: ReportCache<Scorer>,
    pub badge: BadgeClient,
}

#[derive(Debug, Deserialize)]
struct ScoreQuery {
    url: Option<String>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/dependencies_score", get(dependencies_score))
        .route("/badge.svg", get(badge_svg))
        .fallback(handle_404)
        .layer(Extension(state))
}

/// The url query parameter must be an absolute http(s) URL
fn parse_root_url(raw: Option<&str>) -> Option<Url> {
    let url = Url::parse(raw?).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn bad_request() -> Response {
    (StatusCode::BAD_REQUEST, "Bad Request").into_response()
}

async fn handle_404() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Maps a failed computation to a response; no partial report is ever sent
fn upstream_error(error: CacheError) -> Response {
    error!("report computation failed: {}", error);
    let status = match &error {
        CacheError::Compute(_) => StatusCode::BAD_GATEWAY,
        CacheError::Interrupted => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string()).into_response()
}

async fn dependencies_score(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<ScoreQuery>,
) -> Response {
    let Some(root) = parse_root_url(query.url.as_deref()) else {
        return bad_request();
    };

    match state.cache.report_for(&root).await {
        Ok(report) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, config::RESPONSE_CACHE_CONTROL)],
            Json(report),
        )
            .into_response(),
        Err(e) => upstream_error(e),
    }
}

async fn badge_svg(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<ScoreQuery>,
) -> Response {
    let Some(root) = parse_root_url(query.url.as_deref()) else {
        return bad_request();
    };

    let report = match state.cache.report_for(&root).await {
        Ok(report) => report,
        Err(e) => return upstream_error(e),
    };

    match state.badge.render(report.score).await {
        Ok(svg) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "image/svg+xml"),
                (header::CACHE_CONTROL, config::RESPONSE_CACHE_CONTROL),
            ],
            svg,
        )
            .into_response(),
        Err(e) => {
            error!("badge rendering failed: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}
