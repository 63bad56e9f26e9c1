use crate::graph::error::GraphError;
use std::sync::Arc;
use thiserror::Error;

/// A registry matched the specifier but could not answer for it.
///
/// Fatal for the whole request: a report is never built from partial
/// registry data.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Module not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// The specifier's shape has no version slot to extract from
///
/// Distinct from an empty version: `deno.land/x/foo/mod.ts` pins nothing but
/// still has a slot, while a GitHub raw URL without a ref has nowhere to
/// carry a version at all.
#[derive(Debug, Error)]
#[error("No version token in specifier: {specifier}")]
pub struct VersionTokenError {
    pub specifier: String,
}

/// Errors that abort a report computation
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Graph construction failed: {0}")]
    Graph(#[from] GraphError),

    #[error("Registry lookup failed: {0}")]
    Registry(#[from] RegistryError),
}

/// Errors surfaced by the report cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// The underlying computation failed; shared by every coalesced waiter
    #[error("{0}")]
    Compute(Arc<ScoreError>),

    #[error("Report computation was interrupted")]
    Interrupted,
}
