use thiserror::Error;

/// Errors from module graph construction.
///
/// Any of these is fatal for the request that triggered it; graph
/// construction is never retried.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to load {specifier}: {message}")]
    ModuleLoad { specifier: String, message: String },

    #[error("Root module not in graph: {0}")]
    MissingRoot(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
