//! Graph provider trait and the wire format it speaks

#[cfg(test)]
use mockall::automock;

use crate::graph::error::GraphError;
use serde::Deserialize;
use url::Url;

/// Module graph payload as produced by a deno_graph-style API.
///
/// Only the fields the scoring pipeline consumes are modeled; unknown fields
/// are ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphPayload {
    #[serde(default)]
    pub roots: Vec<String>,
    #[serde(default)]
    pub modules: Vec<ModulePayload>,
}

/// One module entry in the graph payload
#[derive(Debug, Clone, Deserialize)]
pub struct ModulePayload {
    pub specifier: String,
    /// Load or resolution error reported by the provider for this module
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<DependencyPayload>,
}

/// One import edge as reported by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyPayload {
    /// The specifier exactly as written in the importing source file
    pub specifier: String,
    /// Resolution of the code import, absent for type-only imports
    #[serde(default)]
    pub code: Option<ResolvedPayload>,
}

/// Resolved target of an import
#[derive(Debug, Clone, Deserialize)]
pub struct ResolvedPayload {
    #[serde(default)]
    pub specifier: Option<String>,
}

/// Trait for obtaining the full import graph of a root module
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait GraphProvider: Send + Sync {
    /// Fetches the module graph rooted at `root`
    ///
    /// # Returns
    /// * `Ok(GraphPayload)` - The raw graph, one entry per reachable module
    /// * `Err(GraphError)` - If the provider cannot construct the graph
    async fn fetch_graph(&self, root: &Url) -> Result<GraphPayload, GraphError>;
}
