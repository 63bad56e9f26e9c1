//! HTTP-backed graph provider

use crate::config;
use crate::graph::error::GraphError;
use crate::graph::provider::{GraphPayload, GraphProvider};
use tracing::warn;
use url::Url;

/// Default base URL for the module graph API
const DEFAULT_BASE_URL: &str = config::DEFAULT_GRAPH_API;

/// Graph provider backed by a deno_graph-style HTTP API
pub struct RemoteGraphProvider {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteGraphProvider {
    /// Creates a new RemoteGraphProvider with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: config::http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for RemoteGraphProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl GraphProvider for RemoteGraphProvider {
    async fn fetch_graph(&self, root: &Url) -> Result<GraphPayload, GraphError> {
        let url = format!("{}/graph.json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("url", root.as_str())])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!("graph API returned status {} for {}", status, root);
            return Err(GraphError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let payload: GraphPayload = response.json().await.map_err(|e| {
            warn!("Failed to parse graph API response: {}", e);
            GraphError::InvalidResponse(e.to_string())
        })?;

        Ok(payload)
    }
}
