//! Report assembly: one record per external module plus the aggregate score

use crate::graph::builder::ModuleGraph;
use crate::graph::local::local_closure;
use crate::graph::provider::GraphProvider;
use crate::score::comparator::classify;
use crate::score::error::ScoreError;
use crate::score::registry::RegistryTable;
use crate::score::version::{VersionInfo, resolve_version_info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Freshness entry for one external module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub specifier: String,
    /// Modules that import this one, in graph order, duplicates preserved
    pub imported_from: Vec<String>,
    pub score: f64,
    /// Serialized as null when the latest version could not be determined
    pub latest_version: Option<String>,
    pub message: String,
}

/// Freshness report for a root module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreshnessReport {
    pub score: f64,
    pub data: Vec<ScoreRecord>,
}

/// Computes freshness reports by walking a module graph
pub struct Scorer {
    provider: Arc<dyn GraphProvider>,
    registries: Arc<RegistryTable>,
}

impl Scorer {
    pub fn new(provider: Arc<dyn GraphProvider>, registries: Arc<RegistryTable>) -> Self {
        Self {
            provider,
            registries,
        }
    }

    /// Builds the freshness report for a root module.
    ///
    /// The root and its local-file closure are project files, not
    /// dependencies, and never appear in the report. Registry lookups run
    /// sequentially in graph order. A graph with no scoreable external
    /// modules reports a score of 1.0 with empty data: with nothing external
    /// to age, the dependencies cannot be stale.
    pub async fn report(&self, root: &Url) -> Result<FreshnessReport, ScoreError> {
        let payload = self.provider.fetch_graph(root).await?;
        let graph = ModuleGraph::from_payload(root.as_str(), &payload)?;
        let local = local_closure(&graph);

        let mut data = Vec::new();
        for (specifier, node) in graph.modules() {
            if local.contains(specifier) {
                continue;
            }

            let info = match Url::parse(specifier) {
                Ok(parsed) => resolve_version_info(&self.registries, &parsed).await?,
                // Not a URL at all, so no registry can host it
                Err(_) => VersionInfo::unresolved(),
            };
            let freshness = classify(&info);

            data.push(ScoreRecord {
                specifier: specifier.clone(),
                imported_from: node.parents.clone(),
                score: freshness.score,
                latest_version: info.latest_version,
                message: freshness.message.to_string(),
            });
        }

        let score = if data.is_empty() {
            1.0
        } else {
            data.iter().map(|record| record.score).sum::<f64>() / data.len() as f64
        };

        debug!("scored {} of {} modules for {}", data.len(), graph.len(), root);

        Ok(FreshnessReport { score, data })
    }
}
