//! End-to-end test utilities

use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{Value, json};

use deps_score::badge::BadgeClient;
use deps_score::graph::remote::RemoteGraphProvider;
use deps_score::score::cache::ReportCache;
use deps_score::score::registries::DenoLandRegistry;
use deps_score::score::registry::RegistryTable;
use deps_score::score::report::Scorer;
use deps_score::server::routes::{AppState, build_router};

/// Graph API payload with a single root
pub fn graph_json(root: &str, modules: Vec<Value>) -> Value {
    json!({ "roots": [root], "modules": modules })
}

/// Module entry whose dependencies pair the written specifier with its resolution
pub fn module_json(specifier: &str, dependencies: &[(&str, &str)]) -> Value {
    let dependencies: Vec<Value> = dependencies
        .iter()
        .map(|(raw, resolved)| json!({ "specifier": raw, "code": { "specifier": resolved } }))
        .collect();
    json!({ "specifier": specifier, "dependencies": dependencies })
}

/// Mounts the graph API response for `root`
pub async fn mock_graph(server: &mut ServerGuard, root: &str, payload: &Value) -> Mock {
    server
        .mock("GET", "/graph.json")
        .match_query(Matcher::UrlEncoded("url".into(), root.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(payload.to_string())
        .create_async()
        .await
}

/// Mounts the deno.land versions response for `module`, newest first
pub async fn mock_deno_versions(server: &mut ServerGuard, module: &str, versions: &[&str]) -> Mock {
    let body = json!({ "latest": versions.first(), "versions": versions });
    server
        .mock("GET", format!("/{module}/meta/versions.json").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Scorer wired to a mock graph API and a mock deno.land registry
#[allow(dead_code)]
pub fn test_scorer(graph_api: &str, registry_api: &str) -> Scorer {
    let provider = Arc::new(RemoteGraphProvider::new(graph_api));
    let registries = Arc::new(RegistryTable::new(vec![Arc::new(DenoLandRegistry::new(
        registry_api,
    ))]));
    Scorer::new(provider, registries)
}

/// Application state wired to mock upstreams
#[allow(dead_code)]
pub fn test_state(graph_api: &str, registry_api: &str, badge_api: &str) -> Arc<AppState> {
    let provider = Arc::new(RemoteGraphProvider::new(graph_api));
    let registries = Arc::new(RegistryTable::new(vec![Arc::new(DenoLandRegistry::new(
        registry_api,
    ))]));
    let scorer = Arc::new(Scorer::new(provider, registries));

    Arc::new(AppState {
        cache: ReportCache::new(scorer, Duration::from_secs(600)),
        badge: BadgeClient::new(badge_api),
    })
}

/// Serves the app on an ephemeral port and returns its base URL
#[allow(dead_code)]
pub async fn spawn_app(state: Arc<AppState>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}
