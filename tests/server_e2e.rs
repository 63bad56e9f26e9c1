//! HTTP surface E2E tests against a server bound to an ephemeral port

mod helper;

use mockito::{Matcher, Server};

use deps_score::score::report::FreshnessReport;

use helper::{graph_json, mock_deno_versions, mock_graph, module_json, spawn_app, test_state};

const ROOT: &str = "https://example.com/mod.ts";

#[tokio::test(flavor = "multi_thread")]
async fn serves_the_report_as_json_with_long_lived_cache_headers() {
    // 1. Upstream mocks: one pinned module a patch behind
    let mut graph_api = Server::new_async().await;
    let mut registry_api = Server::new_async().await;
    let badge_api = Server::new_async().await;

    let foo = "https://deno.land/x/foo@1.2.3/mod.ts";
    let payload = graph_json(
        ROOT,
        vec![module_json(ROOT, &[(foo, foo)]), module_json(foo, &[])],
    );
    let _graph_mock = mock_graph(&mut graph_api, ROOT, &payload).await;
    let _versions_mock = mock_deno_versions(&mut registry_api, "foo", &["1.2.4", "1.2.3"]).await;

    // 2. Serve and request
    let base = spawn_app(test_state(
        &graph_api.url(),
        &registry_api.url(),
        &badge_api.url(),
    ))
    .await;
    let response = reqwest::get(format!("{base}/api/dependencies_score?url={ROOT}"))
        .await
        .unwrap();

    // 3. Status, caching header and body shape
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["cache-control"],
        "public, max-age=604800"
    );
    let report: FreshnessReport = response.json().await.unwrap();
    assert_eq!(report.score, 0.9);
    assert_eq!(report.data.len(), 1);
    assert_eq!(report.data[0].specifier, foo);
    assert_eq!(report.data[0].message, "Patch versions do not match");
}

#[tokio::test(flavor = "multi_thread")]
async fn rejects_requests_without_a_valid_url_parameter() {
    let graph_api = Server::new_async().await;
    let registry_api = Server::new_async().await;
    let badge_api = Server::new_async().await;

    let base = spawn_app(test_state(
        &graph_api.url(),
        &registry_api.url(),
        &badge_api.url(),
    ))
    .await;

    let missing = reqwest::get(format!("{base}/api/dependencies_score"))
        .await
        .unwrap();
    assert_eq!(missing.status(), 400);
    assert_eq!(missing.text().await.unwrap(), "Bad Request");

    let file_scheme = reqwest::get(format!(
        "{base}/api/dependencies_score?url=file:///etc/passwd"
    ))
    .await
    .unwrap();
    assert_eq!(file_scheme.status(), 400);

    let garbage = reqwest::get(format!("{base}/badge.svg?url=not-a-url"))
        .await
        .unwrap();
    assert_eq!(garbage.status(), 400);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_paths_fall_back_to_not_found() {
    let graph_api = Server::new_async().await;
    let registry_api = Server::new_async().await;
    let badge_api = Server::new_async().await;

    let base = spawn_app(test_state(
        &graph_api.url(),
        &registry_api.url(),
        &badge_api.url(),
    ))
    .await;

    let response = reqwest::get(format!("{base}/api/nope")).await.unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), "Not Found");
}

#[tokio::test(flavor = "multi_thread")]
async fn serves_the_score_as_an_svg_badge() {
    let mut graph_api = Server::new_async().await;
    let mut registry_api = Server::new_async().await;
    let mut badge_api = Server::new_async().await;

    let foo = "https://deno.land/x/foo@1.0.0/mod.ts";
    let payload = graph_json(
        ROOT,
        vec![module_json(ROOT, &[(foo, foo)]), module_json(foo, &[])],
    );
    let _graph_mock = mock_graph(&mut graph_api, ROOT, &payload).await;
    let _versions_mock = mock_deno_versions(&mut registry_api, "foo", &["1.0.0"]).await;

    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#;
    let badge_mock = badge_api
        .mock("GET", "/badge/dependencies--score-1-brightgreen")
        .with_status(200)
        .with_header("content-type", "image/svg+xml")
        .with_body(svg)
        .create_async()
        .await;

    let base = spawn_app(test_state(
        &graph_api.url(),
        &registry_api.url(),
        &badge_api.url(),
    ))
    .await;
    let response = reqwest::get(format!("{base}/badge.svg?url={ROOT}"))
        .await
        .unwrap();

    badge_mock.assert_async().await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "image/svg+xml");
    assert_eq!(
        response.headers()["cache-control"],
        "public, max-age=604800"
    );
    assert_eq!(response.text().await.unwrap(), svg);
}

#[tokio::test(flavor = "multi_thread")]
async fn badge_color_tracks_the_score_tier() {
    let mut graph_api = Server::new_async().await;
    let mut registry_api = Server::new_async().await;
    let mut badge_api = Server::new_async().await;

    // One module a major behind scores 0.5, which lands in the orange tier
    let foo = "https://deno.land/x/foo@1.0.0/mod.ts";
    let payload = graph_json(
        ROOT,
        vec![module_json(ROOT, &[(foo, foo)]), module_json(foo, &[])],
    );
    let _graph_mock = mock_graph(&mut graph_api, ROOT, &payload).await;
    let _versions_mock = mock_deno_versions(&mut registry_api, "foo", &["2.0.0", "1.0.0"]).await;

    let badge_mock = badge_api
        .mock("GET", "/badge/dependencies--score-0.5-orange")
        .with_status(200)
        .with_header("content-type", "image/svg+xml")
        .with_body("<svg/>")
        .create_async()
        .await;

    let base = spawn_app(test_state(
        &graph_api.url(),
        &registry_api.url(),
        &badge_api.url(),
    ))
    .await;
    let response = reqwest::get(format!("{base}/badge.svg?url={ROOT}"))
        .await
        .unwrap();

    badge_mock.assert_async().await;
    assert_eq!(response.status(), 200);
}

#[tokio::test(flavor = "multi_thread")]
async fn serves_cached_reports_without_refetching_upstream() {
    let mut graph_api = Server::new_async().await;
    let mut registry_api = Server::new_async().await;
    let badge_api = Server::new_async().await;

    let foo = "https://deno.land/x/foo@1.0.0/mod.ts";
    let payload = graph_json(
        ROOT,
        vec![module_json(ROOT, &[(foo, foo)]), module_json(foo, &[])],
    );
    let graph_mock = mock_graph(&mut graph_api, ROOT, &payload).await;
    let versions_mock = mock_deno_versions(&mut registry_api, "foo", &["1.0.0"]).await;

    let base = spawn_app(test_state(
        &graph_api.url(),
        &registry_api.url(),
        &badge_api.url(),
    ))
    .await;

    let first = reqwest::get(format!("{base}/api/dependencies_score?url={ROOT}"))
        .await
        .unwrap();
    let second = reqwest::get(format!("{base}/api/dependencies_score?url={ROOT}"))
        .await
        .unwrap();

    assert_eq!(first.status(), 200);
    assert_eq!(second.status(), 200);
    // Each mock expects a single hit, so a second upstream fetch fails here
    graph_mock.assert_async().await;
    versions_mock.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn maps_upstream_failures_to_bad_gateway() {
    let mut graph_api = Server::new_async().await;
    let registry_api = Server::new_async().await;
    let badge_api = Server::new_async().await;

    let graph_mock = graph_api
        .mock("GET", "/graph.json")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("graph exploded")
        .create_async()
        .await;

    let base = spawn_app(test_state(
        &graph_api.url(),
        &registry_api.url(),
        &badge_api.url(),
    ))
    .await;
    let response = reqwest::get(format!("{base}/api/dependencies_score?url={ROOT}"))
        .await
        .unwrap();

    graph_mock.assert_async().await;
    assert_eq!(response.status(), 502);
    let body = response.text().await.unwrap();
    assert!(body.starts_with("Graph construction failed"));
}
