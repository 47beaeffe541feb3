//! End-to-end tests for the gateway request pipeline.

use std::time::Duration;

use devgate::config::GatewayConfig;

mod common;

fn test_config(dev_server_port: u16) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.dev_server.host = "127.0.0.1".to_string();
    config.dev_server.port = dev_server_port;
    config.dev_server.connect_timeout_secs = 2;
    config.environment = "test".to_string();
    config
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

#[tokio::test]
async fn health_is_ok_without_upstream() {
    // Dev server down: health must still answer.
    let dead_port = common::unused_port().await;
    let (addr, shutdown) = common::spawn_gateway(test_config(dead_port)).await;

    let res = client()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "test");
    assert!(body["version"].is_string());
    assert!(body["uptime"].is_u64());

    shutdown.trigger();
}

#[tokio::test]
async fn dev_asset_request_passes_through() {
    let upstream = common::start_mock_dev_server(|| async { (201, "module-source".to_string()) }).await;
    let (addr, shutdown) = common::spawn_gateway(test_config(upstream.port())).await;

    let res = client()
        .get(format!("http://{addr}/src/main.tsx"))
        .send()
        .await
        .unwrap();

    // Status, marker header, and body arrive unchanged.
    assert_eq!(res.status(), 201);
    assert_eq!(res.headers().get("x-upstream").unwrap(), "yes");
    assert_eq!(res.text().await.unwrap(), "module-source");

    shutdown.trigger();
}

#[tokio::test]
async fn api_request_is_proxied() {
    let upstream =
        common::start_mock_dev_server(|| async { (200, r#"{"items":[]}"#.to_string()) }).await;
    let (addr, shutdown) = common::spawn_gateway(test_config(upstream.port())).await;

    let res = client()
        .get(format!("http://{addr}/api/achievements"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), r#"{"items":[]}"#);

    shutdown.trigger();
}

#[tokio::test]
async fn spa_route_is_proxied() {
    let upstream =
        common::start_mock_dev_server(|| async { (200, "<html>app</html>".to_string()) }).await;
    let (addr, shutdown) = common::spawn_gateway(test_config(upstream.port())).await;

    let res = client()
        .get(format!("http://{addr}/dashboard"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "<html>app</html>");

    shutdown.trigger();
}

#[tokio::test]
async fn upstream_down_returns_502_not_a_hang() {
    let dead_port = common::unused_port().await;
    let (addr, shutdown) = common::spawn_gateway(test_config(dead_port)).await;

    let res = client()
        .get(format!("http://{addr}/src/main.tsx"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);
    let body = res.text().await.unwrap();
    assert!(body.contains("Failed to reach dev server"), "got: {body}");

    // The process keeps serving after an upstream failure.
    let res = client()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
}

#[tokio::test]
async fn unknown_path_serves_fallback_page() {
    // Upstream availability is irrelevant for unclassified paths.
    let dead_port = common::unused_port().await;
    let (addr, shutdown) = common::spawn_gateway(test_config(dead_port)).await;

    let res = client()
        .get(format!("http://{addr}/nonexistent-route"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(body.contains(r#"<div id="root">"#));

    shutdown.trigger();
}

#[tokio::test]
async fn docs_mount_serves_exact_bytes_and_404s() {
    let docs = tempfile::tempdir().unwrap();
    let content = b"# Whitepaper\n\nbyte-exact content \xc3\xa9";
    std::fs::write(docs.path().join("paper.md"), content).unwrap();

    let dead_port = common::unused_port().await;
    let mut config = test_config(dead_port);
    config.static_files.docs_dir = docs.path().to_string_lossy().to_string();
    let (addr, shutdown) = common::spawn_gateway(config).await;

    let res = client()
        .get(format!("http://{addr}/whitepaper/paper.md"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.bytes().await.unwrap().as_ref(), content);

    let res = client()
        .get(format!("http://{addr}/whitepaper/missing.md"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn debug_info_dumps_process_state() {
    let dead_port = common::unused_port().await;
    let mut config = test_config(dead_port);
    config.debug_info_enabled = true;
    let (addr, shutdown) = common::spawn_gateway(config).await;

    let res = client()
        .get(format!("http://{addr}/debug-info"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(body.contains("devgate debug info"));
    assert!(body.contains("dev_server"));

    shutdown.trigger();
}

#[tokio::test]
async fn debug_info_absent_when_disabled() {
    let dead_port = common::unused_port().await;
    let mut config = test_config(dead_port);
    config.debug_info_enabled = false;
    let (addr, shutdown) = common::spawn_gateway(config).await;

    // Falls through to the classifier: unknown path, fallback page.
    let res = client()
        .get(format!("http://{addr}/debug-info"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains(r#"<div id="root">"#));

    shutdown.trigger();
}

#[tokio::test]
async fn plain_request_on_ws_path_gets_error_envelope() {
    let dead_port = common::unused_port().await;
    let (addr, shutdown) = common::spawn_gateway(test_config(dead_port)).await;

    let res = client()
        .get(format!("http://{addr}/ws"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 426);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["code"], "upgrade_required");

    shutdown.trigger();
}

#[tokio::test]
async fn bound_port_cannot_be_taken_twice() {
    let dead_port = common::unused_port().await;
    let (addr, shutdown) = common::spawn_gateway(test_config(dead_port)).await;

    // A second bind on the gateway's port fails immediately; main maps this
    // to exit code 1.
    let err = tokio::net::TcpListener::bind(addr).await;
    assert!(err.is_err());

    shutdown.trigger();
}
