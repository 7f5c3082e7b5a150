pub mod token_mock;

use std::time::Duration;

use oauth_cli::Config;

/// Find a port that is free right now on the loopback interface.
#[allow(dead_code)]
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Flat-shape config JSON pointing at the given token endpoint and redirect port.
#[allow(dead_code)]
pub fn config_json(token_url: &str, redirect_port: u16) -> serde_json::Value {
    serde_json::json!({
        "client_id": "abc",
        "client_secret": "s",
        "auth_url": "https://ex.com/auth",
        "token_url": token_url,
        "redirect_url": format!("http://localhost:{redirect_port}/")
    })
}

#[allow(dead_code)]
pub fn config(token_url: &str, redirect_port: u16) -> Config {
    oauth_cli::normalize(&config_json(token_url, redirect_port)).unwrap()
}

/// Write a config JSON value to a file in a fresh temp directory.
#[allow(dead_code)]
pub fn temp_config_file(json: &serde_json::Value) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("oauth.json");
    std::fs::write(&path, serde_json::to_string_pretty(json).unwrap()).unwrap();
    (dir, path)
}

#[allow(dead_code)]
fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Simulate the browser following the redirect, retrying until the listener is up.
#[allow(dead_code)]
pub async fn send_redirect(port: u16, path_and_query: &str) -> reqwest::Response {
    let url = format!("http://127.0.0.1:{port}{path_and_query}");
    let client = http_client();
    for _ in 0..200 {
        match client.get(&url).send().await {
            Ok(resp) => return resp,
            Err(e) if e.is_connect() => tokio::time::sleep(Duration::from_millis(10)).await,
            Err(e) => panic!("redirect request failed: {e}"),
        }
    }
    panic!("redirect listener on port {port} never came up");
}

/// A single attempt, no retries.
#[allow(dead_code)]
pub async fn send_redirect_once(port: u16, path_and_query: &str) -> reqwest::Result<reqwest::Response> {
    http_client()
        .get(format!("http://127.0.0.1:{port}{path_and_query}"))
        .send()
        .await
}
