#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use product_catalog_api::config::AppConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};

pub const TOKEN: &str = "integration-secret";

pub struct TestServer {
    pub base_url: String,
    pub products_file: PathBuf,
}

impl TestServer {
    pub fn api(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(format!("{}/ping", self.base_url)).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.products_file);
    }
}

pub fn seed_products() -> Value {
    json!([
        {"id": 1, "name": "Apple", "quantity": 100, "code_value": "APP001", "is_published": true, "expiration": "15/03/2099", "price": 120.5},
        {"id": 2, "name": "Banana", "quantity": 40, "code_value": "BAN002", "is_published": false, "expiration": "01/06/2099", "price": 45.0},
        {"id": 3, "name": "Cherry", "quantity": 7, "code_value": "CHE003", "is_published": true, "expiration": "20/11/2099", "price": 310.0}
    ])
}

pub fn new_product(code_value: &str) -> Value {
    json!({
        "name": "Dragon fruit",
        "quantity": 12,
        "code_value": code_value,
        "is_published": true,
        "expiration": "31/12/2099",
        "price": 99.9
    })
}

/// Starts a server on a free port, seeded from a fresh products file.
/// The server lives as long as the calling test's runtime.
pub async fn spawn_server(persist: bool) -> Result<TestServer> {
    let products_file = std::env::temp_dir().join(format!(
        "products_it_{}.json",
        uuid::Uuid::new_v4().simple()
    ));
    std::fs::write(&products_file, serde_json::to_vec(&seed_products())?)
        .context("failed to write seed file")?;

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;

    let mut config = AppConfig::development();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = port;
    config.store.products_file = products_file.clone();
    config.store.persist_on_write = persist;
    config.security.token = TOKEN.to_string();

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        if let Err(e) = product_catalog_api::server::serve(listener, &config).await {
            eprintln!("test server stopped: {e:?}");
        }
    });

    let server = TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        products_file,
    };
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
