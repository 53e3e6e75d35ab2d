mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

fn read_file(server: &common::TestServer) -> Result<Value> {
    Ok(serde_json::from_slice(&std::fs::read(&server.products_file)?)?)
}

#[tokio::test]
async fn in_memory_mode_leaves_file_untouched() -> Result<()> {
    let server = common::spawn_server(false).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.api("/products/new"))
        .header("token", common::TOKEN)
        .json(&common::new_product("DRA004"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    assert_eq!(read_file(&server)?, common::seed_products());
    Ok(())
}

#[tokio::test]
async fn persist_mode_flushes_every_mutation() -> Result<()> {
    let server = common::spawn_server(true).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.api("/products/new"))
        .header("token", common::TOKEN)
        .json(&common::new_product("DRA004"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .delete(server.api("/products/1"))
        .header("token", common::TOKEN)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let stored = read_file(&server)?;
    let codes: Vec<&str> = stored
        .as_array()
        .expect("file holds an array")
        .iter()
        .filter_map(|p| p["code_value"].as_str())
        .collect();
    assert_eq!(codes, vec!["BAN002", "CHE003", "DRA004"]);
    Ok(())
}
