use std::net::SocketAddr;

use configs::{AppConfig, StorageBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::startup::{build_app, build_state};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.storage.backend = StorageBackend::Memory;
    let app = build_app(build_state(&cfg).await?);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_transfer_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/transfers", app.base_url))
        .json(&json!({"sender_id": "A", "receiver_id": "B", "currency": "BRL", "amount": 10.5, "state": "pending"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.headers()["content-type"], "application/json");
    let id = res.json::<Value>().await?["id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());

    let res = c.put(format!("{}/transfers/{}", app.base_url, id))
        .json(&json!({"receiver_id": "C"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/transfers/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["receiver_id"], "C");
    assert_eq!(body["currency"], "BRL");

    let res = c.delete(format!("{}/transfers/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/transfers/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert!(body["error"].is_string());
    Ok(())
}
