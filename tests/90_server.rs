//! End-to-end smoke tests against a spawned server binary. No database is
//! provisioned, so these stick to behavior the auth pipeline decides on its
//! own; `CatalogClient` doubles as the test client.

mod common;

use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;

use sonidox_api::auth::{self, KeyRing, Role};
use sonidox_api::client::{CatalogClient, ClientError};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await?;

    // OK or SERVICE_UNAVAILABLE both count as live
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    // Should be valid JSON
    let _body = res.json::<serde_json::Value>().await?;
    Ok(())
}

#[tokio::test]
async fn api_rejects_unauthenticated_requests_over_the_wire() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/api/discos", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], 1);
    Ok(())
}

#[tokio::test]
async fn docs_are_served_without_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/docs", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn refuses_to_start_without_signing_keys() -> Result<()> {
    use std::process::{Command, Stdio};
    use std::time::Instant;

    let mut child = Command::new(env!("CARGO_BIN_EXE_sonidox-api"))
        .env_remove("SONIDOX_JWT_KEYS")
        .env_remove("SONIDOX_JWT_ACTIVE_KEY")
        .env_remove("SONIDOX_JWT_SECRET")
        .env("SONIDOX_PORT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(status) = child.try_wait()? {
            assert!(!status.success(), "started without any JWT key configuration");
            return Ok(());
        }
        if Instant::now() > deadline {
            let _ = child.kill();
            anyhow::bail!("server kept running without JWT key configuration");
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

#[tokio::test]
async fn catalog_client_maps_auth_rejections() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = CatalogClient::new(&server.base_url, Duration::from_secs(10))?;

    let err = client.albums("garbage-token").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized), "got: {:?}", err);
    Ok(())
}

#[tokio::test]
async fn catalog_client_maps_role_denials() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = CatalogClient::new(&server.base_url, Duration::from_secs(10))?;

    // Token signed with the secret the server was spawned with
    let keys = KeyRing::single("v1", common::TEST_JWT_SECRET);
    let token = auth::issue_token(&keys, "smoke", Role::User)?;

    let err = client.delete_artist(1, &token).await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden), "got: {:?}", err);
    Ok(())
}
