//! Catalog round trips against the spawned server and a real Postgres.
//! These run only when `DATABASE_URL` is set; without it each test skips so
//! the rest of the suite stays database-free.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use sqlx::postgres::{PgPool, PgPoolOptions};

use sonidox_api::auth::{self, password, KeyRing, Role};
use sonidox_api::client::{CatalogClient, ClientError};
use sonidox_api::database::models::Artist;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS artists (
        id SERIAL PRIMARY KEY,
        rating INTEGER NOT NULL DEFAULT 0,
        name TEXT NOT NULL,
        photo TEXT NOT NULL DEFAULT '',
        wikipedia_url TEXT NOT NULL DEFAULT '',
        spotify_url TEXT NOT NULL DEFAULT '',
        tidal_url TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS albums (
        id SERIAL PRIMARY KEY,
        rating INTEGER NOT NULL DEFAULT 0,
        release_date TEXT NOT NULL DEFAULT '',
        name TEXT NOT NULL,
        photo TEXT NOT NULL DEFAULT '',
        wikipedia_url TEXT NOT NULL DEFAULT '',
        spotify_url TEXT NOT NULL DEFAULT '',
        tidal_url TEXT NOT NULL DEFAULT '',
        artist_id INTEGER,
        label_id INTEGER,
        producer_id INTEGER,
        genre_id INTEGER
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL
    )",
];

/// Pool against `DATABASE_URL` with the catalog tables in place, or `None`
/// when no database is configured for this run.
async fn catalog_pool() -> Result<Option<PgPool>> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skipping: DATABASE_URL not set");
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await?;
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(&pool).await?;
    }
    Ok(Some(pool))
}

fn token(role: Role) -> Result<String> {
    let keys = KeyRing::single("v1", common::TEST_JWT_SECRET);
    Ok(auth::issue_token(&keys, "catalog-tests", role)?)
}

fn artist(name: &str) -> Artist {
    Artist {
        id: 0,
        rating: 5,
        name: name.to_string(),
        photo: String::new(),
        wikipedia_url: String::new(),
        spotify_url: String::new(),
        tidal_url: String::new(),
    }
}

async fn find_artist_by_name(
    client: &CatalogClient,
    token: &str,
    name: &str,
) -> Result<Artist> {
    let found = client
        .artists(token)
        .await?
        .into_iter()
        .find(|a| a.name == name);
    found.ok_or_else(|| anyhow::anyhow!("artist '{}' not listed after create", name))
}

#[tokio::test]
async fn create_without_image_stores_default_placeholder() -> Result<()> {
    let Some(_pool) = catalog_pool().await? else { return Ok(()) };
    let server = common::ensure_server().await?;
    let client = CatalogClient::new(&server.base_url, std::time::Duration::from_secs(10))?;
    let admin = token(Role::Admin)?;

    let name = format!("placeholder-artist-{}", std::process::id());
    client.create_artist(&artist(&name), None, &admin).await?;

    let created = find_artist_by_name(&client, &admin, &name).await?;
    assert_eq!(created.photo, "default.png");

    client.delete_artist(created.id, &admin).await?;
    Ok(())
}

#[tokio::test]
async fn create_with_image_stores_timestamped_filename() -> Result<()> {
    let Some(_pool) = catalog_pool().await? else { return Ok(()) };
    let server = common::ensure_server().await?;
    let client = CatalogClient::new(&server.base_url, std::time::Duration::from_secs(10))?;
    let admin = token(Role::Admin)?;

    let name = format!("photographed-artist-{}", std::process::id());
    let image = Some(("cover.png".to_string(), b"png-bytes".to_vec()));
    client.create_artist(&artist(&name), image, &admin).await?;

    let created = find_artist_by_name(&client, &admin, &name).await?;
    assert!(created.photo.ends_with("-cover.png"), "got photo: {}", created.photo);
    assert_ne!(created.photo, "default.png");

    client.delete_artist(created.id, &admin).await?;
    Ok(())
}

#[tokio::test]
async fn admin_delete_removes_the_row_and_later_lookup_is_404() -> Result<()> {
    let Some(_pool) = catalog_pool().await? else { return Ok(()) };
    let server = common::ensure_server().await?;
    let client = CatalogClient::new(&server.base_url, std::time::Duration::from_secs(10))?;
    let admin = token(Role::Admin)?;

    let name = format!("doomed-artist-{}", std::process::id());
    client.create_artist(&artist(&name), None, &admin).await?;
    let created = find_artist_by_name(&client, &admin, &name).await?;

    let deleted = client.delete_artist(created.id, &admin).await?;
    assert_eq!(deleted.code, 0);

    let err = client.artist(created.id, &admin).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound), "got: {:?}", err);
    Ok(())
}

#[tokio::test]
async fn login_round_trip_issues_a_token_that_passes_the_gate() -> Result<()> {
    let Some(pool) = catalog_pool().await? else { return Ok(()) };
    let server = common::ensure_server().await?;
    let client = CatalogClient::new(&server.base_url, std::time::Duration::from_secs(10))?;

    let username = format!("login-user-{}", std::process::id());
    let hash = password::hash_password("txakoli-2026")?;
    sqlx::query(
        "INSERT INTO users (username, password_hash, role) VALUES ($1, $2, 'USER') \
         ON CONFLICT (username) DO UPDATE SET password_hash = EXCLUDED.password_hash, \
         role = EXCLUDED.role",
    )
    .bind(&username)
    .bind(&hash)
    .execute(&pool)
    .await?;

    let session = client.login(&username, "txakoli-2026").await?;
    assert_eq!(session.username, username);
    assert_eq!(session.role, "USER");

    // The minted token must clear the gate on a read route; empty catalog
    // (404) is fine, an auth rejection is not
    match client.artists(&session.token).await {
        Ok(_) | Err(ClientError::NotFound) => {}
        Err(other) => anyhow::bail!("token rejected by the gate: {:?}", other),
    }

    let err = client.login(&username, "wrong-password").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized), "got: {:?}", err);
    Ok(())
}

#[tokio::test]
async fn missing_album_id_is_a_404_with_the_error_payload() -> Result<()> {
    let Some(_pool) = catalog_pool().await? else { return Ok(()) };
    let server = common::ensure_server().await?;
    let user = token(Role::User)?;

    let res = reqwest::Client::new()
        .get(format!("{}/api/discos/987654321", server.base_url))
        .bearer_auth(&user)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], 1);
    assert!(body["timestamp"].is_string());
    Ok(())
}
