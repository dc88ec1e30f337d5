//! Typed HTTP client for the catalog backend.
//!
//! One long-lived [`reqwest::Client`] with an explicit per-call timeout; every
//! catalog call carries the caller's bearer token. This is the library form of
//! the companion application's service layer: it holds no token itself, the
//! caller keeps a [`Session`] and passes its token per request.

use std::time::Duration;

use reqwest::{multipart, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config;
use crate::database::models::{Album, Artist, Genre, Label, Producer};
use crate::error::ErrorMsg;
use crate::handlers::auth::{LoginRequest, LoginResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Authentication rejected by the backend")]
    Unauthorized,

    #[error("Operation not permitted for this role")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },
}

/// Credentials obtained from a successful login; the caller's session state
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: String,
}

pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Client aimed at the configured backend with the configured timeout
    pub fn from_config() -> Result<Self, ClientError> {
        let cfg = &config::config().client;
        Self::new(&cfg.base_url, Duration::from_secs(cfg.request_timeout_secs))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ---- Session ----

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let body = LoginRequest { username: username.to_string(), password: password.to_string() };
        let response = self.http.post(self.url("/auth/login")).json(&body).send().await?;
        let response = check(response).await?;
        let login: LoginResponse = response.json().await?;
        Ok(Session { token: login.token, username: login.username, role: login.role })
    }

    // ---- Shared verbs ----

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ClientError> {
        let response = self.http.get(self.url(path)).bearer_auth(token).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn put_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: &str,
    ) -> Result<ErrorMsg, ClientError> {
        let response = self.http.put(self.url(path)).bearer_auth(token).json(body).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: &str,
    ) -> Result<ErrorMsg, ClientError> {
        let response = self.http.post(self.url(path)).bearer_auth(token).json(body).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete_path(&self, path: &str, token: &str) -> Result<ErrorMsg, ClientError> {
        let response = self.http.delete(self.url(path)).bearer_auth(token).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Create-with-image: entity JSON part named after the resource plus an
    /// optional `foto2` file part, mirroring the backend's multipart contract.
    async fn post_multipart<B: Serialize>(
        &self,
        path: &str,
        entity_part: &'static str,
        body: &B,
        image: Option<(String, Vec<u8>)>,
        token: &str,
    ) -> Result<ErrorMsg, ClientError> {
        let json = serde_json::to_string(body).map_err(|e| ClientError::Upstream {
            status: 0,
            message: format!("could not encode request body: {}", e),
        })?;

        let mut form = multipart::Form::new().part(
            entity_part,
            multipart::Part::text(json)
                .file_name(format!("{}.json", entity_part))
                .mime_str("application/json")?,
        );
        if let Some((filename, bytes)) = image {
            form = form.part("foto2", multipart::Part::bytes(bytes).file_name(filename));
        }

        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    // ---- Albums ----

    pub async fn albums(&self, token: &str) -> Result<Vec<Album>, ClientError> {
        self.get_json("/api/discos", token).await
    }

    pub async fn album(&self, id: i32, token: &str) -> Result<Album, ClientError> {
        self.get_json(&format!("/api/discos/{}", id), token).await
    }

    pub async fn create_album(
        &self,
        album: &Album,
        image: Option<(String, Vec<u8>)>,
        token: &str,
    ) -> Result<ErrorMsg, ClientError> {
        self.post_multipart("/api/discos", "disco", album, image, token).await
    }

    pub async fn update_album(&self, album: &Album, token: &str) -> Result<ErrorMsg, ClientError> {
        self.put_json("/api/discos", album, token).await
    }

    pub async fn delete_album(&self, id: i32, token: &str) -> Result<ErrorMsg, ClientError> {
        self.delete_path(&format!("/api/discos/{}", id), token).await
    }

    // ---- Artists ----

    pub async fn artists(&self, token: &str) -> Result<Vec<Artist>, ClientError> {
        self.get_json("/api/artistas", token).await
    }

    pub async fn artist(&self, id: i32, token: &str) -> Result<Artist, ClientError> {
        self.get_json(&format!("/api/artistas/{}", id), token).await
    }

    pub async fn artist_albums(&self, id: i32, token: &str) -> Result<Vec<Album>, ClientError> {
        self.get_json(&format!("/api/artistas/{}/discos", id), token).await
    }

    pub async fn create_artist(
        &self,
        artist: &Artist,
        image: Option<(String, Vec<u8>)>,
        token: &str,
    ) -> Result<ErrorMsg, ClientError> {
        self.post_multipart("/api/artistas", "artista", artist, image, token).await
    }

    pub async fn update_artist(&self, artist: &Artist, token: &str) -> Result<ErrorMsg, ClientError> {
        self.put_json("/api/artistas", artist, token).await
    }

    pub async fn delete_artist(&self, id: i32, token: &str) -> Result<ErrorMsg, ClientError> {
        self.delete_path(&format!("/api/artistas/{}", id), token).await
    }

    // ---- Labels ----

    pub async fn labels(&self, token: &str) -> Result<Vec<Label>, ClientError> {
        self.get_json("/api/discograficas", token).await
    }

    pub async fn label(&self, id: i32, token: &str) -> Result<Label, ClientError> {
        self.get_json(&format!("/api/discograficas/{}", id), token).await
    }

    pub async fn label_albums(&self, id: i32, token: &str) -> Result<Vec<Album>, ClientError> {
        self.get_json(&format!("/api/discograficas/{}/discos", id), token).await
    }

    pub async fn create_label(
        &self,
        label: &Label,
        image: Option<(String, Vec<u8>)>,
        token: &str,
    ) -> Result<ErrorMsg, ClientError> {
        self.post_multipart("/api/discograficas", "discografica", label, image, token).await
    }

    pub async fn update_label(&self, label: &Label, token: &str) -> Result<ErrorMsg, ClientError> {
        self.put_json("/api/discograficas", label, token).await
    }

    pub async fn delete_label(&self, id: i32, token: &str) -> Result<ErrorMsg, ClientError> {
        self.delete_path(&format!("/api/discograficas/{}", id), token).await
    }

    // ---- Producers ----

    pub async fn producers(&self, token: &str) -> Result<Vec<Producer>, ClientError> {
        self.get_json("/api/productores", token).await
    }

    pub async fn producer(&self, id: i32, token: &str) -> Result<Producer, ClientError> {
        self.get_json(&format!("/api/productores/{}", id), token).await
    }

    pub async fn producer_albums(&self, id: i32, token: &str) -> Result<Vec<Album>, ClientError> {
        self.get_json(&format!("/api/productores/{}/discos", id), token).await
    }

    pub async fn create_producer(
        &self,
        producer: &Producer,
        image: Option<(String, Vec<u8>)>,
        token: &str,
    ) -> Result<ErrorMsg, ClientError> {
        self.post_multipart("/api/productores", "productor", producer, image, token).await
    }

    pub async fn update_producer(
        &self,
        producer: &Producer,
        token: &str,
    ) -> Result<ErrorMsg, ClientError> {
        self.put_json("/api/productores", producer, token).await
    }

    pub async fn delete_producer(&self, id: i32, token: &str) -> Result<ErrorMsg, ClientError> {
        self.delete_path(&format!("/api/productores/{}", id), token).await
    }

    // ---- Genres ----

    pub async fn genres(&self, token: &str) -> Result<Vec<Genre>, ClientError> {
        self.get_json("/api/generos", token).await
    }

    pub async fn genre(&self, id: i32, token: &str) -> Result<Genre, ClientError> {
        self.get_json(&format!("/api/generos/{}", id), token).await
    }

    pub async fn genre_albums(&self, id: i32, token: &str) -> Result<Vec<Album>, ClientError> {
        self.get_json(&format!("/api/generos/{}/discos", id), token).await
    }

    pub async fn create_genre(&self, genre: &Genre, token: &str) -> Result<ErrorMsg, ClientError> {
        self.post_json("/api/generos", genre, token).await
    }

    pub async fn update_genre(&self, genre: &Genre, token: &str) -> Result<ErrorMsg, ClientError> {
        self.put_json("/api/generos", genre, token).await
    }

    pub async fn delete_genre(&self, id: i32, token: &str) -> Result<ErrorMsg, ClientError> {
        self.delete_path(&format!("/api/generos/{}", id), token).await
    }
}

/// Map a response's status to the client error taxonomy, keeping the
/// backend's error message when one is present.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorMsg>().await {
        Ok(msg) => msg.message,
        Err(_) => status.to_string(),
    };
    Err(classify(status, message))
}

fn classify(status: StatusCode, message: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden,
        StatusCode::NOT_FOUND => ClientError::NotFound,
        other => ClientError::Upstream { status: other.as_u16(), message },
    }
}
