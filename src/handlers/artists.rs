//! `/api/artistas` handlers

use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use crate::config;
use crate::database::models::{Album, Artist};
use crate::database::repository;
use crate::error::{ApiError, ErrorMsg};
use crate::state::AppState;
use crate::storage;

use super::{parse_id, read_entity_multipart};

/// GET /api/artistas
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Artist>>, ApiError> {
    let artists = repository::artists::list(&state.pool).await?;
    if artists.is_empty() {
        return Err(ApiError::not_found("Could not find any artist"));
    }
    Ok(Json(artists))
}

/// GET /api/artistas/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Artist>, ApiError> {
    let id = parse_id(&id)?;
    let artist = repository::artists::find(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find the artist"))?;
    Ok(Json(artist))
}

/// GET /api/artistas/:id/discos
pub async fn albums(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Album>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(repository::albums::by_artist(&state.pool, id).await?))
}

/// POST /api/artistas - multipart: `artista` JSON part + optional `foto2` file
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ErrorMsg>, ApiError> {
    let payload = read_entity_multipart(multipart, "artista").await?;
    let mut artist: Artist = serde_json::from_str(&payload.json)
        .map_err(|_| ApiError::bad_request("Malformed artist payload"))?;

    let cfg = &config::config().storage;
    artist.photo = match payload.image {
        Some((filename, bytes)) => storage::save_image(&cfg.image_dir, &filename, &bytes).await?,
        None => cfg.default_image.clone(),
    };

    repository::artists::insert(&state.pool, &artist).await?;
    Ok(Json(ErrorMsg::ok("Artist inserted correctly")))
}

/// PUT /api/artistas - JSON body carrying the id
pub async fn update(
    State(state): State<AppState>,
    Json(artist): Json<Artist>,
) -> Result<Json<ErrorMsg>, ApiError> {
    if repository::artists::update(&state.pool, &artist).await? {
        Ok(Json(ErrorMsg::ok("Artist modified correctly")))
    } else {
        Err(ApiError::not_found("Could not find the artist"))
    }
}

/// DELETE /api/artistas/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ErrorMsg>, ApiError> {
    let id = parse_id(&id)?;
    let artist = repository::artists::find(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find the artist"))?;

    repository::artists::delete(&state.pool, id).await?;

    let cfg = &config::config().storage;
    storage::delete_image(&cfg.image_dir, &artist.photo, &cfg.default_image).await;

    Ok(Json(ErrorMsg::ok("Artist deleted correctly")))
}
