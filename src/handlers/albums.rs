//! `/api/discos` handlers

use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use crate::config;
use crate::database::models::Album;
use crate::database::repository;
use crate::error::{ApiError, ErrorMsg};
use crate::state::AppState;
use crate::storage;

use super::{parse_id, read_entity_multipart};

/// GET /api/discos
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Album>>, ApiError> {
    let albums = repository::albums::list(&state.pool).await?;
    if albums.is_empty() {
        return Err(ApiError::not_found("Could not find any album"));
    }
    Ok(Json(albums))
}

/// GET /api/discos/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Album>, ApiError> {
    let id = parse_id(&id)?;
    let album = repository::albums::find(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find the album"))?;
    Ok(Json(album))
}

/// POST /api/discos - multipart: `disco` JSON part + optional `foto2` file
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ErrorMsg>, ApiError> {
    let payload = read_entity_multipart(multipart, "disco").await?;
    let mut album: Album = serde_json::from_str(&payload.json)
        .map_err(|_| ApiError::bad_request("Malformed album payload"))?;

    let cfg = &config::config().storage;
    album.photo = match payload.image {
        Some((filename, bytes)) => storage::save_image(&cfg.image_dir, &filename, &bytes).await?,
        None => cfg.default_image.clone(),
    };

    repository::albums::insert(&state.pool, &album).await?;
    Ok(Json(ErrorMsg::ok("Album inserted correctly")))
}

/// PUT /api/discos - JSON body carrying the id
pub async fn update(
    State(state): State<AppState>,
    Json(album): Json<Album>,
) -> Result<Json<ErrorMsg>, ApiError> {
    if repository::albums::update(&state.pool, &album).await? {
        Ok(Json(ErrorMsg::ok("Album modified correctly")))
    } else {
        Err(ApiError::not_found("Could not find the album"))
    }
}

/// DELETE /api/discos/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ErrorMsg>, ApiError> {
    let id = parse_id(&id)?;
    let album = repository::albums::find(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find the album"))?;

    repository::albums::delete(&state.pool, id).await?;

    let cfg = &config::config().storage;
    storage::delete_image(&cfg.image_dir, &album.photo, &cfg.default_image).await;

    Ok(Json(ErrorMsg::ok("Album deleted correctly")))
}
