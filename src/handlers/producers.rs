//! `/api/productores` handlers

use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use crate::config;
use crate::database::models::{Album, Producer};
use crate::database::repository;
use crate::error::{ApiError, ErrorMsg};
use crate::state::AppState;
use crate::storage;

use super::{parse_id, read_entity_multipart};

/// GET /api/productores
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Producer>>, ApiError> {
    let producers = repository::producers::list(&state.pool).await?;
    if producers.is_empty() {
        return Err(ApiError::not_found("Could not find any producer"));
    }
    Ok(Json(producers))
}

/// GET /api/productores/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Producer>, ApiError> {
    let id = parse_id(&id)?;
    let producer = repository::producers::find(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find the producer"))?;
    Ok(Json(producer))
}

/// GET /api/productores/:id/discos
pub async fn albums(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Album>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(repository::albums::by_producer(&state.pool, id).await?))
}

/// POST /api/productores - multipart: `productor` JSON part + optional `foto2` file
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ErrorMsg>, ApiError> {
    let payload = read_entity_multipart(multipart, "productor").await?;
    let mut producer: Producer = serde_json::from_str(&payload.json)
        .map_err(|_| ApiError::bad_request("Malformed producer payload"))?;

    let cfg = &config::config().storage;
    producer.photo = match payload.image {
        Some((filename, bytes)) => storage::save_image(&cfg.image_dir, &filename, &bytes).await?,
        None => cfg.default_image.clone(),
    };

    repository::producers::insert(&state.pool, &producer).await?;
    Ok(Json(ErrorMsg::ok("Producer inserted correctly")))
}

/// PUT /api/productores - JSON body carrying the id
pub async fn update(
    State(state): State<AppState>,
    Json(producer): Json<Producer>,
) -> Result<Json<ErrorMsg>, ApiError> {
    if repository::producers::update(&state.pool, &producer).await? {
        Ok(Json(ErrorMsg::ok("Producer modified correctly")))
    } else {
        Err(ApiError::not_found("Could not find the producer"))
    }
}

/// DELETE /api/productores/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ErrorMsg>, ApiError> {
    let id = parse_id(&id)?;
    let producer = repository::producers::find(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find the producer"))?;

    repository::producers::delete(&state.pool, id).await?;

    let cfg = &config::config().storage;
    storage::delete_image(&cfg.image_dir, &producer.photo, &cfg.default_image).await;

    Ok(Json(ErrorMsg::ok("Producer deleted correctly")))
}
