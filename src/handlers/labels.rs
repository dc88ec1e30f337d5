//! `/api/discograficas` handlers

use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use crate::config;
use crate::database::models::{Album, Label};
use crate::database::repository;
use crate::error::{ApiError, ErrorMsg};
use crate::state::AppState;
use crate::storage;

use super::{parse_id, read_entity_multipart};

/// GET /api/discograficas
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Label>>, ApiError> {
    let labels = repository::labels::list(&state.pool).await?;
    if labels.is_empty() {
        return Err(ApiError::not_found("Could not find any label"));
    }
    Ok(Json(labels))
}

/// GET /api/discograficas/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Label>, ApiError> {
    let id = parse_id(&id)?;
    let label = repository::labels::find(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find the label"))?;
    Ok(Json(label))
}

/// GET /api/discograficas/:id/discos
pub async fn albums(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Album>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(repository::albums::by_label(&state.pool, id).await?))
}

/// POST /api/discograficas - multipart: `discografica` JSON part + optional `foto2` logo
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ErrorMsg>, ApiError> {
    let payload = read_entity_multipart(multipart, "discografica").await?;
    let mut label: Label = serde_json::from_str(&payload.json)
        .map_err(|_| ApiError::bad_request("Malformed label payload"))?;

    let cfg = &config::config().storage;
    label.logo = match payload.image {
        Some((filename, bytes)) => storage::save_image(&cfg.image_dir, &filename, &bytes).await?,
        None => cfg.default_image.clone(),
    };

    repository::labels::insert(&state.pool, &label).await?;
    Ok(Json(ErrorMsg::ok("Label inserted correctly")))
}

/// PUT /api/discograficas - JSON body carrying the id
pub async fn update(
    State(state): State<AppState>,
    Json(label): Json<Label>,
) -> Result<Json<ErrorMsg>, ApiError> {
    if repository::labels::update(&state.pool, &label).await? {
        Ok(Json(ErrorMsg::ok("Label modified correctly")))
    } else {
        Err(ApiError::not_found("Could not find the label"))
    }
}

/// DELETE /api/discograficas/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ErrorMsg>, ApiError> {
    let id = parse_id(&id)?;
    let label = repository::labels::find(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find the label"))?;

    repository::labels::delete(&state.pool, id).await?;

    let cfg = &config::config().storage;
    storage::delete_image(&cfg.image_dir, &label.logo, &cfg.default_image).await;

    Ok(Json(ErrorMsg::ok("Label deleted correctly")))
}
