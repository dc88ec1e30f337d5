//! `/api/generos` handlers. Genres carry no image, so create is plain JSON.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::models::{Album, Genre};
use crate::database::repository;
use crate::error::{ApiError, ErrorMsg};
use crate::state::AppState;

use super::parse_id;

/// GET /api/generos
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Genre>>, ApiError> {
    let genres = repository::genres::list(&state.pool).await?;
    if genres.is_empty() {
        return Err(ApiError::not_found("Could not find any genre"));
    }
    Ok(Json(genres))
}

/// GET /api/generos/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Genre>, ApiError> {
    let id = parse_id(&id)?;
    let genre = repository::genres::find(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Could not find the genre"))?;
    Ok(Json(genre))
}

/// GET /api/generos/:id/discos
pub async fn albums(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Album>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(repository::albums::by_genre(&state.pool, id).await?))
}

/// POST /api/generos
pub async fn create(
    State(state): State<AppState>,
    Json(genre): Json<Genre>,
) -> Result<Json<ErrorMsg>, ApiError> {
    repository::genres::insert(&state.pool, &genre).await?;
    Ok(Json(ErrorMsg::ok("Genre inserted correctly")))
}

/// PUT /api/generos - JSON body carrying the id
pub async fn update(
    State(state): State<AppState>,
    Json(genre): Json<Genre>,
) -> Result<Json<ErrorMsg>, ApiError> {
    if repository::genres::update(&state.pool, &genre).await? {
        Ok(Json(ErrorMsg::ok("Genre modified correctly")))
    } else {
        Err(ApiError::not_found("Could not find the genre"))
    }
}

/// DELETE /api/generos/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ErrorMsg>, ApiError> {
    let id = parse_id(&id)?;
    if repository::genres::delete(&state.pool, id).await? {
        Ok(Json(ErrorMsg::ok("Genre deleted correctly")))
    } else {
        Err(ApiError::not_found("Could not find the genre"))
    }
}
