use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog artist. Albums reference artists through `albums.artist_id`; the
/// artist record itself carries no album list (see `/api/artistas/{id}/discos`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Artist {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub rating: i32,
    pub name: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub wikipedia_url: String,
    #[serde(default)]
    pub spotify_url: String,
    #[serde(default)]
    pub tidal_url: String,
}
