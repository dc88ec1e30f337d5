use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog album ("disco").
///
/// Relations to artist, label, producer and genre are one-directional foreign
/// keys. Serializing an album never embeds the parent records, which is what
/// breaks the album/artist/label/producer reference cycle at the JSON boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Album {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub release_date: String,
    pub name: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub wikipedia_url: String,
    #[serde(default)]
    pub spotify_url: String,
    #[serde(default)]
    pub tidal_url: String,
    #[serde(default)]
    pub artist_id: Option<i32>,
    #[serde(default)]
    pub label_id: Option<i32>,
    #[serde(default)]
    pub producer_id: Option<i32>,
    #[serde(default)]
    pub genre_id: Option<i32>,
}
