use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Album producer ("productor")
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Producer {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub rating: i32,
    pub name: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub wikipedia_url: String,
}
