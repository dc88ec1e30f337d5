use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Record label ("discografica")
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Label {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub wikipedia_url: String,
}
