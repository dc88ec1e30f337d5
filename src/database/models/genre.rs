use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Music genre ("genero")
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Genre {
    #[serde(default)]
    pub id: i32,
    pub name: String,
}
