use serde::Serialize;
use sqlx::FromRow;

/// Account row backing the login flow. `password_hash` is a salted Argon2 PHC
/// string, never the plaintext; it stays out of every serialized response.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
}
