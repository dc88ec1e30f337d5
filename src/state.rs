use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::KeyRing;

/// Shared application state handed to handlers and the auth middleware.
/// Both members are cheap to clone and read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub keys: Arc<KeyRing>,
}

impl AppState {
    pub fn new(pool: PgPool, keys: KeyRing) -> Self {
        Self { pool, keys: Arc::new(keys) }
    }
}
