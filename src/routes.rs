use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::database;
use crate::handlers;
use crate::middleware::{enforce_roles, require_auth};
use crate::state::AppState;

/// Assemble the full application router.
///
/// The gate (authentication) wraps the matrix (authorization), which wraps
/// the handlers; auth failures never reach a handler. Public paths are
/// allow-listed inside both layers.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/docs", get(docs))
        .route("/auth/login", post(handlers::auth::login))
        // Catalog API
        .merge(album_routes())
        .merge(artist_routes())
        .merge(label_routes())
        .merge(producer_routes())
        .merge(genre_routes())
        // Authorization matrix, then the gate outermost
        .layer(from_fn(enforce_roles))
        .layer(from_fn_with_state(state.clone(), require_auth));

    if config::config().security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn album_routes() -> Router<AppState> {
    use handlers::albums;

    Router::new()
        .route("/api/discos", get(albums::list).post(albums::create).put(albums::update))
        .route("/api/discos/:id", get(albums::get).delete(albums::delete))
}

fn artist_routes() -> Router<AppState> {
    use handlers::artists;

    Router::new()
        .route("/api/artistas", get(artists::list).post(artists::create).put(artists::update))
        .route("/api/artistas/:id", get(artists::get).delete(artists::delete))
        .route("/api/artistas/:id/discos", get(artists::albums))
}

fn label_routes() -> Router<AppState> {
    use handlers::labels;

    Router::new()
        .route(
            "/api/discograficas",
            get(labels::list).post(labels::create).put(labels::update),
        )
        .route("/api/discograficas/:id", get(labels::get).delete(labels::delete))
        .route("/api/discograficas/:id/discos", get(labels::albums))
}

fn producer_routes() -> Router<AppState> {
    use handlers::producers;

    Router::new()
        .route(
            "/api/productores",
            get(producers::list).post(producers::create).put(producers::update),
        )
        .route("/api/productores/:id", get(producers::get).delete(producers::delete))
        .route("/api/productores/:id/discos", get(producers::albums))
}

fn genre_routes() -> Router<AppState> {
    use handlers::genres;

    Router::new()
        .route("/api/generos", get(genres::list).post(genres::create).put(genres::update))
        .route("/api/generos/:id", get(genres::get).delete(genres::delete))
        .route("/api/generos/:id/discos", get(genres::albums))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Sonidox API",
        "version": version,
        "description": "Music catalog REST backend (Axum)",
        "endpoints": {
            "home": "/ (public)",
            "docs": "/docs (public)",
            "login": "/auth/login (public - token acquisition)",
            "albums": "/api/discos[/:id] (bearer token)",
            "labels": "/api/discograficas[/:id[/discos]] (bearer token)",
            "producers": "/api/productores[/:id[/discos]] (bearer token)",
            "artists": "/api/artistas[/:id[/discos]] (bearer token)",
            "genres": "/api/generos[/:id[/discos]] (bearer token)",
        }
    }))
}

async fn docs() -> Json<Value> {
    Json(json!({
        "authentication": {
            "login": "POST /auth/login with {username, password}; returns {token, username, role, expires_in}",
            "usage": "send Authorization: Bearer <token> on every /api request",
            "roles": ["ADMIN", "BOSS", "USER"],
            "matrix": {
                "GET": ["ADMIN", "BOSS", "USER"],
                "POST": ["ADMIN", "BOSS", "USER"],
                "PUT": ["ADMIN", "BOSS"],
                "DELETE": ["ADMIN"],
            },
            "limitations": "tokens cannot be revoked before expiry (24h)",
        },
        "errors": {
            "shape": {"code": 1, "message": "string", "timestamp": "RFC 3339"},
            "401": "missing or invalid token",
            "403": "role not permitted for this route",
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
