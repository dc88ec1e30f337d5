use sonidox_api::auth::KeyRing;
use sonidox_api::{config, database, routes, state::AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, SONIDOX_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Sonidox API in {:?} mode", config.environment);

    // No signing keys means no login and no verifiable tokens; refuse to
    // start rather than serve a half-dead API.
    let keys = match KeyRing::from_env() {
        Ok(keys) => keys,
        Err(e) => {
            tracing::error!("JWT signing keys not configured: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match database::connect_lazy() {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Could not configure database pool: {}", e);
            std::process::exit(1);
        }
    };

    let app = routes::app(AppState::new(pool, keys));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Sonidox API listening on http://{}", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
