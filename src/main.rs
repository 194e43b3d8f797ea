use wayfare_api::config::AppConfig;
use wayfare_api::state::AppState;
use wayfare_api::{app, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare_api=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("starting Wayfare API in {:?} mode", config.environment);

    let pool = database::connect(&config.database).await?;
    let state = AppState::new(pool, config);
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("WAYFARE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Wayfare API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
