use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use flowmind_server::{config::Config, create_router, gemini::GeminiClient, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flowmind_server=debug,tower_http=info")),
        )
        .init();

    let config = Config::init()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;
    info!("Connection to the database is successful");

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        info!("Migrations applied");
    }

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; /api/summarize will fail");
    }

    let cors = match config.cors_origin.as_deref() {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>().context("Invalid CORS_ORIGIN")?)
            .allow_credentials(true)
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]),
        None => CorsLayer::new().allow_origin(Any).allow_headers(Any),
    }
    .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE]);

    let gemini = GeminiClient::new(&config).context("Failed to build HTTP client")?;
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), config.port);

    let app = create_router(Arc::new(AppState {
        db: pool,
        config,
        gemini,
    }))
    .layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server started successfully on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
