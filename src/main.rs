use anyhow::Context;
use parking_control::config::{Config, StoreBackend};
use parking_control::constants::API_NAME;
use parking_control::handlers::build_router;
use parking_control::repository::{InMemoryParkingSpotRepository, ParkingSpotRepository, PgParkingSpotRepository};
use parking_control::service::ParkingSpotService;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("{} Starting Parking Control API on port {}", API_NAME, config.server_port);

    let repository: Arc<dyn ParkingSpotRepository> = match config.store {
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("{} Connected to database", API_NAME);

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            tracing::info!("{} Database migrations completed", API_NAME);
            Arc::new(PgParkingSpotRepository::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("{} Using in-memory store, records are lost on shutdown", API_NAME);
            Arc::new(InMemoryParkingSpotRepository::new())
        }
    };

    let app = build_router(ParkingSpotService::new(repository));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
