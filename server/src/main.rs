use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use dev_events_server::config::{Config, StorageBackend};
use dev_events_server::routes::create_routes;
use dev_events_server::state::AppState;
use dev_events_server::store::{DevEventStore, MemoryDevEventStore, PgDevEventStore};

#[tokio::main]
async fn main() {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env().expect("Invalid configuration");

    let store: Arc<dyn DevEventStore> = match (config.storage, config.database_url.as_deref()) {
        (StorageBackend::Postgres, Some(database_url)) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await
                .expect("Failed to connect to database");

            tracing::info!("Successfully connected to database");

            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("Failed to run migrations");

            tracing::info!("Migrations run successfully");

            Arc::new(PgDevEventStore::new(pool))
        }
        _ => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryDevEventStore::new())
        }
    };

    let app: Router = create_routes(AppState::new(store), &config);

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .expect("Failed to bind address");

    let addr = listener.local_addr().expect("Failed to read bound address");
    tracing::info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.expect("Server failed");
}
