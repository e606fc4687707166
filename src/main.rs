//! Pet store server: reads settings, prepares the database and image directory, then serves the API.

use petstore_api::{app, connect, ensure_database_exists, ensure_tables, AppState, Gateway, LocalImageStore, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("petstore_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database_url).await?;
    let pool = connect(&settings).await?;
    ensure_tables(&pool).await?;

    let images = LocalImageStore::new(&settings.upload_dir).await?;
    let state = AppState::new(Gateway::new(pool), Arc::new(images));
    let router = app(state, &settings);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        upload_dir = %settings.upload_dir.display(),
        "listening"
    );
    axum::serve(listener, router).await?;
    Ok(())
}
