use anyhow::Result;
use tracing_subscriber::EnvFilter;

use todotracker::api::{self, AppState};
use todotracker::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("todotracker=info")),
        )
        .init();

    let config = Config::from_env()?;
    let app = api::router(AppState {
        db_path: config.db_path,
    });

    tracing::info!("todotracker listening on http://{}", config.bind_addr);
    axum::serve(tokio::net::TcpListener::bind(config.bind_addr).await?, app).await?;

    Ok(())
}
