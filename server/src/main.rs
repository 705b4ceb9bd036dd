use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod backend;

use backend::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Loading configuration from environment");
    let config = Config::from_env()?;

    info!("Setting up importer");
    let state = backend::initialize_backend(config.clone())?;

    let app = backend::create_router(state);

    let addr: SocketAddr = config.bind_address.parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
