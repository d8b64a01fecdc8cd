use dotenvy::dotenv;
use plant_buddy::errors::Result;
use plant_buddy::{api, config, store};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!("Successfully processed application configuration.");

    // 4. Initialize the configured storage backend
    let store = store::connect(&app_config.storage)
        .await
        .inspect(|_| info!("Storage backend initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize storage backend: {}", e))?;

    // 5. Serve the HTTP API
    let app = api::router(store);
    let listener = TcpListener::bind(&app_config.listen_addr)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", app_config.listen_addr, e))?;
    info!("PlantBuddy listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
