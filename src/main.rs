use std::error::Error;

use listing_audit::telemetry;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when present.
    let dotenv = match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => return Err(e.into()),
    };

    tracing_subscriber::registry()
        .with(telemetry::env_filter("info"))
        .with(telemetry::layer())
        .try_init()?;

    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    api::start().await?;

    Ok(())
}
