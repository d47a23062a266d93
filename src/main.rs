use std::error::Error;

use llm_service::telemetry;
use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when present.
    // A missing file is fine: the process environment still applies.
    dotenvy::dotenv().ok();

    let env_filter = telemetry::env_filter_with_level("info", Level::INFO);

    // Application events; the llm-service layer prints its own.
    let app_layer = fmt::layer()
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| {
            !telemetry::is_library_event(meta.target())
        }));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(app_layer)
        .with(telemetry::layer())
        .init();

    api::start().await?;

    Ok(())
}
