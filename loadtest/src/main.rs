use goose::prelude::*;
use loadtest::scenarios::register_all;
use loadtest::settings::{Settings, install};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env()?;
    tracing::info!(
        "load testing learn at {}, micromasters at {}, lms at {}",
        settings.open_discussions_base_url,
        settings.micromasters_base_url,
        settings.lms_base_url
    );
    install(settings);

    register_all(GooseAttack::initialize()?)?.execute().await?;
    Ok(())
}
