use anyhow::Result;

mod monitoring;
mod price_lookup;
mod settings;
use settings::Settings;
use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use monitoring::run;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    set_global_default(subscriber)?;
    LogTracer::init().expect("Failed to set logger");
    let settings = Settings::new()?;
    run(settings.app).await
}
