use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppSettings {
    /// CSV file defining the pairs to watch.
    pub watch_file: String,
    #[serde(default = "default_poll_seconds")]
    pub poll_seconds: u64,
    /// Market suffix appended to every symbol before lookup, e.g. ".SA".
    #[serde(default)]
    pub market_suffix: Option<String>,
}

fn default_poll_seconds() -> u64 {
    60
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut s = Config::new();
        s.merge(Environment::new().separator("__"))?;
        s.try_into()
    }
}
