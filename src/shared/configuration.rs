use crate::shared::constants::CONFIG_DIRECTORY;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub static CONFIGURATION: Lazy<Configuration> =
    Lazy::new(|| Configuration::load().expect("Failed to initialize configuration."));

const CONFIGURATION_FILE_NAME: &str = "/config.toml";

#[derive(Deserialize, Serialize, Clone)]
pub struct Configuration {
    pub application_id: u64,
    pub webhook_token: String,
    pub log_level: String,
}

impl Configuration {
    /// Reads `./config/config.toml` when present; otherwise seeds the file
    /// from environment variables.
    pub fn load() -> anyhow::Result<Configuration> {
        dotenv::dotenv().ok();

        if !std::path::Path::new(CONFIG_DIRECTORY).exists() {
            std::fs::create_dir(CONFIG_DIRECTORY)?;
        }

        let configuration_path = String::from(CONFIG_DIRECTORY) + CONFIGURATION_FILE_NAME;
        if !std::path::Path::new(&configuration_path).exists() {
            let configuration = Configuration {
                application_id: std::env::var("DISCORD_APPLICATION_ID")?.parse()?,
                webhook_token: std::env::var("DISCORD_WEBHOOK_TOKEN")?,
                log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string()),
            };
            let serialized_toml = toml::to_string_pretty(&configuration)?;
            std::fs::write(&configuration_path, serialized_toml)?;
            Ok(configuration)
        } else {
            let toml = std::fs::read_to_string(&configuration_path)?;
            let deserialized_toml = toml::from_str::<Configuration>(&toml)?;
            Ok(deserialized_toml)
        }
    }
}
