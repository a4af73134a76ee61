use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Base URL of the deployed assistant backend, used when `GEMINI_API_BASE` is unset.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://medical-assistant-backend.onrender.com";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the docmedic server.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the remote text-generation collaborator.
    pub gemini_api_base: String,
    /// Optional override for the candidate rendering-worker URL list.
    pub pdf_worker_urls: Option<Vec<String>>,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            gemini_api_base: load_env_optional("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            pdf_worker_urls: load_env_optional("PDF_WORKER_URLS")
                .map(|value| parse_worker_list(&value)),
            server_port: load_env_optional("SERVER_PORT")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Split a comma-separated worker URL override into an ordered candidate list.
fn parse_worker_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        gemini_api_base = %config.gemini_api_base,
        worker_urls = ?config.pdf_worker_urls,
        server_port = ?config.server_port,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_worker_list_trims_and_drops_empties() {
        let urls = parse_worker_list(" https://a.example/worker.js , ,https://b.example/worker.js");
        assert_eq!(
            urls,
            vec![
                "https://a.example/worker.js".to_string(),
                "https://b.example/worker.js".to_string(),
            ]
        );
    }

    #[test]
    fn parse_worker_list_of_blanks_is_empty() {
        assert!(parse_worker_list(" , ,").is_empty());
    }
}
