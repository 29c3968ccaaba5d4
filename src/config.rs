use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ADVICE_TIMEOUT_SECS: u64 = 60;
const DEFAULT_VIDEO_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration, resolved from the environment once at startup and
/// passed into the request-handling components. Nothing reads the
/// environment after this point.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub groq_api_key: String,
    pub youtube_api_key: String,
    pub port: u16,
    pub advice_timeout: Duration,
    pub video_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let groq_api_key = require("GROQ_API_KEY")?;
        let youtube_api_key = require("YOUTUBE_API_KEY")?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "PORT",
                    value: raw,
                })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            groq_api_key,
            youtube_api_key,
            port,
            advice_timeout: Duration::from_secs(DEFAULT_ADVICE_TIMEOUT_SECS),
            video_timeout: Duration::from_secs(DEFAULT_VIDEO_TIMEOUT_SECS),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingCredential(name))
}
