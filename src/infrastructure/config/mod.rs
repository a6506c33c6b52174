use crate::domain::conversion::StorageBackend;
use crate::infrastructure::repositories::{
    google_translation_repository::DEFAULT_TRANSLATE_API_URL,
    google_tts_repository::DEFAULT_TTS_API_URL,
};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Storage
    pub ephemeral_storage: bool,
    pub storage_dir: PathBuf,
    // External services
    pub translate_api_url: String,
    pub tts_api_url: String,
    pub http_timeout_secs: u64,
    // Limits
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            // Serverless deployments have no writable disk
            ephemeral_storage: env::var("VERCEL_ENV")
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false),
            storage_dir: env::var("STORAGE_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            translate_api_url: env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| DEFAULT_TRANSLATE_API_URL.to_string()),
            tts_api_url: env::var("TTS_API_URL")
                .unwrap_or_else(|_| DEFAULT_TTS_API_URL.to_string()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "1048576".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn storage_backend(&self) -> StorageBackend {
        if self.ephemeral_storage {
            StorageBackend::Memory
        } else {
            StorageBackend::Disk
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
