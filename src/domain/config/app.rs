use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_GHOSTSCRIPT_PATH: &str = "gs";
pub const DEFAULT_MAX_CONCURRENT_COMPRESSIONS: usize = 4;
pub const DEFAULT_COMPRESSION_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 100;
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "PDFMagic.pdf";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub static_dir: PathBuf,
    pub ghostscript_path: String,
    pub temp_dir: PathBuf,
    pub max_concurrent_compressions: usize,
    pub compression_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub download_filename: String,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            ghostscript_path: DEFAULT_GHOSTSCRIPT_PATH.to_string(),
            temp_dir: std::env::temp_dir(),
            max_concurrent_compressions: DEFAULT_MAX_CONCURRENT_COMPRESSIONS,
            compression_timeout_secs: DEFAULT_COMPRESSION_TIMEOUT_SECS,
            max_upload_bytes: (DEFAULT_MAX_UPLOAD_MB * 1024 * 1024) as usize,
            download_filename: DEFAULT_DOWNLOAD_FILENAME.to_string(),
            cors_allowed_origins: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Unset or blank
    /// keys keep their defaults; present but unparsable values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = AppConfig::default();

        if let Some(port) = get("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                expected: "a valid port number",
                value: port.clone(),
            })?;
        }

        if let Some(dir) = get("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }

        if let Some(path) = get("GHOSTSCRIPT_PATH") {
            config.ghostscript_path = path;
        }

        if let Some(dir) = get("TEMP_DIR") {
            config.temp_dir = PathBuf::from(dir);
        }

        if let Some(value) = get("MAX_CONCURRENT_COMPRESSIONS") {
            config.max_concurrent_compressions = parse_positive(
                "MAX_CONCURRENT_COMPRESSIONS",
                &value,
            )? as usize;
        }

        if let Some(value) = get("COMPRESSION_TIMEOUT_SECS") {
            config.compression_timeout_secs = parse_positive("COMPRESSION_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = get("MAX_UPLOAD_MB") {
            let mb = parse_positive("MAX_UPLOAD_MB", &value)?;
            config.max_upload_bytes = mb.saturating_mul(1024 * 1024) as usize;
        }

        if let Some(name) = get("DOWNLOAD_FILENAME") {
            config.download_filename = name;
        }

        if let Some(origins) = get("CORS_ALLOWED_ORIGINS") {
            config.cors_allowed_origins = Some(
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }

        Ok(config)
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            key,
            expected: "a positive integer",
            value: value.to_string(),
        }),
    }
}
