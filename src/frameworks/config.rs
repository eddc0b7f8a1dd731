use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use url::Url;

// Runtime/server constants.

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URL: &str = "https://localhost:7135/api/";
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONFIG_FILE: &str = "restaurant.toml";
// Idle session lifetime is kept within 30..=120 minutes.
pub const SESSION_IDLE_MINUTES: (u64, u64) = (30, 120);
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("invalid API base URL {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_host: String,
    pub http_port: u16,
    pub api_base_url: Url,
    pub api_timeout: Duration,
    pub session_idle_timeout: Duration,
    pub booking_app_url: Option<String>,
}

// Optional file layer; every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub bind_host: Option<String>,
    pub http_port: Option<u16>,
    pub api_base_url: Option<String>,
    pub api_timeout_secs: Option<u64>,
    pub session_idle_timeout_mins: Option<u64>,
    pub booking_app_url: Option<String>,
}

impl FileSettings {
    pub fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    // A missing default file is fine; a missing explicitly named file is not.
    pub fn read(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(path, &text),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl Settings {
    // File named by RESTAURANT_CONFIG (or restaurant.toml), then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let (path, required) = match env_value("RESTAURANT_CONFIG") {
            Some(path) => (PathBuf::from(path), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let file = FileSettings::read(&path, required)?;
        Self::from_sources(file, env_value)
    }

    pub fn from_sources(
        file: FileSettings,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind_host = env("HTTP_HOST")
            .or(file.bind_host)
            .unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string());

        let http_port = match env("HTTP_PORT") {
            Some(raw) => parse_number("HTTP_PORT", &raw)?,
            None => file.http_port.unwrap_or(DEFAULT_HTTP_PORT),
        };

        let api_base_url = env("API_BASE_URL")
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = parse_base_url(&api_base_url)?;

        // Timeouts must be at least one second.
        let api_timeout = match env("API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = parse_number("API_TIMEOUT_SECS", &raw)?;
                positive_secs("API_TIMEOUT_SECS", &raw, secs)?
            }
            None => match file.api_timeout_secs {
                Some(secs) => positive_secs("api_timeout_secs", &secs.to_string(), secs)?,
                None => DEFAULT_API_TIMEOUT,
            },
        };

        let idle_minutes: u64 = match env("SESSION_IDLE_TIMEOUT_MINS") {
            Some(raw) => parse_number("SESSION_IDLE_TIMEOUT_MINS", &raw)?,
            None => file
                .session_idle_timeout_mins
                .unwrap_or(SESSION_IDLE_MINUTES.0),
        };
        let (min, max) = SESSION_IDLE_MINUTES;
        let session_idle_timeout = Duration::from_secs(idle_minutes.clamp(min, max) * 60);

        let booking_app_url = env("BOOKING_APP_URL")
            .or(file.booking_app_url)
            .filter(|url| !url.trim().is_empty());

        Ok(Self {
            bind_host,
            http_port,
            api_base_url,
            api_timeout,
            session_idle_timeout,
            booking_app_url,
        })
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}

fn positive_secs(key: &'static str, raw: &str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

// Only http(s); a trailing '/' is appended when missing.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|e| ConfigError::InvalidUrl {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            value: raw.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}
