//! Client configuration
//!
//! Endpoints, timeouts and storage locations, read from environment
//! variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Client configuration struct
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the movie REST API
    pub api_url: String,
    /// Base URL of the image upload endpoint
    pub upload_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Directory holding durable client state
    pub home_dir: PathBuf,
    /// Movies shown per page
    pub page_size: u32,
    /// Largest image accepted for upload, in bytes
    pub max_upload_bytes: u64,
}

impl ClientConfig {
    /// Create a new ClientConfig from environment variables
    ///
    /// # Environment Variables
    /// - `MOVIEDECK_API_URL`: API base URL (default: "http://localhost:3000")
    /// - `MOVIEDECK_UPLOAD_URL`: upload base URL (default: the API URL)
    /// - `MOVIEDECK_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    /// - `MOVIEDECK_HOME`: state directory (default: "$HOME/.moviedeck")
    /// - `MOVIEDECK_PAGE_SIZE`: movies per page (default: 8)
    /// - `MOVIEDECK_MAX_UPLOAD_BYTES`: upload size limit (default: 5 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env::var("MOVIEDECK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = validate_url("MOVIEDECK_API_URL", &api_url)?;

        let upload_url = match env::var("MOVIEDECK_UPLOAD_URL") {
            Ok(url) => validate_url("MOVIEDECK_UPLOAD_URL", &url)?,
            Err(_) => api_url.clone(),
        };

        let timeout = Duration::from_secs(parse_number("MOVIEDECK_TIMEOUT_SECS", 30)?);
        let page_size = parse_number("MOVIEDECK_PAGE_SIZE", 8)?;
        let max_upload_bytes = parse_number("MOVIEDECK_MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?;

        let home_dir = env::var("MOVIEDECK_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home_dir());

        Ok(Self {
            api_url,
            upload_url,
            timeout,
            home_dir,
            page_size,
            max_upload_bytes,
        })
    }

    /// Configuration pointing both endpoints at one base URL
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let api_url = validate_url("base_url", base_url)?;
        Ok(Self {
            upload_url: api_url.clone(),
            api_url,
            timeout: Duration::from_secs(30),
            home_dir: default_home_dir(),
            page_size: 8,
            max_upload_bytes: 5 * 1024 * 1024,
        })
    }

    /// Point the API at another URL
    ///
    /// The upload URL follows unless it was configured on its own.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        let api_url = validate_url("api_url", api_url)?;
        if self.upload_url == self.api_url {
            self.upload_url = api_url.clone();
        }
        self.api_url = api_url;
        Ok(self)
    }

    /// File holding state that survives restarts
    pub fn durable_storage_path(&self) -> PathBuf {
        self.home_dir.join("storage.json")
    }

    /// File holding state scoped to the OS session
    pub fn session_storage_path(&self) -> PathBuf {
        let user = env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or_else(|_| "default".to_string());
        env::temp_dir().join(format!("moviedeck-session-{}.json", user))
    }
}

fn default_home_dir() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".moviedeck"))
        .unwrap_or_else(|_| PathBuf::from(".moviedeck"))
}

/// Check a URL setting and strip its trailing slash
fn validate_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
    };

    let url = Url::parse(value).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }

    Ok(value.trim_end_matches('/').to_string())
}

fn parse_number<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(default),
    }
}
