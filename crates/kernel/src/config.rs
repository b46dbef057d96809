//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use atrium_media::InjectionPolicy;
use url::Url;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL (default: http://localhost:8000).
    pub server_url: Url,

    /// Bearer token attached to every backend request, if any.
    pub auth_token: Option<String>,

    /// Per-request timeout (default: 30 seconds).
    pub request_timeout: Duration,

    /// How plugins merge their admin menu entries (default: delegated).
    pub menu_injection: InjectionPolicy,
}

/// Backend used when `SERVER_URL` is unset.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

impl Config {
    /// Configuration for `server_url` with every other setting at its default.
    pub fn new(server_url: Url) -> Self {
        Self {
            server_url,
            auth_token: None,
            request_timeout: Duration::from_secs(30),
            menu_injection: InjectionPolicy::default(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server_url =
            env::var("SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let server_url = Url::parse(&server_url).context("SERVER_URL must be a valid URL")?;

        let auth_token = env::var("AUTH_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let timeout_secs: u64 = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        let menu_injection = match env::var("MENU_INJECTION") {
            Ok(raw) => raw
                .parse()
                .map_err(anyhow::Error::msg)
                .context("invalid MENU_INJECTION")?,
            Err(_) => InjectionPolicy::default(),
        };

        Ok(Self {
            auth_token,
            request_timeout: Duration::from_secs(timeout_secs),
            menu_injection,
            ..Self::new(server_url)
        })
    }
}
