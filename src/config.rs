//! Environment-scoped configuration
//!
//! Loaded once at startup after `.env` has been read. The provider credential
//! has no default: a missing or empty `OPENAI_API_KEY` aborts startup.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

use crate::api::OpenAiClient;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub public_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let openai_base_url = lookup("OPENAI_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| OpenAiClient::DEFAULT_BASE_URL.to_string());

        let host = match lookup("HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "HOST", value: raw.clone() })?,
            None => DEFAULT_HOST.parse().map_err(|_| ConfigError::Invalid {
                key: "HOST",
                value: DEFAULT_HOST.to_string(),
            })?,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw.clone() })?,
            None => DEFAULT_PORT,
        };

        let public_dir = lookup("PUBLIC_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR));

        Ok(Self {
            openai_api_key,
            openai_base_url,
            host,
            port,
            public_dir,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
