//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPWINDOW_API_BASE_URL` - Catalog API base URL (default: <https://dummyjson.com>)
//! - `SHOPWINDOW_PAGE_SIZE` - Products fetched per page (default: 15)
//! - `SHOPWINDOW_CART_PATH` - Durable cart state file (default: shopwindow-cart.json)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "https://dummyjson.com";
const DEFAULT_PAGE_SIZE: u64 = 15;
const DEFAULT_CART_PATH: &str = "shopwindow-cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Catalog API base URL.
    pub api_base_url: Url,
    /// Products fetched per page.
    pub page_size: u64,
    /// Durable cart state file path.
    pub cart_path: PathBuf,
}

impl CliConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = match std::env::var("SHOPWINDOW_API_BASE_URL") {
            Ok(value) => value
                .parse::<Url>()
                .map_err(|e| ConfigError::InvalidEnvVar("SHOPWINDOW_API_BASE_URL", e.to_string()))?,
            Err(_) => Url::parse(DEFAULT_API_BASE_URL)
                .map_err(|e| ConfigError::InvalidEnvVar("SHOPWINDOW_API_BASE_URL", e.to_string()))?,
        };

        let page_size = match std::env::var("SHOPWINDOW_PAGE_SIZE") {
            Ok(value) => {
                let parsed = value
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidEnvVar("SHOPWINDOW_PAGE_SIZE", e.to_string()))?;
                if parsed == 0 {
                    return Err(ConfigError::InvalidEnvVar(
                        "SHOPWINDOW_PAGE_SIZE",
                        "page size must be at least 1".to_string(),
                    ));
                }
                parsed
            }
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        let cart_path = std::env::var("SHOPWINDOW_CART_PATH")
            .map_or_else(|_| PathBuf::from(DEFAULT_CART_PATH), PathBuf::from);

        Ok(Self {
            api_base_url,
            page_size,
            cart_path,
        })
    }
}
