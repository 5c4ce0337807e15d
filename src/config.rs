//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::DEFAULT_FORM_KEY;

pub const DEFAULT_PRODUCTS_URL: &str = "https://products-management-service-latest.onrender.com";
pub const DEFAULT_ORDERS_URL: &str = "https://orders-management-service-latest.onrender.com";

/// Environment overrides for the service URLs
pub const PRODUCTS_URL_ENV: &str = "STOREFRONT_PRODUCTS_URL";
pub const ORDERS_URL_ENV: &str = "STOREFRONT_ORDERS_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TuiConfig {
    /// Products service base URL
    #[serde(alias = "products_url")]
    pub products_url: Option<String>,
    /// Orders service base URL
    #[serde(alias = "orders_url")]
    pub orders_url: Option<String>,
    /// Storage slot for the sign-up form
    #[serde(alias = "form_storage_key")]
    pub form_storage_key: Option<String>,
    /// Directory holding saved form snapshots
    #[serde(alias = "form_storage_dir")]
    pub form_storage_dir: Option<PathBuf>,
    /// JSON schema replacing the built-in sign-up form
    #[serde(alias = "schema_path")]
    pub schema_path: Option<PathBuf>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "storefront", "storefront-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Products base URL: environment, then config, then the deployed service
    pub fn products_url(&self) -> String {
        resolve_url(
            std::env::var(PRODUCTS_URL_ENV).ok(),
            self.products_url.as_deref(),
            DEFAULT_PRODUCTS_URL,
        )
    }

    /// Orders base URL: environment, then config, then the deployed service
    pub fn orders_url(&self) -> String {
        resolve_url(
            std::env::var(ORDERS_URL_ENV).ok(),
            self.orders_url.as_deref(),
            DEFAULT_ORDERS_URL,
        )
    }

    pub fn form_storage_key(&self) -> String {
        self.form_storage_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FORM_KEY.to_string())
    }
}

/// First non-blank candidate wins
fn resolve_url(env: Option<String>, configured: Option<&str>, default: &str) -> String {
    env.filter(|v| !v.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| default.to_string())
}
