use anyhow::{Context, Result};
use manage_users_client::ClientConfig;
use menu_tiles::AllowListFeature;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_MANAGE_USERS_API_URL: &str = "http://localhost:8082";
pub const DEFAULT_MANAGE_USERS_API_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_ENVIRONMENT_LABEL: &str = "Test";

// Menu service configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub manage_users_api_url: String,
    pub manage_users_api_timeout_ms: u64,
    pub allow_list_enabled: bool,
    pub allow_list_environment_label: String,
}

#[derive(Debug, Deserialize)]
struct MenuConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    manage_users_api_url: Option<String>,
    manage_users_api_timeout_ms: Option<u64>,
    allow_list_enabled: Option<bool>,
    allow_list_environment_label: Option<String>,
}

impl MenuConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("MENU_BIND")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .with_context(|| "parse MENU_BIND")?;
        let metrics_bind = std::env::var("MENU_METRICS_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .with_context(|| "parse MENU_METRICS_BIND")?;
        let manage_users_api_url = std::env::var("MANAGE_USERS_API_URL")
            .unwrap_or_else(|_| DEFAULT_MANAGE_USERS_API_URL.to_string());
        let manage_users_api_timeout_ms = match std::env::var("MANAGE_USERS_API_TIMEOUT_MS") {
            Ok(value) => value
                .parse()
                .with_context(|| "parse MANAGE_USERS_API_TIMEOUT_MS")?,
            Err(_) => DEFAULT_MANAGE_USERS_API_TIMEOUT_MS,
        };
        let allow_list_enabled = std::env::var("MANAGE_USER_ALLOW_LIST_ENABLED")
            .ok()
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let allow_list_environment_label =
            std::env::var("MANAGE_USER_ALLOW_LIST_ENVIRONMENT_LABEL")
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT_LABEL.to_string());
        Ok(Self {
            bind_addr,
            metrics_bind,
            manage_users_api_url,
            manage_users_api_timeout_ms,
            allow_list_enabled,
            allow_list_environment_label,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("MENU_CONFIG") {
            let contents =
                fs::read_to_string(&path).with_context(|| format!("read MENU_CONFIG: {path}"))?;
            let override_cfg: MenuConfigOverride =
                serde_yaml::from_str(&contents).with_context(|| "parse menu config yaml")?;
            if let Some(value) = override_cfg.bind_addr {
                config.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
            }
            if let Some(value) = override_cfg.metrics_bind {
                config.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
            }
            if let Some(value) = override_cfg.manage_users_api_url {
                config.manage_users_api_url = value;
            }
            if let Some(value) = override_cfg.manage_users_api_timeout_ms {
                config.manage_users_api_timeout_ms = value;
            }
            if let Some(value) = override_cfg.allow_list_enabled {
                config.allow_list_enabled = value;
            }
            if let Some(value) = override_cfg.allow_list_environment_label {
                config.allow_list_environment_label = value;
            }
        }
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            url: self.manage_users_api_url.clone(),
            timeout: Duration::from_millis(self.manage_users_api_timeout_ms),
        }
    }

    pub fn allow_list_feature(&self) -> AllowListFeature {
        AllowListFeature::new(
            self.allow_list_enabled,
            self.allow_list_environment_label.clone(),
        )
    }
}
