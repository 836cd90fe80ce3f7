// src/core/config_manager.rs
//! Unified configuration management: `config.yaml` sections plus env overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/117 Safari/537.36";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigManager {
    pub server: ServerSettings,
    pub scraper: ScraperSettings,
    pub frontend: FrontendSettings,
    pub export: ExportSettings,
    pub wizard: WizardSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub address: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperSettings {
    pub user_agent: String,
    /// Appended to the built-in boilerplate list.
    pub extra_boilerplate: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrontendSettings {
    /// Base URL hosting `/api/generate` and `/api/scrape-url`.
    pub api_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WizardSettings {
    pub steps_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ConfigManager,
    #[serde(default)]
    production: ConfigManager,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
        }
    }
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            extra_boilerplate: Vec::new(),
        }
    }
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl ConfigManager {
    /// Load the section for the current environment, then apply env overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var("COVERLY_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.yaml"));
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = if path.exists() {
            Self::load_from_file(&path, &environment)?
        } else {
            warn!("{} not found, using built-in defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("COVERLY_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("ROCKET_PORT") {
            self.server.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
        }

        if let Ok(address) = std::env::var("ROCKET_ADDRESS") {
            self.server.address = address
                .parse::<IpAddr>()
                .map_err(|_| anyhow::anyhow!("ROCKET_ADDRESS must be a valid IP address"))?;
        }

        if let Ok(url) = std::env::var("COVERLY_API_URL") {
            self.frontend.api_base_url = url;
        }

        Ok(())
    }

    /// Ensure the export directory exists
    pub async fn ensure_directories(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.export.output_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to create directory: {}",
                    self.export.output_dir.display()
                )
            })
    }
}
