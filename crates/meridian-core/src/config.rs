use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{MeridianError, Result};

/// Top-level configuration for the Meridian service.
///
/// Loaded from `~/.meridian/config.toml` by default. Anything the HTTP layer
/// needs from the environment is resolved into this struct by the binary and
/// handed to the API state explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeridianConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub leads: LeadsConfig,
    /// White papers offered through the lead-magnet funnel.
    #[serde(default = "default_white_papers")]
    pub white_papers: Vec<WhitePaperConfig>,
}

impl Default for MeridianConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            chat: ChatConfig::default(),
            leads: LeadsConfig::default(),
            white_papers: default_white_papers(),
        }
    }
}

impl MeridianConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MeridianConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        let (config, source) = Self::load_with_source(path);
        match source {
            ConfigSource::File => {}
            ConfigSource::Missing => {
                info!("No config file at {}. Using defaults.", path.display());
            }
            ConfigSource::Invalid(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
            }
        }
        config
    }

    /// Same fallback as [`load_or_default`](Self::load_or_default), but
    /// returns where the config came from instead of logging it.
    ///
    /// The binary reads `general.log_level` before tracing exists, so it
    /// reports the outcome itself once the subscriber is installed.
    pub fn load_with_source(path: &Path) -> (Self, ConfigSource) {
        match Self::load(path) {
            Ok(config) => (config, ConfigSource::File),
            Err(MeridianError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                (Self::default(), ConfigSource::Missing)
            }
            Err(e) => (Self::default(), ConfigSource::Invalid(e)),
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| MeridianError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Look up a configured white paper by slug.
    pub fn white_paper(&self, slug: &str) -> Option<&WhitePaperConfig> {
        self.white_papers.iter().find(|p| p.slug == slug)
    }
}

/// Where a loaded [`MeridianConfig`] came from.
#[derive(Debug)]
pub enum ConfigSource {
    /// Parsed from the file.
    File,
    /// No file at the path; defaults in use.
    Missing,
    /// The file exists but could not be read or parsed; defaults in use.
    Invalid(MeridianError),
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Firm name used in API responses.
    pub site_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            site_name: "Meridian Advisory".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Origins allowed by CORS. Empty means same-origin only.
    pub allowed_origins: Vec<String>,
    /// Requests per second accepted on `/api/*`.
    pub rate_limit_per_sec: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3040,
            allowed_origins: vec![],
            rate_limit_per_sec: 20,
        }
    }
}

/// Chat assistant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Whether the chat endpoint answers at all.
    pub enabled: bool,
    /// Maximum chat message length in characters.
    pub max_message_length: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_message_length: 2000,
        }
    }
}

/// Lead form settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadsConfig {
    /// Maximum contact-form message length in characters.
    pub max_message_length: usize,
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            max_message_length: 5000,
        }
    }
}

/// A downloadable white paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitePaperConfig {
    pub slug: String,
    pub title: String,
    pub download_url: String,
}

fn default_white_papers() -> Vec<WhitePaperConfig> {
    vec![
        WhitePaperConfig {
            slug: "ai-readiness".to_string(),
            title: "The AI Readiness Playbook".to_string(),
            download_url: "/downloads/ai-readiness-playbook.pdf".to_string(),
        },
        WhitePaperConfig {
            slug: "operations-audit".to_string(),
            title: "Running an Operations Audit in 30 Days".to_string(),
            download_url: "/downloads/operations-audit-guide.pdf".to_string(),
        },
    ]
}
