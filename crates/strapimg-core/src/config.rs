//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/strapimg/config.toml)
//! 3. Environment variables (STRAPIMG_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
const ENV_PREFIX: &str = "STRAPIMG";

/// Default location of Joplin's resource blobs on desktop installs
pub const DEFAULT_RESOURCES_PATH: &str = "~/.config/joplin-desktop/resources";

/// Default address of the Joplin Data API (clipper server)
pub const DEFAULT_JOPLIN_URL: &str = "http://localhost:41184";

/// Label of the settings section shown by `config show`
pub const SETTINGS_SECTION: &str = "Strapi Images";

/// Description of a single user-facing setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Whether the value should be masked when displayed
    pub secret: bool,
}

/// Every setting that can be changed with `config set`
pub const SETTINGS: &[SettingSpec] = &[
    SettingSpec {
        key: "api_key",
        label: "API Key",
        description: "Strapi API token used for the image upload service.",
        secret: true,
    },
    SettingSpec {
        key: "strapi_url",
        label: "Strapi URL",
        description: "Base URL of the Strapi instance (e.g., https://cms.example.com).",
        secret: false,
    },
    SettingSpec {
        key: "resources_path",
        label: "Joplin Resources Path",
        description: "Directory holding Joplin resource files, use ~ for the home directory.",
        secret: false,
    },
    SettingSpec {
        key: "joplin_url",
        label: "Joplin Data API URL",
        description: "Address of the Joplin Web Clipper service.",
        secret: false,
    },
    SettingSpec {
        key: "joplin_token",
        label: "Joplin Token",
        description: "Authorization token of the Joplin Web Clipper service.",
        secret: true,
    },
    SettingSpec {
        key: "log_file",
        label: "Log File",
        description: "Write logs here instead of stderr when STRAPIMG_LOG is set.",
        secret: false,
    },
];

/// Look up a setting by key
pub fn setting_spec(key: &str) -> Option<&'static SettingSpec> {
    SETTINGS.iter().find(|s| s.key == key)
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Strapi API token
    #[serde(default)]
    pub api_key: String,

    /// Strapi base URL
    #[serde(default)]
    pub strapi_url: String,

    /// Directory with Joplin resource files (may start with ~)
    #[serde(default = "default_resources_path")]
    pub resources_path: String,

    /// Joplin Data API base URL
    #[serde(default = "default_joplin_url")]
    pub joplin_url: String,

    /// Joplin Data API token
    #[serde(default)]
    pub joplin_token: Option<String>,

    /// Log file used when logging is enabled
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            strapi_url: String::new(),
            resources_path: default_resources_path(),
            joplin_url: default_joplin_url(),
            joplin_token: None,
            log_file: None,
        }
    }
}

/// The values one pipeline run works with
///
/// Read once from [`Config`] and handed to every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub strapi_url: String,
    pub resources_path: String,
}

impl Settings {
    pub fn new(
        api_key: impl Into<String>,
        strapi_url: impl Into<String>,
        resources_path: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            strapi_url: strapi_url.into(),
            resources_path: resources_path.into(),
        }
    }

    /// Both the API key and the Strapi URL are set
    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.strapi_url.trim().is_empty()
    }

    /// Strapi base URL without a trailing slash
    pub fn strapi_base(&self) -> &str {
        self.strapi_url.trim().trim_end_matches('/')
    }

    /// Strapi upload endpoint
    pub fn upload_endpoint(&self) -> String {
        format!("{}/api/upload", self.strapi_base())
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (STRAPIMG_API_KEY, STRAPIMG_STRAPI_URL, ...)
    /// 2. Config file (~/.config/strapimg/config.toml or STRAPIMG_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_API_KEY", ENV_PREFIX)) {
            self.api_key = val;
        }

        if let Ok(val) = std::env::var(format!("{}_STRAPI_URL", ENV_PREFIX)) {
            self.strapi_url = val;
        }

        if let Ok(val) = std::env::var(format!("{}_RESOURCES_PATH", ENV_PREFIX)) {
            if !val.is_empty() {
                self.resources_path = val;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_JOPLIN_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.joplin_url = val;
            }
        }

        // Empty string clears the token
        if let Ok(val) = std::env::var(format!("{}_JOPLIN_TOKEN", ENV_PREFIX)) {
            self.joplin_token = if val.is_empty() { None } else { Some(val) };
        }
    }

    /// Set a value by its setting key
    ///
    /// Empty strings and `none` clear optional values.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let optional = |v: &str| {
            if v.is_empty() || v == "none" {
                None
            } else {
                Some(v.to_string())
            }
        };

        match key {
            "api_key" => self.api_key = value.to_string(),
            "strapi_url" => self.strapi_url = value.to_string(),
            "resources_path" => {
                self.resources_path = optional(value).unwrap_or_else(default_resources_path)
            }
            "joplin_url" => self.joplin_url = optional(value).unwrap_or_else(default_joplin_url),
            "joplin_token" => self.joplin_token = optional(value),
            "log_file" => self.log_file = optional(value).map(PathBuf::from),
            _ => {
                let valid: Vec<_> = SETTINGS.iter().map(|s| s.key).collect();
                anyhow::bail!(
                    "Unknown configuration key: '{}'\nValid keys: {}",
                    key,
                    valid.join(", ")
                );
            }
        }
        Ok(())
    }

    /// Current value of a setting as display text (None when unset)
    pub fn value_of(&self, key: &str) -> Option<String> {
        let non_empty = |v: &str| (!v.is_empty()).then(|| v.to_string());
        match key {
            "api_key" => non_empty(&self.api_key),
            "strapi_url" => non_empty(&self.strapi_url),
            "resources_path" => non_empty(&self.resources_path),
            "joplin_url" => non_empty(&self.joplin_url),
            "joplin_token" => self.joplin_token.clone(),
            "log_file" => self.log_file.as_ref().map(|p| p.display().to_string()),
            _ => None,
        }
    }

    /// Upload settings for one pipeline run
    pub fn settings(&self) -> Settings {
        Settings::new(&self.api_key, &self.strapi_url, &self.resources_path)
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with STRAPIMG_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("strapimg")
            .join("config.toml")
    }
}

fn default_resources_path() -> String {
    DEFAULT_RESOURCES_PATH.to_string()
}

fn default_joplin_url() -> String {
    DEFAULT_JOPLIN_URL.to_string()
}
