use crate::core::shell::Theme;
use crate::core::ConfigProvider;
use crate::utils::error::{AstroError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ORBITAL_ENDPOINT: &str = "http://api.open-notify.org/iss-now.json";
pub const DEFAULT_NEAR_BODY_ENDPOINT: &str = "https://api.nasa.gov/neo/rest/v1/feed";
pub const DEFAULT_NEAR_BODY_API_KEY: &str = "DEMO_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub shell: ShellConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub orbital_endpoint: String,
    pub near_body_endpoint: String,
    pub near_body_api_key: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            orbital_endpoint: DEFAULT_ORBITAL_ENDPOINT.to_string(),
            near_body_endpoint: DEFAULT_NEAR_BODY_ENDPOINT.to_string(),
            near_body_api_key: DEFAULT_NEAR_BODY_API_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub interval_seconds: u64,
    pub request_timeout_seconds: u64,
    pub near_body_limit: usize,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 10,
            request_timeout_seconds: 10,
            near_body_limit: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub default_theme: String,
    pub form_submit_delay_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            default_theme: Theme::default().slug().to_string(),
            form_submit_delay_ms: 1500,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AstroError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AstroError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NASA_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AstroError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("sources.orbital_endpoint", &self.sources.orbital_endpoint)?;
        validation::validate_url(
            "sources.near_body_endpoint",
            &self.sources.near_body_endpoint,
        )?;
        validation::validate_non_empty_string(
            "sources.near_body_api_key",
            &self.sources.near_body_api_key,
        )?;

        validation::validate_range("refresh.interval_seconds", self.refresh.interval_seconds, 1, 3600)?;
        validation::validate_range(
            "refresh.request_timeout_seconds",
            self.refresh.request_timeout_seconds,
            1,
            120,
        )?;
        validation::validate_range("refresh.near_body_limit", self.refresh.near_body_limit, 1, 50)?;

        if Theme::from_name(&self.shell.default_theme).is_none() {
            return Err(AstroError::InvalidConfigValueError {
                field: "shell.default_theme".to_string(),
                value: self.shell.default_theme.clone(),
                reason: format!("Unknown theme. Valid themes: {}", Theme::names().join(", ")),
            });
        }

        Ok(())
    }

    /// Theme the shell opens with; falls back to the default for unknown names.
    pub fn default_theme(&self) -> Theme {
        Theme::from_name(&self.shell.default_theme).unwrap_or_default()
    }

    pub fn form_submit_delay(&self) -> Duration {
        Duration::from_millis(self.shell.form_submit_delay_ms)
    }
}

impl ConfigProvider for TomlConfig {
    fn orbital_endpoint(&self) -> &str {
        &self.sources.orbital_endpoint
    }

    fn near_body_endpoint(&self) -> &str {
        &self.sources.near_body_endpoint
    }

    fn near_body_api_key(&self) -> &str {
        &self.sources.near_body_api_key
    }

    fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh.interval_seconds)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh.request_timeout_seconds)
    }

    fn near_body_limit(&self) -> usize {
        self.refresh.near_body_limit
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
