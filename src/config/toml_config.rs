use crate::core::view::{PageSettings, DEFAULT_SITE_NAME};
use crate::core::ConfigProvider;
use crate::utils::error::{CourseError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRY_ATTEMPTS: u32 = 2;
const DEFAULT_RETRY_DELAY_MS: u64 = 250;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_retry_attempts")]
    pub attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_site_name")]
    pub site_name: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_retry_attempts() -> u32 {
    DEFAULT_RETRY_ATTEMPTS
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_RETRY_ATTEMPTS,
            delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CourseError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CourseError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left verbatim.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn page_settings(&self) -> PageSettings {
        PageSettings {
            site_name: self.page.site_name.clone(),
            currency_symbol: self.page.currency_symbol.clone(),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.service.api_base_url
    }

    fn request_timeout_secs(&self) -> u64 {
        self.service.timeout_seconds
    }

    fn retry_attempts(&self) -> u32 {
        self.retry.attempts
    }

    fn retry_delay_ms(&self) -> u64 {
        self.retry.delay_ms
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.service.headers
    }

    fn site_name(&self) -> &str {
        &self.page.site_name
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("service.api_base_url", &self.service.api_base_url)?;
        validation::validate_positive_number(
            "service.timeout_seconds",
            self.service.timeout_seconds,
            1,
        )?;
        validation::validate_range("retry.attempts", self.retry.attempts, 0, 10)?;
        validation::validate_range("retry.delay_ms", self.retry.delay_ms, 0, 60_000)?;
        validation::validate_non_empty_string("page.site_name", &self.page.site_name)?;

        for (name, value) in &self.service.headers {
            if value.contains("${") {
                return Err(CourseError::MissingConfigError {
                    field: format!(
                        "service.headers.{} (unresolved variable in '{}')",
                        name, value
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[service]
api_base_url = "http://localhost:5000/api"
"#,
        )
        .unwrap();

        assert_eq!(config.request_timeout_secs(), 10);
        assert_eq!(config.retry_attempts(), 2);
        assert_eq!(config.retry_delay_ms(), 250);
        assert_eq!(config.site_name(), "LearnEx");
        assert_eq!(config.page_settings(), PageSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[service]
api_base_url = "https://courses.example.com"
timeout_seconds = 3

[service.headers]
Accept-Language = "en"

[retry]
attempts = 4
delay_ms = 100

[page]
site_name = "Academy"
currency_symbol = "€"
"#,
        )
        .unwrap();

        assert_eq!(config.request_timeout_secs(), 3);
        assert_eq!(config.retry_attempts(), 4);
        assert_eq!(config.headers().get("Accept-Language").map(String::as_str), Some("en"));
        assert_eq!(config.page_settings().currency_symbol, "€");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("COURSE_DETAILS_TEST_HOST", "api.internal");
        let config = TomlConfig::from_toml_str(
            r#"
[service]
api_base_url = "http://${COURSE_DETAILS_TEST_HOST}/v1"
"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url(), "http://api.internal/v1");
    }

    #[test]
    fn test_unresolved_header_variable_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[service]
api_base_url = "http://localhost"

[service.headers]
Authorization = "Bearer ${COURSE_DETAILS_UNSET_TOKEN}"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(CourseError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_missing_service_section_is_parse_error() {
        let err = TomlConfig::from_toml_str("[retry]\nattempts = 1\n").unwrap_err();
        assert!(matches!(err, CourseError::ConfigValidationError { .. }));
    }
}
