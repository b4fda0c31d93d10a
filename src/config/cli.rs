use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, ValueEnum};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "course-details")]
#[command(about = "Load a course and print its detail page model")]
pub struct CliConfig {
    /// Course identifier as it appears in the route
    pub course_id: String,

    #[arg(long, default_value = "http://localhost:5000/api", conflicts_with = "config")]
    pub api_base_url: String,

    /// Load service and page settings from a TOML file instead of flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "10", conflicts_with = "config")]
    pub request_timeout_secs: u64,

    #[arg(long, default_value = "2", conflicts_with = "config")]
    pub retry_attempts: u32,

    #[arg(long, default_value = "250", conflicts_with = "config")]
    pub retry_delay_ms: u64,

    /// Extra request header, `Name: value`
    #[arg(long = "header", value_parser = parse_header, conflicts_with = "config")]
    pub headers: Vec<(String, String)>,

    #[arg(long, default_value = "LearnEx", conflicts_with = "config")]
    pub site_name: String,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(skip)]
    header_map: HashMap<String, String>,
}

fn parse_header(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("header name cannot be empty".to_string());
    }
    Ok((name.to_string(), value.trim().to_string()))
}

impl CliConfig {
    /// Parses arguments and indexes the repeated `--header` flags.
    pub fn from_args() -> Self {
        Self::parse().with_header_map()
    }

    pub fn with_header_map(mut self) -> Self {
        self.header_map = self.headers.iter().cloned().collect();
        self
    }
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.header_map
    }

    fn site_name(&self) -> &str {
        &self.site_name
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_positive_number("request_timeout_secs", self.request_timeout_secs, 1)?;
        validation::validate_range("retry_attempts", self.retry_attempts, 0, 10)?;
        validation::validate_non_empty_string("site_name", &self.site_name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = CliConfig::try_parse_from(["course-details", "abc123"])
            .unwrap()
            .with_header_map();
        assert_eq!(config.course_id, "abc123");
        assert_eq!(config.api_base_url(), "http://localhost:5000/api");
        assert_eq!(config.retry_attempts(), 2);
        assert_eq!(config.site_name(), "LearnEx");
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.headers().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_repeated_headers() {
        let config = CliConfig::try_parse_from([
            "course-details",
            "--header",
            "Accept-Language: en",
            "--header",
            "X-Client:cli",
            "abc",
        ])
        .unwrap()
        .with_header_map();
        assert_eq!(config.headers().get("Accept-Language").map(String::as_str), Some("en"));
        assert_eq!(config.headers().get("X-Client").map(String::as_str), Some("cli"));
    }

    #[test]
    fn test_malformed_header_is_rejected() {
        let parsed = CliConfig::try_parse_from(["course-details", "--header", "nocolon", "abc"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_config_file_conflicts_with_service_flags() {
        for flags in [
            ["--api-base-url", "http://other:5000"],
            ["--header", "X-Client: cli"],
            ["--site-name", "Academy"],
            ["--retry-attempts", "5"],
        ] {
            let args = ["course-details", "--config", "course.toml", flags[0], flags[1], "abc"];
            assert!(CliConfig::try_parse_from(args).is_err(), "{:?} accepted", flags);
        }

        let args = ["course-details", "--config", "course.toml", "abc"];
        let config = CliConfig::try_parse_from(args).unwrap();
        assert_eq!(config.config.as_deref(), Some("course.toml"));
    }

    #[test]
    fn test_invalid_base_url_fails_validation() {
        let args = ["course-details", "--api-base-url", "ftp://x", "abc"];
        let config = CliConfig::try_parse_from(args).unwrap();
        assert!(config.validate().is_err());
    }
}
