//! Site configuration (_config.yml)

use anyhow::{anyhow, bail, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding `prismic.api_endpoint`
pub const ENV_API_ENDPOINT: &str = "PRISMIC_API_ENDPOINT";
/// Environment variable overriding `prismic.access_token`
pub const ENV_ACCESS_TOKEN: &str = "PRISMIC_ACCESS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,
    pub timezone: String,

    // Content repository
    #[serde(default)]
    pub prismic: PrismicConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Space Traveling".to_string(),
            language: "pt-BR".to_string(),
            timezone: String::new(),
            prismic: PrismicConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Override repository settings from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_API_ENDPOINT).ok(),
            std::env::var(ENV_ACCESS_TOKEN).ok(),
        );
    }

    /// Override repository settings; empty values are ignored
    pub fn apply_overrides(&mut self, api_endpoint: Option<String>, access_token: Option<String>) {
        if let Some(endpoint) = api_endpoint.filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Using API endpoint from {}", ENV_API_ENDPOINT);
            self.prismic.api_endpoint = endpoint;
        }
        if let Some(token) = access_token.filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Using access token from {}", ENV_ACCESS_TOKEN);
            self.prismic.access_token = Some(token);
        }
    }

    /// Resolve the configured display timezone, UTC when unset
    pub fn timezone(&self) -> Result<Tz> {
        if self.timezone.trim().is_empty() {
            return Ok(Tz::UTC);
        }
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid timezone {:?}: {}", self.timezone, e))
    }

    /// Check the settings needed to talk to the content repository
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.prismic.api_endpoint.trim();
        if endpoint.is_empty() {
            bail!(
                "No content repository configured: set prismic.api_endpoint in _config.yml or {}",
                ENV_API_ENDPOINT
            );
        }
        reqwest::Url::parse(endpoint)
            .map_err(|e| anyhow!("Invalid API endpoint {:?}: {}", endpoint, e))?;
        if self.prismic.page_size == 0 {
            bail!("prismic.page_size must be at least 1");
        }
        if self.prismic.document_type.trim().is_empty() {
            bail!("prismic.document_type must not be empty");
        }
        self.timezone()?;
        Ok(())
    }
}

/// Content repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismicConfig {
    pub api_endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,
    pub page_size: usize,
    pub request_timeout_secs: u64,
}

impl Default for PrismicConfig {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            access_token: None,
            document_type: "posts".to_string(),
            page_size: 2,
            request_timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Space Traveling");
        assert_eq!(config.prismic.document_type, "posts");
        assert_eq!(config.prismic.page_size, 2);
        assert_eq!(config.timezone().unwrap(), Tz::UTC);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
timezone: America/Sao_Paulo
prismic:
  api_endpoint: https://spacetraveling.cdn.prismic.io/api/v2
  page_size: 5
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.prismic.page_size, 5);
        assert_eq!(config.prismic.document_type, "posts");
        assert_eq!(config.timezone().unwrap(), chrono_tz::America::Sao_Paulo);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = SiteConfig::default();
        config.prismic.api_endpoint = "https://old.cdn.prismic.io/api/v2".to_string();
        config.apply_overrides(
            Some("https://new.cdn.prismic.io/api/v2".to_string()),
            Some("secret".to_string()),
        );
        assert_eq!(config.prismic.api_endpoint, "https://new.cdn.prismic.io/api/v2");
        assert_eq!(config.prismic.access_token.as_deref(), Some("secret"));

        config.apply_overrides(Some("  ".to_string()), None);
        assert_eq!(config.prismic.api_endpoint, "https://new.cdn.prismic.io/api/v2");
    }

    #[test]
    fn test_validate_rejects_missing_endpoint() {
        let config = SiteConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_timezone() {
        let mut config = SiteConfig::default();
        config.prismic.api_endpoint = "https://x.cdn.prismic.io/api/v2".to_string();
        config.timezone = "Mars/Olympus_Mons".to_string();
        assert!(config.validate().is_err());
    }
}
