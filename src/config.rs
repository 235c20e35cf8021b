//! Configuration types for braintrust-export

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "BRAINTRUST_API_KEY";

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "BRAINTRUST_API_URL";

/// Base URL used when none is configured
pub const DEFAULT_API_URL: &str = "https://api.braintrust.dev";

/// Export run configuration
///
/// Built once at startup (environment, then command-line overrides) and passed
/// into the pipeline. Nothing downstream reads the environment.
#[derive(Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// API key sent as a bearer token (never serialized)
    #[serde(skip)]
    pub api_key: String,

    /// API base URL (default: "https://api.braintrust.dev")
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Directory under which `CSV/Experiments` and `CSV/Datasets` are created (default: ".")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Objects requested per page from list and fetch endpoints (default: 100)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            output_dir: default_output_dir(),
            page_size: default_page_size(),
        }
    }
}

impl std::fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("output_dir", &self.output_dir)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl ExportConfig {
    /// Build a configuration from the process environment
    ///
    /// # Errors
    /// Returns [`Error::MissingApiKey`] when `BRAINTRUST_API_KEY` is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank(API_KEY_ENV).ok_or(Error::MissingApiKey)?;
        let api_url = non_blank(API_URL_ENV).unwrap_or_else(default_api_url);

        Ok(Self {
            api_key,
            api_url,
            ..Default::default()
        })
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        if self.page_size == 0 {
            return Err(Error::config("page_size", "page size must be greater than zero"));
        }
        self.base_url().map(|_| ())
    }

    /// Parsed API base URL, always ending in `/` so relative joins keep any path prefix
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.api_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let url = Url::parse(&raw)
            .map_err(|e| Error::config("api_url", format!("invalid API URL '{}': {}", self.api_url, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::config(
                "api_url",
                format!("unsupported URL scheme '{}' (expected http or https)", other),
            )),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_page_size() -> usize {
    100
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let result = ExportConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(Error::MissingApiKey)));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let result = ExportConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "   ")]));
        assert!(matches!(result, Err(Error::MissingApiKey)));
    }

    #[test]
    fn api_url_defaults_when_unset() {
        let config = ExportConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn api_url_is_read_from_environment() {
        let config = ExportConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "sk-test"),
            (API_URL_ENV, "http://localhost:8000"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:8000");
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = ExportConfig {
            api_key: "k".into(),
            api_url: "https://proxy.example.com/braintrust".into(),
            ..Default::default()
        };
        let url = config.base_url().unwrap();
        assert_eq!(url.as_str(), "https://proxy.example.com/braintrust/");
        assert_eq!(
            url.join("v1/project").unwrap().as_str(),
            "https://proxy.example.com/braintrust/v1/project",
            "joins must keep the path prefix"
        );
    }

    #[test]
    fn validate_rejects_bad_url_and_scheme() {
        let mut config = ExportConfig {
            api_key: "k".into(),
            api_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));

        config.api_url = "ftp://files.example.com".into();
        match config.validate() {
            Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("api_url")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let config = ExportConfig {
            api_key: "k".into(),
            page_size: 0,
            ..Default::default()
        };
        match config.validate() {
            Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("page_size")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = ExportConfig {
            api_key: "sk-very-secret".into(),
            ..Default::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn serialization_skips_api_key_and_fills_defaults() {
        let config = ExportConfig {
            api_key: "sk-very-secret".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).expect("serialize failed");
        assert!(!json.contains("sk-very-secret"));

        let parsed: ExportConfig = serde_json::from_str("{}").expect("deserialize failed");
        assert_eq!(parsed.api_url, DEFAULT_API_URL);
        assert_eq!(parsed.page_size, 100);
        assert!(parsed.api_key.is_empty());
    }
}
