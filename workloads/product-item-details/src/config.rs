//! Workload configuration.

use edge_sdk::edge_observability::{LogFormat, LogLevel};
use serde::{Deserialize, Serialize};

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Settings of the product item details page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdpConfig {
    /// Catalog service base URL.
    pub catalog_base: String,
    /// Session key holding the bearer token.
    pub token_key: String,
    /// Product listing route, target of "Continue Shopping".
    pub products_route: String,
    /// Prefix of formatted prices.
    pub currency_prefix: String,
    /// Illustration shown on the failure view.
    pub error_image_url: String,
    /// Star icon next to ratings.
    pub star_image_url: String,
    /// Minimum log level.
    pub log_level: String,
    /// Log output: `json`, `human` or `tracing`.
    pub log_format: String,
}

impl Default for PdpConfig {
    fn default() -> Self {
        Self {
            catalog_base: "https://apis.ccbp.in".to_string(),
            token_key: "jwt_token".to_string(),
            products_route: "/products".to_string(),
            currency_prefix: "Rs".to_string(),
            error_image_url:
                "https://assets.ccbp.in/frontend/react-js/nxt-trendz-error-view-img.png"
                    .to_string(),
            star_image_url: "https://assets.ccbp.in/frontend/react-js/star-img.png".to_string(),
            log_level: "info".to_string(),
            log_format: "json".to_string(),
        }
    }
}

impl PdpConfig {
    /// Parse from TOML. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validated()
    }

    /// Read Spin application variables of the same names, falling back to
    /// defaults for any that are unset.
    #[cfg(target_arch = "wasm32")]
    pub fn from_spin_variables() -> Result<Self, ConfigError> {
        let var = |name: &str| spin_sdk::variables::get(name).ok();
        let mut config = Self::default();
        if let Some(v) = var("catalog_base") {
            config.catalog_base = v;
        }
        if let Some(v) = var("token_key") {
            config.token_key = v;
        }
        if let Some(v) = var("products_route") {
            config.products_route = v;
        }
        if let Some(v) = var("currency_prefix") {
            config.currency_prefix = v;
        }
        if let Some(v) = var("error_image_url") {
            config.error_image_url = v;
        }
        if let Some(v) = var("star_image_url") {
            config.star_image_url = v;
        }
        if let Some(v) = var("log_level") {
            config.log_level = v;
        }
        if let Some(v) = var("log_format") {
            config.log_format = v;
        }
        config.validated()
    }

    /// Parsed minimum log level.
    pub fn min_log_level(&self) -> LogLevel {
        self.log_level.parse().unwrap_or(LogLevel::Info)
    }

    /// Parsed log output format.
    pub fn log_format(&self) -> LogFormat {
        self.log_format.parse().unwrap_or_default()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        self.catalog_base = self.catalog_base.trim_end_matches('/').to_string();
        if !self.catalog_base.starts_with("http://") && !self.catalog_base.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "catalog_base",
                message: format!("expected an http(s) URL, got {:?}", self.catalog_base),
            });
        }
        if self.token_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "token_key",
                message: "must not be empty".to_string(),
            });
        }
        if !self.products_route.starts_with('/') {
            return Err(ConfigError::Invalid {
                key: "products_route",
                message: format!("expected an absolute path, got {:?}", self.products_route),
            });
        }
        if let Err(e) = self.log_level.parse::<LogLevel>() {
            return Err(ConfigError::Invalid {
                key: "log_level",
                message: e.to_string(),
            });
        }
        if let Err(e) = self.log_format.parse::<LogFormat>() {
            return Err(ConfigError::Invalid {
                key: "log_format",
                message: e.to_string(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PdpConfig::default();
        assert_eq!(config.catalog_base, "https://apis.ccbp.in");
        assert_eq!(config.token_key, "jwt_token");
        assert_eq!(config.products_route, "/products");
        assert_eq!(config.currency_prefix, "Rs");
        assert_eq!(config.min_log_level(), LogLevel::Info);
        assert!(matches!(config.log_format(), LogFormat::Json));
    }

    #[test]
    fn test_from_toml_overrides_and_defaults() {
        let config = PdpConfig::from_toml(
            r#"
catalog_base = "https://catalog.internal/"
currency_prefix = "USD"
log_level = "debug"
log_format = "tracing"
"#,
        )
        .unwrap();
        assert_eq!(config.catalog_base, "https://catalog.internal");
        assert_eq!(config.currency_prefix, "USD");
        assert_eq!(config.token_key, "jwt_token");
        assert_eq!(config.min_log_level(), LogLevel::Debug);
        assert!(matches!(config.log_format(), LogFormat::Tracing));
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(PdpConfig::from_toml("").unwrap(), PdpConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            PdpConfig::from_toml(r#"catalog_base = "ftp://x""#),
            Err(ConfigError::Invalid { key: "catalog_base", .. })
        ));
        assert!(matches!(
            PdpConfig::from_toml(r#"products_route = "products""#),
            Err(ConfigError::Invalid { key: "products_route", .. })
        ));
        assert!(matches!(
            PdpConfig::from_toml(r#"log_level = "loud""#),
            Err(ConfigError::Invalid { key: "log_level", .. })
        ));
        assert!(matches!(
            PdpConfig::from_toml(r#"log_format = "xml""#),
            Err(ConfigError::Invalid { key: "log_format", .. })
        ));
        assert!(matches!(
            PdpConfig::from_toml("catalog_base = 3"),
            Err(ConfigError::Toml(_))
        ));
    }
}
