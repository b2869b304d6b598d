use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Runtime
    pub environment: String,
    pub log_level: String,

    // API configuration
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,

    // Media
    pub media_origin: String,
    pub avatar_placeholder_url: String,

    // Search
    pub search_result_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            api_base_url: "http://127.0.0.1:8000".to_string(),
            api_token: None,
            request_timeout_secs: 30,
            media_origin: "http://127.0.0.1:8000".to_string(),
            avatar_placeholder_url: "https://ui-avatars.com/api/".to_string(),
            search_result_limit: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        let config = Config {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),

            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            api_token: env::var("API_TOKEN").ok().filter(|token| !token.is_empty()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.request_timeout_secs.to_string())
                .parse()?,

            media_origin: env::var("MEDIA_ORIGIN").unwrap_or(defaults.media_origin),
            avatar_placeholder_url: env::var("AVATAR_PLACEHOLDER_URL")
                .unwrap_or(defaults.avatar_placeholder_url),

            search_result_limit: env::var("SEARCH_RESULT_LIMIT")
                .unwrap_or_else(|_| defaults.search_result_limit.to_string())
                .parse()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// 校验所有基础地址都是合法的绝对URL
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("API_BASE_URL", &self.api_base_url),
            ("MEDIA_ORIGIN", &self.media_origin),
            ("AVATAR_PLACEHOLDER_URL", &self.avatar_placeholder_url),
        ] {
            Url::parse(value).map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", name, e))?;
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.search_result_limit, 10);
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = Config {
            api_base_url: "not a url".to_string(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("API_BASE_URL"));
    }
}
