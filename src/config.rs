use std::env;

use crate::error::AppError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_STORAGE_URL: &str = "sqlite://lms-portal.db?mode=rwc";
pub const DEFAULT_MEETING_DOMAIN: &str = "meet.jit.si";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub storage_url: String,
    pub meeting_domain: String,
}

impl Config {
    pub fn new_from_env() -> Result<Self, AppError> {
        let api_base_url = env::var("NEXT_PUBLIC_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let storage_url =
            env::var("LMS_STORAGE_URL").unwrap_or_else(|_| DEFAULT_STORAGE_URL.to_string());
        let meeting_domain =
            env::var("LMS_MEETING_DOMAIN").unwrap_or_else(|_| DEFAULT_MEETING_DOMAIN.to_string());

        let config = Self {
            api_base_url,
            storage_url,
            meeting_domain,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        reqwest::Url::parse(&self.api_base_url).map_err(|e| {
            AppError::Config(format!(
                "NEXT_PUBLIC_API_BASE_URL is not a valid URL ({}): {}",
                self.api_base_url, e
            ))
        })?;
        if self.meeting_domain.trim().is_empty() {
            return Err(AppError::Config("LMS_MEETING_DOMAIN is empty".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_url: DEFAULT_STORAGE_URL.to_string(),
            meeting_domain: DEFAULT_MEETING_DOMAIN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_base_url() {
        let config = Config {
            api_base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }
}
