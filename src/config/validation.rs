//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check required OAuth2 credentials are present
//! - Validate URLs and value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SdkConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::SdkConfig;

/// A single semantic problem in an [`SdkConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("client_id must not be empty")]
    MissingClientId,

    #[error("client_secret must not be empty")]
    MissingClientSecret,

    #[error("base_url {0:?} is not an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("return_url {0:?} is not an absolute URL")]
    InvalidReturnUrl(String),

    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &SdkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.client_id.trim().is_empty() {
        errors.push(ValidationError::MissingClientId);
    }
    if config.client_secret.is_empty() {
        errors.push(ValidationError::MissingClientSecret);
    }

    let base_ok = Url::parse(&config.base_url)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !base_ok {
        errors.push(ValidationError::InvalidBaseUrl(config.base_url.clone()));
    }

    if !config.return_url.is_empty() && Url::parse(&config.return_url).is_err() {
        errors.push(ValidationError::InvalidReturnUrl(config.return_url.clone()));
    }

    if config.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let mut config = SdkConfig::new("my.app", "secret");
        config.set_return_url("https://example.com/callback");

        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_reports_every_problem() {
        let mut config = SdkConfig::default();
        config.base_url = "ftp://steemconnect.com".into();
        config.return_url = "callback".into();
        config.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingClientId,
                ValidationError::MissingClientSecret,
                ValidationError::InvalidBaseUrl("ftp://steemconnect.com".into()),
                ValidationError::InvalidReturnUrl("callback".into()),
                ValidationError::ZeroTimeout,
            ]
        );
    }
}
