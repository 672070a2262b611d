//! OAuth2 authorization-code flow against the gateway.

use reqwest::header::ACCEPT;
use url::Url;
use uuid::Uuid;

use crate::auth::token::Token;
use crate::config::schema::{AUTHORIZE_PATH, TOKEN_PATH};
use crate::config::SdkConfig;
use crate::error::{Result, TokenError};
use crate::http::client::build_client;
use crate::observability::metrics;

/// Builds authorization URLs and trades authorization codes for tokens.
#[derive(Debug, Clone)]
pub struct Provider {
    config: SdkConfig,
    client: reqwest::Client,
}

impl Provider {
    pub fn new(config: SdkConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    pub fn with_client(config: SdkConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// URL to send the user to for consent.
    ///
    /// Carries `client_id`, `redirect_uri`, `response_type=code`, the
    /// comma-joined `scope` and a random `state`. Entries in `options`
    /// replace those or add new query parameters.
    pub fn authorization_url(&self, options: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.config.build_url(AUTHORIZE_PATH)?;

        let mut query: Vec<(String, String)> = vec![
            ("client_id".into(), self.config.client_id.clone()),
            ("redirect_uri".into(), self.config.return_url.clone()),
            ("response_type".into(), "code".into()),
            ("scope".into(), self.config.scopes.join(",")),
            ("state".into(), Uuid::new_v4().to_string()),
        ];
        for (key, value) in options {
            match query.iter_mut().find(|(existing, _)| existing == key) {
                Some(entry) => entry.1 = value.to_string(),
                None => query.push((key.to_string(), value.to_string())),
            }
        }

        url.query_pairs_mut().extend_pairs(&query);
        Ok(url)
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> std::result::Result<Token, TokenError> {
        let result = self.request_token(code).await;
        metrics::record_token_exchange(result.is_ok());
        if let Err(e) = &result {
            tracing::warn!(error = %e, "token exchange failed");
        }
        result
    }

    async fn request_token(&self, code: &str) -> std::result::Result<Token, TokenError> {
        if code.is_empty() {
            return Err(TokenError::Exchange("authorization code is empty".into()));
        }

        let url = self
            .config
            .build_url(TOKEN_PATH)
            .map_err(|e| TokenError::Exchange(e.to_string()))?;

        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.return_url.as_str()),
        ];

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| TokenError::Exchange(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TokenError::Exchange(e.to_string()))?;

        if !status.is_success() {
            return Err(TokenError::Exchange(format!("token endpoint returned {status}")));
        }

        Token::from_json_str(&body).map_err(|e| TokenError::Exchange(e.to_string()))
    }
}
