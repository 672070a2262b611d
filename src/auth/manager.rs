//! Authentication manager tying config, provider and current token together.

use url::Url;

use crate::auth::provider::Provider;
use crate::auth::token::Token;
use crate::config::SdkConfig;
use crate::error::{Result, TokenError};

#[derive(Debug, Clone)]
pub struct AuthManager {
    provider: Provider,
    token: Option<Token>,
}

impl AuthManager {
    pub fn new(config: SdkConfig, token: Option<Token>) -> Result<Self> {
        Ok(Self::with_provider(Provider::new(config)?, token))
    }

    pub fn with_provider(provider: Provider, token: Option<Token>) -> Self {
        Self { provider, token }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// See [`Provider::authorization_url`].
    pub fn authorization_url(&self, options: &[(&str, &str)]) -> Result<Url> {
        self.provider.authorization_url(options)
    }

    /// Handle the redirect back from the gateway: exchange `code` and keep the token.
    pub async fn parse_return(&mut self, code: &str) -> std::result::Result<Token, TokenError> {
        let token = self.provider.exchange_code(code).await?;
        self.token = Some(token.clone());
        Ok(token)
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn into_token(self) -> Option<Token> {
        self.token
    }
}
