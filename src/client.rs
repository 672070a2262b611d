//! Top-level SDK client.

use crate::auth::{AuthManager, Token};
use crate::config::SdkConfig;
use crate::error::Result;
use crate::http::{BroadcastResponse, Broadcaster, HttpClient};
use crate::operations::Operation;

/// Entry point: holds the configuration and the current access token, and
/// hands out auth managers and broadcasters built from them.
///
/// Helpers are rebuilt on every call so configuration or token changes take
/// effect immediately.
#[derive(Debug, Clone)]
pub struct Client {
    config: SdkConfig,
    token: Option<Token>,
}

impl Client {
    pub fn new(config: SdkConfig) -> Self {
        tracing::debug!(client_id = %config.client_id, base_url = %config.base_url, "client created");
        Self { config, token: None }
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    pub fn set_token(&mut self, token: Token) -> &mut Self {
        self.token = Some(token);
        self
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SdkConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Authentication manager for the current config and token.
    pub fn auth(&self) -> Result<AuthManager> {
        AuthManager::new(self.config.clone(), self.token.clone())
    }

    pub fn broadcaster(&self) -> Result<Broadcaster> {
        let http = HttpClient::new(self.config.clone(), self.token.clone())?;
        Ok(Broadcaster::new(http))
    }

    /// Broadcast operations with the current token.
    pub async fn broadcast(&self, operations: &[&dyn Operation]) -> Result<BroadcastResponse> {
        self.broadcaster()?.broadcast(operations).await
    }
}
