//! Bearer-authenticated JSON client for the gateway API.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;

use crate::auth::Token;
use crate::config::SdkConfig;
use crate::error::{Error, Result, TokenError};
use crate::http::response::HttpResponse;

/// Build the underlying reqwest client with the configured timeout.
pub(crate) fn build_client(config: &SdkConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| Error::client("failed to build HTTP client", e))
}

/// Sends authenticated JSON requests to paths under `base_url`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: SdkConfig,
    token: Option<Token>,
}

impl HttpClient {
    pub fn new(config: SdkConfig, token: Option<Token>) -> Result<Self> {
        Ok(Self::with_client(build_client(&config)?, config, token))
    }

    /// Reuse an existing reqwest client.
    pub fn with_client(client: reqwest::Client, config: SdkConfig, token: Option<Token>) -> Self {
        Self {
            client,
            config,
            token,
        }
    }

    pub fn set_token(&mut self, token: Option<Token>) -> &mut Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Send `body` as JSON to `path` and read the whole response.
    ///
    /// Any status is returned as a response; only transport failures are errors.
    pub async fn call(&self, method: Method, path: &str, body: Option<&Value>) -> Result<HttpResponse> {
        let token = self.token.as_ref().ok_or(TokenError::Missing)?;
        let url = self.config.build_url(path)?;

        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(token.access_token());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::client(format!("request to {path} failed"), e))?;

        HttpResponse::from_reqwest(response).await
    }
}
