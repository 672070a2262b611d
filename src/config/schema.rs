//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};
use url::Url;

/// Authorization page, relative to `base_url`.
pub const AUTHORIZE_PATH: &str = "oauth2/authorize";

/// Code-for-token exchange endpoint, relative to `base_url`.
pub const TOKEN_PATH: &str = "api/oauth2/token";

/// Root configuration for the SDK.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SdkConfig {
    /// OAuth2 client id of the registered application.
    pub client_id: String,

    /// OAuth2 client secret. Never logged.
    pub client_secret: String,

    /// Redirect URI the gateway sends the user back to.
    pub return_url: String,

    /// Scopes requested at authorization.
    pub scopes: Vec<String>,

    /// Gateway root, e.g. `https://steemconnect.com`.
    pub base_url: String,

    /// Application name stamped into comment metadata.
    pub app: Option<String>,

    /// Community stamped into comment metadata.
    pub community: Option<String>,

    /// HTTP request timeout.
    pub timeout_secs: u64,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            return_url: String::new(),
            scopes: ["login", "vote", "comment", "comment_options", "custom_json"]
                .into_iter()
                .map(String::from)
                .collect(),
            base_url: "https://steemconnect.com".to_string(),
            app: Some(concat!("steemconnect-rs/", env!("CARGO_PKG_VERSION")).to_string()),
            community: None,
            timeout_secs: 30,
        }
    }
}

impl SdkConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }

    pub fn set_return_url(&mut self, return_url: impl Into<String>) -> &mut Self {
        self.return_url = return_url.into();
        self
    }

    pub fn set_scopes<I, S>(&mut self, scopes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into();
        self
    }

    pub fn set_app(&mut self, app: Option<&str>) -> &mut Self {
        self.app = app.map(str::to_string);
        self
    }

    pub fn set_community(&mut self, community: Option<&str>) -> &mut Self {
        self.community = community.map(str::to_string);
        self
    }

    /// Resolve `path` against `base_url`, joined by exactly one `/`.
    pub fn build_url(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
    }
}
