//! OAuth2 access tokens.

use std::fmt;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::error::TokenError;
use crate::operations::parameters::is_blank;

const ACCESS_TOKEN: &str = "access_token";
const REFRESH_TOKEN: &str = "refresh_token";
const EXPIRES: &str = "expires";
const EXPIRES_IN: &str = "expires_in";
const RESOURCE_OWNER_ID: &str = "resource_owner_id";

/// Access token plus whatever else the token endpoint returned.
///
/// Keys other than the standard ones (e.g. `username`) are kept verbatim in
/// [`Token::values`].
#[derive(Clone, PartialEq)]
pub struct Token {
    access_token: String,
    refresh_token: Option<String>,
    expires: Option<i64>,
    resource_owner_id: Option<String>,
    values: Map<String, Value>,
}

impl Token {
    /// A bare token with no expiry.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires: None,
            resource_owner_id: None,
            values: Map::new(),
        }
    }

    /// Parse a serialized token. Falsy JSON (`{}`, `null`, `""`, ...) is unparsable.
    pub fn from_json_str(raw: &str) -> Result<Self, TokenError> {
        let value: Value = serde_json::from_str(raw).map_err(|_| TokenError::Unparsable)?;
        if is_blank(Some(&value)) {
            return Err(TokenError::Unparsable);
        }
        Self::from_value(&value)
    }

    /// Build from token data. `expires_in` is turned into an absolute `expires`.
    pub fn from_value(value: &Value) -> Result<Self, TokenError> {
        let Value::Object(data) = value else {
            return Err(TokenError::Invalid("token data must be an object".into()));
        };

        let access_token = match data.get(ACCESS_TOKEN) {
            Some(Value::String(token)) if !token.is_empty() => token.clone(),
            _ => return Err(TokenError::Invalid("missing access_token".into())),
        };

        let refresh_token = optional_string(data, REFRESH_TOKEN)?;
        let resource_owner_id = optional_string(data, RESOURCE_OWNER_ID)?;

        let expires = match (data.get(EXPIRES_IN), data.get(EXPIRES)) {
            (Some(expires_in), _) if !expires_in.is_null() => {
                let seconds = expires_in
                    .as_i64()
                    .ok_or_else(|| TokenError::Invalid("expires_in must be an integer".into()))?;
                Some(Utc::now().timestamp() + seconds)
            }
            (_, Some(expires)) if !expires.is_null() => Some(
                expires
                    .as_i64()
                    .ok_or_else(|| TokenError::Invalid("expires must be an integer".into()))?,
            ),
            _ => None,
        };

        let values = data
            .iter()
            .filter(|(key, _)| {
                ![ACCESS_TOKEN, REFRESH_TOKEN, EXPIRES, EXPIRES_IN, RESOURCE_OWNER_ID].contains(&key.as_str())
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            access_token,
            refresh_token,
            expires,
            resource_owner_id,
            values,
        })
    }

    /// Serialized form; feeding it back to [`Token::from_value`] yields an equal token.
    pub fn to_value(&self) -> Value {
        let mut data = self.values.clone();
        data.insert(ACCESS_TOKEN.into(), Value::String(self.access_token.clone()));
        if let Some(refresh_token) = &self.refresh_token {
            data.insert(REFRESH_TOKEN.into(), Value::String(refresh_token.clone()));
        }
        if let Some(expires) = self.expires {
            data.insert(EXPIRES.into(), Value::from(expires));
        }
        if let Some(owner) = &self.resource_owner_id {
            data.insert(RESOURCE_OWNER_ID.into(), Value::String(owner.clone()));
        }
        Value::Object(data)
    }

    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Expiry as unix seconds.
    pub fn expires(&self) -> Option<i64> {
        self.expires
    }

    pub fn resource_owner_id(&self) -> Option<&str> {
        self.resource_owner_id.as_deref()
    }

    /// Non-standard fields returned with the token.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Tokens without an expiry never expire.
    pub fn has_expired(&self) -> bool {
        self.expires
            .is_some_and(|expires| expires <= Utc::now().timestamp())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires", &self.expires)
            .field("resource_owner_id", &self.resource_owner_id)
            .field("values", &self.values)
            .finish()
    }
}

fn optional_string(data: &Map<String, Value>, key: &str) -> Result<Option<String>, TokenError> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(TokenError::Invalid(format!("{key} must be a string"))),
    }
}
