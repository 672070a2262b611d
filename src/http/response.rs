//! HTTP response capture and broadcast results.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::operations::OperationRegistry;
use crate::transactions::Transaction;

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// JSON content type with a body that parsed.
    Json(Value),
    /// Anything else, verbatim.
    Text(String),
}

/// Status, headers and body of a finished HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    reason: String,
    headers: HeaderMap,
    body: ResponseBody,
}

impl HttpResponse {
    /// Build from raw parts. The body is JSON-decoded only when the
    /// `Content-Type` mentions `json` and the text parses.
    pub fn new(status: u16, headers: HeaderMap, raw: String) -> Self {
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();

        let body = if content_type_is_json(&headers) {
            match serde_json::from_str(&raw) {
                Ok(value) => ResponseBody::Json(value),
                Err(_) => ResponseBody::Text(raw),
            }
        } else {
            ResponseBody::Text(raw)
        };

        Self {
            status,
            reason,
            headers,
            body,
        }
    }

    /// Read a reqwest response to the end.
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let raw = response
            .text()
            .await
            .map_err(|e| Error::client("failed to read response body", e))?;

        Ok(Self::new(status, headers, raw))
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Canonical reason phrase for the status, e.g. `"Unauthorized"`.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn is_json(&self) -> bool {
        content_type_is_json(&self.headers)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human-readable description of a failed response.
    ///
    /// `"{error}: {error_description}"` from a JSON body (the reason phrase
    /// stands in for a missing description), else a non-empty text body, else
    /// the reason phrase.
    pub fn error_message(&self) -> String {
        match &self.body {
            ResponseBody::Json(value) => {
                let error = value
                    .get("error")
                    .and_then(Value::as_str)
                    .filter(|error| !error.is_empty());
                let description = value
                    .get("error_description")
                    .and_then(Value::as_str)
                    .unwrap_or(&self.reason);

                match error {
                    Some(error) => format!("{error}: {description}"),
                    None => description.to_string(),
                }
            }
            ResponseBody::Text(raw) if !raw.trim().is_empty() => raw.clone(),
            ResponseBody::Text(_) => self.reason.clone(),
        }
    }
}

fn content_type_is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("json"))
}

/// Successful broadcast response.
#[derive(Debug, Clone)]
pub struct BroadcastResponse {
    http: HttpResponse,
}

impl BroadcastResponse {
    pub fn new(http: HttpResponse) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpResponse {
        &self.http
    }

    pub fn into_http(self) -> HttpResponse {
        self.http
    }

    /// The broadcast transaction, decoded with the default registry.
    pub fn transaction(&self) -> Result<Option<Transaction>> {
        self.transaction_with(&OperationRegistry::default())
    }

    /// The broadcast transaction, or `None` unless the body is a non-empty JSON object.
    pub fn transaction_with(&self, registry: &OperationRegistry) -> Result<Option<Transaction>> {
        match &self.http.body {
            ResponseBody::Json(value @ Value::Object(map)) if !map.is_empty() => {
                Transaction::from_value_with(value, registry).map(Some)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_json_body_detection() {
        let response = HttpResponse::new(200, headers("application/json; charset=utf-8"), r#"{"a":1}"#.into());
        assert!(response.is_json());
        assert!(response.is_success());
        assert_eq!(response.body(), &ResponseBody::Json(json!({ "a": 1 })));

        let response = HttpResponse::new(200, headers("text/html"), r#"{"a":1}"#.into());
        assert!(!response.is_json());
        assert_eq!(response.body(), &ResponseBody::Text(r#"{"a":1}"#.into()));

        let response = HttpResponse::new(200, headers("application/json"), "not json".into());
        assert_eq!(response.body(), &ResponseBody::Text("not json".into()));
    }

    #[test]
    fn test_error_message_from_json() {
        let body = r#"{"error":"YOUR ARE NOT AUTHORIZED","error_description":"Unauthorized"}"#;
        let response = HttpResponse::new(401, headers("application/json"), body.into());
        assert_eq!(response.error_message(), "YOUR ARE NOT AUTHORIZED: Unauthorized");

        let response = HttpResponse::new(401, headers("application/json"), r#"{"error":"invalid_grant"}"#.into());
        assert_eq!(response.error_message(), "invalid_grant: Unauthorized");

        let response = HttpResponse::new(500, headers("application/json"), r#"{"error_description":"boom"}"#.into());
        assert_eq!(response.error_message(), "boom");

        let response = HttpResponse::new(503, headers("application/json"), "{}".into());
        assert_eq!(response.error_message(), "Service Unavailable");
    }

    #[test]
    fn test_error_message_from_text() {
        let response = HttpResponse::new(502, headers("text/html"), "<h1>Bad gateway</h1>".into());
        assert_eq!(response.error_message(), "<h1>Bad gateway</h1>");

        let response = HttpResponse::new(404, HeaderMap::new(), String::new());
        assert_eq!(response.reason(), "Not Found");
        assert_eq!(response.error_message(), "Not Found");
    }

    #[test]
    fn test_transaction_requires_object_body() {
        let response = BroadcastResponse::new(HttpResponse::new(200, headers("text/plain"), "ok".into()));
        assert!(response.transaction().unwrap().is_none());

        let response = BroadcastResponse::new(HttpResponse::new(200, headers("application/json"), "{}".into()));
        assert!(response.transaction().unwrap().is_none());

        let body = r#"{"result":{"id":"abc","operations":[["vote",{"voter":"alice"}]]}}"#;
        let response = BroadcastResponse::new(HttpResponse::new(200, headers("application/json"), body.into()));
        let transaction = response.transaction().unwrap().unwrap();
        assert_eq!(transaction.id(), Some("abc"));
        assert_eq!(transaction.operations().len(), 1);
    }
}
