//! Operation broadcasting.

use reqwest::Method;
use serde_json::{json, Value};

use crate::error::{ResponseError, Result};
use crate::http::client::HttpClient;
use crate::http::response::BroadcastResponse;
use crate::observability::metrics;
use crate::operations::Operation;

/// Broadcast endpoint, relative to `base_url`.
pub const ENDPOINT: &str = "api/broadcast";

/// Posts operations to the broadcast endpoint. No retries.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    http: HttpClient,
}

impl Broadcaster {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Request body: `{"operations": [[name, params], ...]}`.
    pub fn payload(operations: &[&dyn Operation]) -> Value {
        let operations: Vec<Value> = operations.iter().map(|op| op.to_wire()).collect();
        json!({ "operations": operations })
    }

    /// Broadcast `operations` in a single request.
    ///
    /// Non-2xx answers become [`ResponseError`]s carrying the message derived
    /// from the body.
    pub async fn broadcast(&self, operations: &[&dyn Operation]) -> Result<BroadcastResponse> {
        let payload = Self::payload(operations);
        tracing::info!(operations = operations.len(), "broadcasting operations");

        let response = self.http.call(Method::POST, ENDPOINT, Some(&payload)).await?;
        metrics::record_broadcast(response.status_code());

        if !response.is_success() {
            let error = ResponseError::new(response);
            tracing::warn!(status = error.status, message = %error.message, "broadcast rejected");
            return Err(error.into());
        }

        tracing::info!(status = response.status_code(), "broadcast accepted");
        Ok(BroadcastResponse::new(response))
    }
}
