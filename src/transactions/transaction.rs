//! Transaction receipts returned by the broadcast endpoint.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::observability::metrics;
use crate::operations::{Operation, OperationRegistry};

/// Timestamp shape used on the wire.
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Also accepted when decoding.
const EXPIRATION_FORMAT_SPACED: &str = "%Y-%m-%d %H:%M:%S";

/// A broadcast transaction and the typed operations it carried.
#[derive(Debug, Default)]
pub struct Transaction {
    id: Option<String>,
    block_number: Option<u64>,
    transaction_number: Option<u64>,
    expired: Option<bool>,
    reference_block_number: Option<u64>,
    reference_block_prefix: Option<u64>,
    expiration: Option<DateTime<Utc>>,
    operations: Vec<Box<dyn Operation>>,
    extensions: Vec<Value>,
    signatures: Vec<String>,
}

/// Wire layout; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireTransaction {
    id: Option<String>,
    block_num: Option<u64>,
    trx_num: Option<u64>,
    expired: Option<bool>,
    ref_block_num: Option<u64>,
    ref_block_prefix: Option<u64>,
    expiration: Option<String>,
    operations: Option<Vec<Value>>,
    extensions: Option<Vec<Value>>,
    signatures: Option<Vec<String>>,
}

impl Transaction {
    /// Decode with the default operation registry.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_value_with(value, &OperationRegistry::default())
    }

    /// Decode a transaction, unwrapping a `result` envelope when present.
    ///
    /// Missing keys decode as `None`/empty. Operations whose discriminant is
    /// missing or not in `registry` are dropped. Fields of the wrong JSON type
    /// and unreadable timestamps are [`Error::Decode`].
    pub fn from_value_with(value: &Value, registry: &OperationRegistry) -> Result<Self> {
        let data = match value.get("result") {
            Some(result) => result,
            None => value,
        };
        if data.is_null() {
            return Ok(Self::default());
        }
        if !data.is_object() {
            return Err(Error::Decode("transaction must be a JSON object".into()));
        }

        let wire: WireTransaction =
            serde_json::from_value(data.clone()).map_err(|e| Error::Decode(e.to_string()))?;

        let expiration = match wire.expiration.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_expiration(raw)?),
        };

        let mut operations = Vec::new();
        for entry in wire.operations.unwrap_or_default() {
            match registry.decode(&entry) {
                Some(operation) => operations.push(operation),
                None => {
                    let name = entry.get(0).and_then(Value::as_str);
                    tracing::debug!(operation = ?name, "dropping undecodable operation");
                    metrics::record_dropped_operation(name);
                }
            }
        }

        Ok(Self {
            id: wire.id,
            block_number: wire.block_num,
            transaction_number: wire.trx_num,
            expired: wire.expired,
            reference_block_number: wire.ref_block_num,
            reference_block_prefix: wire.ref_block_prefix,
            expiration,
            operations,
            extensions: wire.extensions.unwrap_or_default(),
            signatures: wire.signatures.unwrap_or_default(),
        })
    }

    /// Wire form: every field under its wire key, keys sorted, wrapped in `result`.
    pub fn to_value(&self) -> Value {
        let mut fields: BTreeMap<&str, Value> = BTreeMap::new();
        fields.insert("id", self.id.clone().into());
        fields.insert("block_num", self.block_number.into());
        fields.insert("trx_num", self.transaction_number.into());
        fields.insert("expired", self.expired.into());
        fields.insert("ref_block_num", self.reference_block_number.into());
        fields.insert("ref_block_prefix", self.reference_block_prefix.into());
        fields.insert(
            "expiration",
            self.expiration
                .map(|at| at.format(EXPIRATION_FORMAT).to_string())
                .into(),
        );
        fields.insert(
            "operations",
            Value::Array(self.operations.iter().map(|op| op.to_wire()).collect()),
        );
        fields.insert("extensions", Value::Array(self.extensions.clone()));
        fields.insert(
            "signatures",
            Value::Array(self.signatures.iter().cloned().map(Value::String).collect()),
        );

        let sorted: Map<String, Value> = fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();

        let mut envelope = Map::new();
        envelope.insert("result".to_string(), Value::Object(sorted));
        Value::Object(envelope)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn block_number(&self) -> Option<u64> {
        self.block_number
    }

    /// Position of the transaction inside its block.
    pub fn transaction_number(&self) -> Option<u64> {
        self.transaction_number
    }

    pub fn expired(&self) -> Option<bool> {
        self.expired
    }

    pub fn reference_block_number(&self) -> Option<u64> {
        self.reference_block_number
    }

    pub fn reference_block_prefix(&self) -> Option<u64> {
        self.reference_block_prefix
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expiration
    }

    pub fn operations(&self) -> &[Box<dyn Operation>] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<Box<dyn Operation>> {
        self.operations
    }

    pub fn extensions(&self) -> &[Value] {
        &self.extensions
    }

    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }
}

fn parse_expiration(raw: &str) -> Result<DateTime<Utc>> {
    for format in [EXPIRATION_FORMAT, EXPIRATION_FORMAT_SPACED] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| Error::Decode(format!("unrecognised expiration timestamp {raw:?}")))
}
