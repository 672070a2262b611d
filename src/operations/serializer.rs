//! JSON sub-encoding of selected parameters.
//!
//! Some wire fields (`json_metadata` on comments, `json` on custom operations)
//! must travel as JSON *strings* rather than nested objects. An operation lists
//! those paths in its [`JsonFields`] and the encoding happens at serialization
//! time only; the stored parameters keep their structured form.

use serde_json::{Map, Value};

use crate::operations::parameters::ParameterStore;

/// Set of dotted parameter paths whose values are string-encoded on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonFields {
    paths: Vec<String>,
}

impl JsonFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of dotted paths.
    pub fn with<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = Self::new();
        for path in paths {
            fields.mark(path);
        }
        fields
    }

    /// Mark a path as JSON-encoded. Marking twice is a no-op.
    pub fn mark(&mut self, path: impl Into<String>) -> &mut Self {
        let path = path.into();
        if !self.contains(&path) {
            self.paths.push(path);
        }
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Copy `parameters`, replacing every marked collection with its JSON string.
    ///
    /// Strings are assumed to be encoded already and pass through, as do
    /// scalars, nulls and missing paths.
    pub fn apply(&self, parameters: &Map<String, Value>) -> Map<String, Value> {
        let mut encoded = ParameterStore::from_map(parameters.clone());

        for path in &self.paths {
            let replacement = match encoded.get(path) {
                Some(value @ (Value::Array(_) | Value::Object(_))) => value.to_string(),
                _ => continue,
            };
            encoded.set(path, replacement);
        }

        encoded.into_map()
    }

    /// Wire form: `[name, parameters]` when a name is given, the bare object otherwise.
    pub fn serialize(&self, name: Option<&str>, parameters: &Map<String, Value>) -> Value {
        let encoded = Value::Object(self.apply(parameters));
        match name {
            Some(name) => Value::Array(vec![Value::String(name.to_string()), encoded]),
            None => encoded,
        }
    }
}
