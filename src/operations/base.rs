//! The operation contract and the base building block every variant wraps.

use std::any::Any;
use std::fmt;

use serde_json::{Map, Value};

use crate::operations::parameters::ParameterStore;
use crate::operations::serializer::JsonFields;

/// A broadcastable action, serializable to a `[name, parameters]` wire pair.
///
/// Object-safe so decoded transactions can carry heterogeneous operations;
/// use [`Operation::as_any`] to downcast to a concrete variant.
pub trait Operation: fmt::Debug + Send + Sync {
    /// The base state (name, parameters, JSON fields) of the operation.
    fn base(&self) -> &BaseOperation;

    /// Wire discriminant, e.g. `"vote"`.
    fn name(&self) -> &str {
        self.base().name()
    }

    fn parameters(&self) -> &ParameterStore {
        self.base().parameters()
    }

    fn json_fields(&self) -> &JsonFields {
        self.base().json_fields()
    }

    /// Look up a property by name.
    ///
    /// Resolution order: fixed attributes (`name`, `parameters`, `json_fields`),
    /// then the operation's own parameters. Variants with nested data extend
    /// the chain.
    fn resolve(&self, key: &str) -> Option<Value> {
        self.base().resolve(key)
    }

    /// Wire form of the operation.
    fn to_wire(&self) -> Value {
        self.base().to_wire()
    }

    fn as_any(&self) -> &dyn Any;
}

/// Name, parameters and JSON field list shared by all operations.
///
/// Usable on its own for discriminants without a dedicated type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseOperation {
    name: String,
    parameters: ParameterStore,
    json_fields: JsonFields,
}

impl BaseOperation {
    /// Create an operation with the given discriminant and parameters.
    pub fn new(name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            parameters: ParameterStore::from_map(parameters),
            json_fields: JsonFields::new(),
        }
    }

    /// Create an operation from `parameters`, filling in `defaults` for keys
    /// they lack.
    ///
    /// Given keys keep their order; missing defaults are appended after them.
    pub fn with_defaults(
        name: impl Into<String>,
        defaults: Map<String, Value>,
        mut parameters: Map<String, Value>,
        json_fields: JsonFields,
    ) -> Self {
        for (key, value) in defaults {
            parameters.entry(key).or_insert(value);
        }

        Self {
            name: name.into(),
            parameters: ParameterStore::from_map(parameters),
            json_fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterStore {
        &mut self.parameters
    }

    pub fn json_fields(&self) -> &JsonFields {
        &self.json_fields
    }

    pub fn json_fields_mut(&mut self) -> &mut JsonFields {
        &mut self.json_fields
    }

    /// Set one parameter by dotted path.
    pub fn set_parameter(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        self.parameters.set(path, value);
        self
    }

    /// Get one parameter by dotted path.
    pub fn parameter(&self, path: &str) -> Option<&Value> {
        self.parameters.get(path)
    }

    /// Remove one parameter; `false` means it is gone.
    pub fn forget_parameter(&mut self, path: &str) -> bool {
        self.parameters.forget(path)
    }

    /// Set `key` inside the `parameter` object.
    pub fn set_inner_parameter(&mut self, parameter: &str, key: &str, value: impl Into<Value>) -> &mut Self {
        self.set_parameter(&format!("{parameter}.{key}"), value)
    }

    pub fn inner_parameter(&self, parameter: &str, key: &str) -> Option<&Value> {
        self.parameter(&format!("{parameter}.{key}"))
    }

    pub fn forget_inner_parameter(&mut self, parameter: &str, key: &str) -> bool {
        self.forget_parameter(&format!("{parameter}.{key}"))
    }

    /// Replace or merge all parameters.
    pub fn set_parameters(&mut self, parameters: Map<String, Value>, merge: bool) -> &mut Self {
        self.parameters.set_all(parameters, merge);
        self
    }

    /// Fixed object attributes, the first resolution tier.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            "name" => Some(Value::String(self.name.clone())),
            "parameters" => Some(self.parameters.to_value()),
            "json_fields" => Some(Value::Array(
                self.json_fields.iter().map(Value::from).collect(),
            )),
            _ => None,
        }
    }

    /// Attribute first, then own parameter.
    pub fn resolve(&self, key: &str) -> Option<Value> {
        self.attribute(key)
            .or_else(|| self.parameter(key).cloned())
    }

    /// `[name, parameters]`, or the bare parameters when the name is empty.
    pub fn to_wire(&self) -> Value {
        self.wire_with(self.parameters.as_map())
    }

    /// Wire form for a parameter map that differs from the stored one.
    pub(crate) fn wire_with(&self, parameters: &Map<String, Value>) -> Value {
        let name = Some(self.name.as_str()).filter(|name| !name.is_empty());
        self.json_fields.serialize(name, parameters)
    }
}

impl Operation for BaseOperation {
    fn base(&self) -> &BaseOperation {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Turn a JSON object value into a parameter map; anything else is empty.
pub(crate) fn into_parameters(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
