//! Operation embedded inside a `custom_json` payload.

use std::any::Any;

use serde_json::{Map, Value};

use crate::operations::base::{BaseOperation, Operation};

/// Named payload carried in the `json` field of a custom JSON operation.
///
/// Serializes as the pair `[custom_operation, parameters]`; the enclosing
/// operation string-encodes that pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubOperation {
    base: BaseOperation,
}

impl SubOperation {
    pub fn new(name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        Self {
            base: BaseOperation::new(name, parameters),
        }
    }

    /// Decode a `[name, {...}]` pair. Returns `None` for any other shape.
    pub fn from_pair(value: &Value) -> Option<Self> {
        let [name, parameters] = value.as_array()?.as_slice() else {
            return None;
        };
        Some(Self::new(name.as_str()?, parameters.as_object()?.clone()))
    }

    pub fn set_parameter(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        self.base.set_parameter(path, value);
        self
    }

    pub fn parameter(&self, path: &str) -> Option<&Value> {
        self.base.parameter(path)
    }

    pub fn forget_parameter(&mut self, path: &str) -> bool {
        self.base.forget_parameter(path)
    }

    pub fn base_mut(&mut self) -> &mut BaseOperation {
        &mut self.base
    }
}

impl Operation for SubOperation {
    fn base(&self) -> &BaseOperation {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
