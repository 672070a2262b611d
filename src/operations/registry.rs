//! Discriminant → operation type lookup used when decoding transactions.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::operations::base::Operation;
use crate::operations::comment::{self, Comment};
use crate::operations::custom_json::{self, CustomJson};
use crate::operations::vote::{self, Vote};

/// Builds a typed operation from its wire parameters.
pub type OperationFactory = fn(Map<String, Value>) -> Box<dyn Operation>;

/// Open registry of operation factories keyed by wire discriminant.
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    factories: HashMap<String, OperationFactory>,
}

impl OperationRegistry {
    /// A registry that knows no operations.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register (or replace) the factory for `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: OperationFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    pub fn get(&self, name: &str) -> Option<OperationFactory> {
        self.factories.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Decode one `[discriminant, parameters]` wire entry.
    ///
    /// Returns `None` for anything that is not a pair with a known, non-empty
    /// string discriminant. Non-object parameters decode as empty.
    pub fn decode(&self, entry: &Value) -> Option<Box<dyn Operation>> {
        let items = entry.as_array()?;
        let name = items.first()?.as_str().filter(|name| !name.is_empty())?;
        let factory = self.get(name)?;

        let parameters = match items.get(1) {
            Some(Value::Object(parameters)) => parameters.clone(),
            _ => Map::new(),
        };
        Some(factory(parameters))
    }
}

impl Default for OperationRegistry {
    /// `vote`, `comment` and `custom_json`.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(vote::NAME, build_vote)
            .register(comment::NAME, build_comment)
            .register(custom_json::NAME, build_custom_json);
        registry
    }
}

fn build_vote(parameters: Map<String, Value>) -> Box<dyn Operation> {
    Box::new(Vote::from_parameters(parameters))
}

fn build_comment(parameters: Map<String, Value>) -> Box<dyn Operation> {
    Box::new(Comment::from_parameters(parameters))
}

fn build_custom_json(parameters: Map<String, Value>) -> Box<dyn Operation> {
    Box::new(CustomJson::from_parameters(parameters))
}
