//! Reblog (resteem), carried as a `custom_json` operation.

use std::any::Any;

use serde_json::{Map, Value};

use crate::operations::base::{BaseOperation, Operation};
use crate::operations::custom_json::CustomJson;
use crate::operations::parameters::is_blank;

/// Sub-operation tag.
pub const CUSTOM_OPERATION: &str = "reblog";

/// Reblogs go through the follow plugin, so they share its id.
pub const DEFAULT_ID: &str = "follow";

#[derive(Debug, Clone, PartialEq)]
pub struct Reblog {
    inner: CustomJson,
}

impl Reblog {
    pub fn new() -> Self {
        Self::from_parameters(Map::new())
    }

    pub fn from_parameters(parameters: Map<String, Value>) -> Self {
        let mut inner = CustomJson::tagged(CUSTOM_OPERATION, parameters);
        if is_blank(inner.parameters().get("id")) {
            inner.set_id(DEFAULT_ID);
        }
        Self { inner }
    }

    /// The account reblogging; it also signs the operation.
    pub fn account(&mut self, account: &str) -> &mut Self {
        self.inner.set_required_posting_auths([account]);
        self.inner.sub_operation_mut().set_parameter("account", account);
        self
    }

    pub fn author(&mut self, author: &str) -> &mut Self {
        self.inner.sub_operation_mut().set_parameter("author", author);
        self
    }

    pub fn perm_link(&mut self, perm_link: &str) -> &mut Self {
        self.inner
            .sub_operation_mut()
            .set_parameter("permlink", perm_link);
        self
    }

    /// The post being reblogged.
    pub fn reblog(&mut self, author: &str, perm_link: &str) -> &mut Self {
        self.author(author).perm_link(perm_link)
    }

    pub fn as_custom_json(&self) -> &CustomJson {
        &self.inner
    }

    pub fn as_custom_json_mut(&mut self) -> &mut CustomJson {
        &mut self.inner
    }

    pub fn into_custom_json(self) -> CustomJson {
        self.inner
    }
}

impl Default for Reblog {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for Reblog {
    fn base(&self) -> &BaseOperation {
        self.inner.base()
    }

    fn resolve(&self, key: &str) -> Option<Value> {
        self.inner.resolve(key)
    }

    fn to_wire(&self) -> Value {
        self.inner.to_wire()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
