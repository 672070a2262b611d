//! Follow and unfollow, carried as a `custom_json` operation.

use std::any::Any;

use serde_json::{Map, Value};

use crate::operations::base::{BaseOperation, Operation};
use crate::operations::custom_json::CustomJson;
use crate::operations::parameters::is_blank;

/// Sub-operation tag.
pub const CUSTOM_OPERATION: &str = "follow";

/// `custom_json` id used by the follow plugin.
pub const DEFAULT_ID: &str = "follow";

#[derive(Debug, Clone, PartialEq)]
pub struct Follow {
    inner: CustomJson,
}

impl Follow {
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

    /// Alias of [`Follow::follower`].
    pub fn account(&mut self, account: &str) -> &mut Self {
        self.follower(account)
    }

    /// The account doing the following; it also signs the operation.
    pub fn follower(&mut self, follower: &str) -> &mut Self {
        self.inner.set_required_posting_auths([follower]);
        self.inner
            .sub_operation_mut()
            .set_parameter("follower", follower);
        self
    }

    /// Follow (`what = ["blog"]`) or unfollow (`what = []`) `account`.
    pub fn following(&mut self, account: &str, following: bool) -> &mut Self {
        let what: Vec<Value> = if following {
            vec![Value::from("blog")]
        } else {
            Vec::new()
        };

        self.inner
            .sub_operation_mut()
            .set_parameter("following", account)
            .set_parameter("what", what);
        self
    }

    pub fn follow(&mut self, account: &str) -> &mut Self {
        self.following(account, true)
    }

    pub fn unfollow(&mut self, account: &str) -> &mut Self {
        self.following(account, false)
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

impl Default for Follow {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for Follow {
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
