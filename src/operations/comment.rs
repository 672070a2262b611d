//! Comment (post or reply) operation.
//!
//! # Design Decisions
//! - `permlink` is derived from the title, and the title from the body, only
//!   while the target field is still blank
//! - `json_metadata` is kept structured and string-encoded on the wire
//! - Metadata decoded from the wire stays a string until a metadata setter
//!   touches it, so unmodified comments re-encode byte-for-byte

use std::any::Any;

use serde_json::{json, Map, Value};

use crate::config::SdkConfig;
use crate::operations::base::{into_parameters, BaseOperation, Operation};
use crate::operations::parameters::is_blank;
use crate::operations::serializer::JsonFields;
use crate::operations::text::{limit, slug};

/// Wire discriminant.
pub const NAME: &str = "comment";

/// Maximum length of a title derived from the body.
pub const DERIVED_TITLE_LENGTH: usize = 150;

const METADATA: &str = "json_metadata";

/// A post, or a reply when a parent is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    base: BaseOperation,
}

impl Comment {
    pub fn new() -> Self {
        Self::from_parameters(Map::new())
    }

    /// Build from raw parameters; comment defaults fill in missing keys.
    pub fn from_parameters(parameters: Map<String, Value>) -> Self {
        let defaults = into_parameters(json!({
            "parent_author": "",
            "parent_permlink": null,
            "json_metadata": {},
        }));

        Self {
            base: BaseOperation::with_defaults(NAME, defaults, parameters, JsonFields::with([METADATA])),
        }
    }

    /// A fresh comment stamped with the configured app and community.
    pub fn from_config(config: &SdkConfig) -> Self {
        let mut comment = Self::new();
        if let Some(app) = config.app.as_deref() {
            comment.app(app);
        }
        if let Some(community) = config.community.as_deref() {
            comment.community(Some(community));
        }
        comment
    }

    pub fn parent_author(&mut self, parent_author: &str) -> &mut Self {
        self.base.set_parameter("parent_author", parent_author);
        self
    }

    pub fn parent_perm_link(&mut self, parent_perm_link: &str) -> &mut Self {
        self.base.set_parameter("parent_permlink", parent_perm_link);
        self
    }

    /// Make this comment a reply to `author`/`perm_link`.
    pub fn reply(&mut self, author: &str, perm_link: &str) -> &mut Self {
        self.parent_author(author).parent_perm_link(perm_link)
    }

    /// Top-level posts carry their category in `parent_permlink`.
    pub fn category(&mut self, category: Option<&str>) -> &mut Self {
        self.base.set_parameter("parent_permlink", category);
        self
    }

    pub fn author(&mut self, author: &str) -> &mut Self {
        self.base.set_parameter("author", author);
        self
    }

    pub fn perm_link(&mut self, perm_link: &str) -> &mut Self {
        self.base.set_parameter("permlink", perm_link);
        self
    }

    /// Set the title, deriving the permlink from it when none is set yet.
    pub fn title(&mut self, title: &str) -> &mut Self {
        if is_blank(self.base.parameter("permlink")) {
            self.base.set_parameter("permlink", slug(title));
        }
        self.base.set_parameter("title", title);
        self
    }

    /// Set the body, deriving the title (and possibly the permlink) when no
    /// title is set yet.
    pub fn body(&mut self, body: &str) -> &mut Self {
        if is_blank(self.base.parameter("title")) {
            self.title(&limit(body, DERIVED_TITLE_LENGTH));
        }
        self.base.set_parameter("body", body);
        self
    }

    pub fn tags<I, S>(&mut self, tags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<Value> = tags.into_iter().map(|tag| Value::String(tag.into())).collect();
        self.set_metadata("tags", Value::Array(tags))
    }

    pub fn app(&mut self, app: &str) -> &mut Self {
        self.set_metadata("app", Value::from(app))
    }

    pub fn community(&mut self, community: Option<&str>) -> &mut Self {
        self.set_metadata("community", Value::from(community))
    }

    /// Replace the whole metadata.
    ///
    /// A string holding a JSON object or array is decoded; any other string is
    /// kept verbatim and sent as-is.
    pub fn json_metadata(&mut self, metadata: impl Into<Value>) -> &mut Self {
        let metadata = match metadata.into() {
            Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(parsed @ (Value::Object(_) | Value::Array(_))) => parsed,
                _ => Value::String(raw),
            },
            other => other,
        };
        self.base.set_parameter(METADATA, metadata);
        self
    }

    /// Structured metadata, decoding a wire string on the fly.
    pub fn metadata(&self) -> Option<Value> {
        match self.base.parameter(METADATA)? {
            Value::String(raw) => serde_json::from_str(raw).ok(),
            other => Some(other.clone()),
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseOperation {
        &mut self.base
    }

    fn set_metadata(&mut self, key: &str, value: Value) -> &mut Self {
        self.expand_metadata();
        self.base.set_inner_parameter(METADATA, key, value);
        self
    }

    /// Turn a wire-encoded metadata string back into an object before editing it.
    fn expand_metadata(&mut self) {
        let decoded = match self.base.parameter(METADATA) {
            Some(Value::String(raw)) => serde_json::from_str::<Value>(raw)
                .ok()
                .filter(Value::is_object),
            _ => None,
        };
        if let Some(decoded) = decoded {
            self.base.set_parameter(METADATA, decoded);
        }
    }
}

impl Default for Comment {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for Comment {
    fn base(&self) -> &BaseOperation {
        &self.base
    }

    /// Attribute, then parameter, then a key inside `json_metadata`.
    fn resolve(&self, key: &str) -> Option<Value> {
        self.base.resolve(key).or_else(|| {
            let metadata = self.metadata()?;
            metadata.get(key).cloned()
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
