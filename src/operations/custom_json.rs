//! Custom JSON operation with an embedded sub-operation.
//!
//! # Design Decisions
//! - The embedded [`SubOperation`] lives beside the parameter store, not in it;
//!   the store keeps a `null` placeholder under `json` so the key keeps its
//!   position on the wire
//! - `json` input is accepted as an object string (`{...}`), a pair string
//!   (`["name", {...}]`) or an already-decoded object
//! - Property resolution falls through to the sub-operation when the outer
//!   value is blank
//! - A `json` string from the wire is re-emitted verbatim until the
//!   sub-operation is mutated

use std::any::Any;

use serde_json::{json, Map, Value};

use crate::operations::base::{into_parameters, BaseOperation, Operation};
use crate::operations::parameters::is_blank;
use crate::operations::serializer::JsonFields;
use crate::operations::sub_operation::SubOperation;

/// Wire discriminant.
pub const NAME: &str = "custom_json";

/// Sub-operation tag used when none is given.
pub const DEFAULT_CUSTOM_OPERATION: &str = "follow";

/// Parameter holding the string-encoded sub-operation.
const JSON: &str = "json";

#[derive(Debug, Clone, PartialEq)]
pub struct CustomJson {
    base: BaseOperation,
    custom_operation: String,
    sub_operation: SubOperation,
    raw_json: Option<String>,
}

impl CustomJson {
    pub fn new() -> Self {
        Self::from_parameters(Map::new())
    }

    /// Build from raw wire parameters.
    ///
    /// A pair-form `json` names the sub-operation; otherwise it is tagged
    /// [`DEFAULT_CUSTOM_OPERATION`].
    pub fn from_parameters(parameters: Map<String, Value>) -> Self {
        Self::build(DEFAULT_CUSTOM_OPERATION, parameters, true)
    }

    /// Build with a fixed sub-operation tag that input cannot override.
    pub fn tagged(custom_operation: &str, parameters: Map<String, Value>) -> Self {
        Self::build(custom_operation, parameters, false)
    }

    fn build(custom_operation: &str, mut parameters: Map<String, Value>, adopt_name: bool) -> Self {
        let (pair_name, sub_parameters) = parse_json_parameter(parameters.get(JSON));
        let raw_json = match parameters.get_mut(JSON).map(Value::take) {
            Some(Value::String(raw)) => Some(raw),
            _ => None,
        };

        let custom_operation = match pair_name {
            Some(name) if adopt_name => name,
            _ => custom_operation.to_string(),
        };

        let defaults = into_parameters(json!({
            "required_auths": [],
            "required_posting_auths": [],
        }));

        let mut base = BaseOperation::with_defaults(NAME, defaults, parameters, JsonFields::with([JSON]));
        if !base.parameters().has(JSON) {
            base.set_parameter(JSON, Value::Null);
        }

        Self {
            base,
            sub_operation: SubOperation::new(custom_operation.clone(), sub_parameters),
            custom_operation,
            raw_json,
        }
    }

    /// Tag of the embedded sub-operation, e.g. `"follow"`.
    pub fn custom_operation(&self) -> &str {
        &self.custom_operation
    }

    pub fn set_required_auths<I, S>(&mut self, accounts: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base.set_parameter("required_auths", accounts_value(accounts));
        self
    }

    pub fn required_auths(&self) -> Vec<String> {
        self.accounts("required_auths")
    }

    pub fn set_required_posting_auths<I, S>(&mut self, accounts: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base
            .set_parameter("required_posting_auths", accounts_value(accounts));
        self
    }

    pub fn required_posting_auths(&self) -> Vec<String> {
        self.accounts("required_posting_auths")
    }

    pub fn set_id(&mut self, id: &str) -> &mut Self {
        self.base.set_parameter("id", id);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.base.parameter("id").and_then(Value::as_str)
    }

    pub fn sub_operation(&self) -> &SubOperation {
        &self.sub_operation
    }

    /// Mutable sub-operation. From here on `json` is rebuilt from it.
    pub fn sub_operation_mut(&mut self) -> &mut SubOperation {
        self.raw_json = None;
        &mut self.sub_operation
    }

    /// Replace the embedded sub-operation; its name becomes the tag.
    pub fn set_sub_operation(&mut self, sub_operation: SubOperation) -> &mut Self {
        self.custom_operation = sub_operation.name().to_string();
        self.sub_operation = sub_operation;
        self.raw_json = None;
        self
    }

    /// The `json` string as received, while the sub-operation is untouched.
    pub fn raw_json(&self) -> Option<&str> {
        self.raw_json.as_deref()
    }

    pub fn base_mut(&mut self) -> &mut BaseOperation {
        &mut self.base
    }

    fn accounts(&self, key: &str) -> Vec<String> {
        self.base
            .parameter(key)
            .and_then(Value::as_array)
            .map(|accounts| {
                accounts
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for CustomJson {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for CustomJson {
    fn base(&self) -> &BaseOperation {
        &self.base
    }

    fn resolve(&self, key: &str) -> Option<Value> {
        if let Some(attribute) = self.base.attribute(key) {
            return Some(attribute);
        }
        match key {
            "custom_operation" => return Some(Value::String(self.custom_operation.clone())),
            JSON => return Some(self.sub_operation.to_wire()),
            _ => {}
        }

        let own = self.base.parameter(key).cloned();
        if !is_blank(own.as_ref()) {
            return own;
        }
        self.sub_operation.parameter(key).cloned().or(own)
    }

    fn to_wire(&self) -> Value {
        let json = match &self.raw_json {
            Some(raw) => Value::String(raw.clone()),
            None => self.sub_operation.to_wire(),
        };
        let mut parameters = self.base.parameters().as_map().clone();
        parameters.insert(JSON.to_string(), json);
        self.base.wire_with(&parameters)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Split a `json` input into an optional pair name and the sub-operation parameters.
fn parse_json_parameter(json: Option<&Value>) -> (Option<String>, Map<String, Value>) {
    match json {
        Some(Value::String(raw)) => {
            let raw = raw.trim_start();
            if raw.starts_with('{') {
                let parameters = serde_json::from_str(raw).map(into_parameters).unwrap_or_default();
                (None, parameters)
            } else if raw.starts_with('[') {
                serde_json::from_str::<Value>(raw)
                    .ok()
                    .and_then(|pair| SubOperation::from_pair(&pair))
                    .map(|sub| (Some(sub.name().to_string()), sub.parameters().as_map().clone()))
                    .unwrap_or_default()
            } else {
                (None, Map::new())
            }
        }
        Some(Value::Object(parameters)) => (None, parameters.clone()),
        _ => (None, Map::new()),
    }
}

fn accounts_value<I, S>(accounts: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(accounts.into_iter().map(|a| Value::String(a.into())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let custom = CustomJson::new();

        assert_eq!(custom.name(), "custom_json");
        assert_eq!(custom.custom_operation(), "follow");
        assert!(custom.required_auths().is_empty());
        assert!(custom.required_posting_auths().is_empty());
        assert_eq!(custom.id(), None);
        assert_eq!(
            custom.to_wire(),
            json!(["custom_json", {
                "required_auths": [],
                "required_posting_auths": [],
                "json": "[\"follow\",{}]"
            }])
        );
    }

    #[test]
    fn test_object_string_becomes_sub_parameters() {
        let custom = CustomJson::from_parameters(into_parameters(json!({ "json": "{\"foo\":\"bar\"}" })));

        assert_eq!(custom.sub_operation().parameter("foo"), Some(&json!("bar")));
        assert_eq!(custom.resolve("foo"), Some(json!("bar")));
        assert_eq!(custom.resolve("json"), Some(json!(["follow", { "foo": "bar" }])));
    }

    #[test]
    fn test_pair_string_round_trips() {
        let json = "[\"reblog\",{\"account\":\"alice\",\"author\":\"bob\",\"permlink\":\"p\"}]";
        let parameters = into_parameters(json!({
            "required_auths": [],
            "required_posting_auths": ["alice"],
            "id": "follow",
            "json": json
        }));
        let custom = CustomJson::from_parameters(parameters.clone());

        assert_eq!(custom.custom_operation(), "reblog");
        assert_eq!(custom.required_posting_auths(), ["alice"]);
        assert_eq!(custom.id(), Some("follow"));
        assert_eq!(custom.to_wire(), json!(["custom_json", Value::Object(parameters)]));
    }

    #[test]
    fn test_wire_json_is_kept_verbatim() {
        for json in [
            r#"{"contractName":"tokens","contractAction":"transfer"}"#,
            r#"["follow", {"follower": "alice", "following": "bob", "what": ["blog"]}]"#,
        ] {
            let raw = format!(
                r#"{{"required_auths":[],"required_posting_auths":["alice"],"id":"follow","json":{}}}"#,
                Value::String(json.to_string())
            );
            let custom = CustomJson::from_parameters(serde_json::from_str(&raw).unwrap());

            assert_eq!(custom.raw_json(), Some(json));
            assert_eq!(custom.to_wire().to_string(), format!(r#"["custom_json",{raw}]"#));
        }
    }

    #[test]
    fn test_sub_operation_edit_rebuilds_json() {
        let raw = r#"["follow", {"follower": "alice"}]"#;
        let mut custom = CustomJson::from_parameters(into_parameters(json!({ "json": raw })));
        assert_eq!(custom.resolve("follower"), Some(json!("alice")));

        custom.sub_operation_mut().set_parameter("following", "bob");
        assert_eq!(custom.raw_json(), None);
        assert_eq!(
            custom.to_wire()[1]["json"],
            json!("[\"follow\",{\"follower\":\"alice\",\"following\":\"bob\"}]")
        );
    }

    #[test]
    fn test_tagged_ignores_pair_name() {
        let custom = CustomJson::tagged(
            "follow",
            into_parameters(json!({ "json": "[\"reblog\",{\"account\":\"alice\"}]" })),
        );

        assert_eq!(custom.custom_operation(), "follow");
        assert_eq!(custom.resolve("account"), Some(json!("alice")));
    }

    #[test]
    fn test_decoded_object_and_garbage_json() {
        let custom = CustomJson::from_parameters(into_parameters(json!({ "json": { "a": 1 } })));
        assert_eq!(custom.resolve("a"), Some(json!(1)));

        let custom = CustomJson::from_parameters(into_parameters(json!({ "json": "not json" })));
        assert!(custom.sub_operation().parameters().is_empty());

        let custom = CustomJson::from_parameters(into_parameters(json!({ "json": "{broken" })));
        assert!(custom.sub_operation().parameters().is_empty());
    }

    #[test]
    fn test_setters() {
        let mut custom = CustomJson::new();
        custom
            .set_required_auths(["active-key-holder"])
            .set_required_posting_auths(vec!["alice".to_string()])
            .set_id("my-app");
        custom.sub_operation_mut().set_parameter("action", "ping");

        assert_eq!(custom.required_auths(), ["active-key-holder"]);
        assert_eq!(custom.required_posting_auths(), ["alice"]);
        assert_eq!(custom.id(), Some("my-app"));
        assert_eq!(custom.resolve("action"), Some(json!("ping")));

        custom.set_sub_operation(SubOperation::new("reblog", Map::new()));
        assert_eq!(custom.custom_operation(), "reblog");
        assert_eq!(custom.resolve("action"), None);
    }

    #[test]
    fn test_blank_outer_value_falls_through() {
        let mut custom = CustomJson::new();
        custom.sub_operation_mut().set_parameter("required_auths", "inner");

        assert_eq!(custom.resolve("required_auths"), Some(json!("inner")));
        assert_eq!(custom.resolve("custom_operation"), Some(json!("follow")));
        assert_eq!(custom.resolve("name"), Some(json!("custom_json")));
    }
}
