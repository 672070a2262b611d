//! Nested key/value parameter storage with dotted-path access.
//!
//! # Design Decisions
//! - Keys are addressed as `"a.b.c"`; each segment walks one object level
//! - Intermediate objects are created on `set`, never on `get`
//! - `get` returns `None` for a missing path, which is distinct from a stored `null`
//! - Insertion order is preserved (serde_json `preserve_order`) for stable wire output

use serde_json::{Map, Value};

/// Parameter container owned by every operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterStore {
    values: Map<String, Value>,
}

impl ParameterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an initial mapping.
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Set `value` at the dotted `path`, creating intermediate objects as needed.
    ///
    /// An existing literal top-level key equal to `path` is overwritten in place,
    /// matching the lookup order of [`ParameterStore::get`]. Otherwise any
    /// non-object value sitting on an intermediate segment is replaced by an
    /// empty object.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        if let Some(slot) = self.values.get_mut(path) {
            *slot = value.into();
            return self;
        }

        let mut segments: Vec<&str> = path.split('.').collect();
        let last = segments.pop().unwrap_or_default();

        let mut current = &mut self.values;
        for segment in segments {
            let slot = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Value::Object(map) = slot else {
                return self;
            };
            current = map;
        }

        current.insert(last.to_string(), value.into());
        self
    }

    /// Get the value stored at the dotted `path`.
    ///
    /// A literal top-level key containing dots wins over nested resolution.
    /// Array elements can be addressed by index (`"list.0"`).
    pub fn get(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.values.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.values.get(first)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Whether the dotted `path` resolves to a value (a stored `null` counts).
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Remove the value at the dotted `path`.
    ///
    /// Returns whether the path still resolves afterwards, so `false` means the
    /// removal succeeded (or there was nothing to remove).
    pub fn forget(&mut self, path: &str) -> bool {
        if self.values.shift_remove(path).is_none() {
            let mut segments: Vec<&str> = path.split('.').collect();
            let last = segments.pop().unwrap_or_default();

            let mut current = Some(&mut self.values);
            for segment in segments {
                current = match current.and_then(|map| map.get_mut(segment)) {
                    Some(Value::Object(map)) => Some(map),
                    _ => None,
                };
            }

            if let Some(parent) = current {
                parent.shift_remove(last);
            }
        }

        self.has(path)
    }

    /// Replace the whole store, or shallow-merge top-level keys when `merge` is set.
    pub fn set_all(&mut self, values: Map<String, Value>, merge: bool) -> &mut Self {
        if merge {
            for (key, value) in values {
                self.values.insert(key, value);
            }
        } else {
            self.values = values;
        }
        self
    }

    /// Raw top-level mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Consume the store into its mapping.
    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }

    /// The store as a JSON object value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for ParameterStore {
    fn from(values: Map<String, Value>) -> Self {
        Self::from_map(values)
    }
}

/// Whether a parameter counts as unset for derivation rules.
///
/// Missing, `null`, `false`, `0`, `""`, `"0"` and empty collections are all blank.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => !flag,
        Some(Value::Number(number)) => number.as_f64() == Some(0.0),
        Some(Value::String(text)) => text.is_empty() || text == "0",
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_and_get() {
        let mut store = ParameterStore::new();
        assert!(store.is_empty());
        assert!(store.get("foo").is_none());

        store.set("foo", "bar");
        assert_eq!(store.get("foo"), Some(&json!("bar")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_dotted_path_creates_nesting() {
        let mut store = ParameterStore::new();
        store.set("a.b", "c");

        assert_eq!(store.get("a.b"), Some(&json!("c")));
        assert_eq!(store.get("a"), Some(&json!({ "b": "c" })));
    }

    #[test]
    fn test_set_overwrites_scalar_on_intermediate_segment() {
        let mut store = ParameterStore::new();
        store.set("a", 1);
        store.set("a.b", true);

        assert_eq!(store.to_value(), json!({ "a": { "b": true } }));
    }

    #[test]
    fn test_absent_is_distinct_from_null() {
        let mut store = ParameterStore::new();
        store.set("parent_permlink", Value::Null);

        assert_eq!(store.get("parent_permlink"), Some(&Value::Null));
        assert!(store.has("parent_permlink"));
        assert!(store.get("permlink").is_none());
        assert!(!store.has("permlink"));
    }

    #[test]
    fn test_forget_reports_remaining_presence() {
        let mut store = ParameterStore::new();
        store.set("a.b", "c");
        store.set("a.d", "e");

        assert!(!store.forget("a.b"));
        assert!(store.get("a.b").is_none());
        assert_eq!(store.get("a.d"), Some(&json!("e")));

        // Forgetting something missing is still a success.
        assert!(!store.forget("x.y.z"));

        assert!(!store.forget("a"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_all_replace_and_merge() {
        let mut store = ParameterStore::new();
        store.set("foo", "bar");

        let mut values = Map::new();
        values.insert("bar".into(), json!("baz"));
        store.set_all(values.clone(), true);
        assert_eq!(store.to_value(), json!({ "foo": "bar", "bar": "baz" }));

        let mut overriding = Map::new();
        overriding.insert("foo".into(), json!("qux"));
        store.set_all(overriding, true);
        assert_eq!(store.get("foo"), Some(&json!("qux")));

        store.set_all(values, false);
        assert_eq!(store.to_value(), json!({ "bar": "baz" }));
    }

    #[test]
    fn test_array_index_and_literal_key_lookup() {
        let mut map = Map::new();
        map.insert("what".into(), json!(["blog", "ignore"]));
        map.insert("dotted.key".into(), json!(1));
        let store = ParameterStore::from_map(map);

        assert_eq!(store.get("what.1"), Some(&json!("ignore")));
        assert!(store.get("what.7").is_none());
        assert_eq!(store.get("dotted.key"), Some(&json!(1)));
    }

    #[test]
    fn test_set_overwrites_literal_dotted_key() {
        let mut map = Map::new();
        map.insert("a.b".into(), json!(1));
        let mut store = ParameterStore::from_map(map);

        store.set("a.b", 2);
        assert_eq!(store.get("a.b"), Some(&json!(2)));
        assert_eq!(store.to_value(), json!({ "a.b": 2 }));
    }

    #[test]
    fn test_blank_values() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&Value::Null)));
        assert!(is_blank(Some(&json!(""))));
        assert!(is_blank(Some(&json!([]))));
        assert!(!is_blank(Some(&json!("permlink"))));
        assert!(!is_blank(Some(&json!(["blog"]))));
    }
}
