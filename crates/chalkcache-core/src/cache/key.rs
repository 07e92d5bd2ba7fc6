use serde_json::Value;

/// Deterministic identity of one cached query: operation id plus canonical
/// arguments. Two calls whose arguments differ only in field order or in
/// `None`-vs-omitted optionals collapse to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build a key from an endpoint id and its serialized arguments.
    ///
    /// serde_json keeps object keys sorted, so canonicalization only has to
    /// strip nulls; the resulting string is stable across argument order.
    pub fn new(endpoint_id: &str, args: &Value) -> Self {
        let canonical = canonicalize(args);
        match canonical {
            Value::Null => Self(format!("{}()", endpoint_id)),
            other => Self(format!("{}({})", endpoint_id, other)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strip nulls recursively; an object that becomes empty stays an empty
/// object so `Some(EmptyArgs)` and unit args remain distinguishable.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), canonicalize(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
