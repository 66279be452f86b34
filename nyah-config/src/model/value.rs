use serde_json::{Map, Value};

pub(crate) fn field<'a>(item: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    item.get(key).filter(|value| !value.is_null())
}

/// Scalar rendered as text; `null`, arrays and objects have no string form.
pub(crate) fn loose_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

pub(crate) fn string_field(item: &Map<String, Value>, key: &str) -> String {
    field(item, key).and_then(loose_string).unwrap_or_default()
}

pub(crate) fn optional_string_field(item: &Map<String, Value>, key: &str) -> Option<String> {
    field(item, key).and_then(loose_string)
}

/// JSON truthiness: empty strings, zero, `false`, `null` and empty containers are false.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

pub(crate) fn loose_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }
}
