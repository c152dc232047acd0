//! Result decoders. Shapes are checked strictly; nothing is coerced.

use serde_json::Value;

/// `get` result: a string, or `null` for absent.
pub(crate) fn optional_string(value: Value) -> Result<Option<String>, String> {
  match value {
    Value::Null => Ok(None),
    Value::String(s) => Ok(Some(s)),
    other => Err(format!("expected string or null, got {}", other)),
  }
}

/// `listKeys` result: an array of strings.
pub(crate) fn string_list(value: Value) -> Result<Vec<String>, String> {
  let Value::Array(items) = value else {
    return Err(format!("expected array of strings, got {}", value));
  };

  items
    .into_iter()
    .map(|item| match item {
      Value::String(s) => Ok(s),
      other => Err(format!("expected string list item, got {}", other)),
    })
    .collect()
}
