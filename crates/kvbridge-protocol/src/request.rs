use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::operation::OpKind;
use crate::wire::WireError;

/// A call argument after its shape has been checked.
///
/// The host decodes every incoming argument into one of these before it
/// touches storage; the caller builds one and encodes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
  Get { key: String },
  Put { key: String, value: String },
  Remove { key: String },
  ListKeys,
  Clear,
}

/// Argument record for `put`.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PutArg {
  key: String,
  value: String,
}

impl Request {
  pub fn kind(&self) -> OpKind {
    match self {
      Request::Get { .. } => OpKind::Get,
      Request::Put { .. } => OpKind::Put,
      Request::Remove { .. } => OpKind::Remove,
      Request::ListKeys => OpKind::ListKeys,
      Request::Clear => OpKind::Clear,
    }
  }

  /// Encode the argument for the wire.
  pub fn encode_arg(&self) -> Value {
    match self {
      Request::Get { key } | Request::Remove { key } => Value::String(key.clone()),
      Request::Put { key, value } => serde_json::json!({ "key": key, "value": value }),
      Request::ListKeys | Request::Clear => Value::Null,
    }
  }

  /// Decode and validate the argument of a `kind` call.
  pub fn decode(kind: OpKind, arg: Value) -> Result<Self, WireError> {
    match kind {
      OpKind::Get => Ok(Request::Get {
        key: decode_key(kind, arg)?,
      }),
      OpKind::Remove => Ok(Request::Remove {
        key: decode_key(kind, arg)?,
      }),
      OpKind::Put => {
        let PutArg { key, value } = serde_json::from_value(arg).map_err(|e| {
          WireError::invalid_argument(format!(
            "put expects {{\"key\": string, \"value\": string}}: {}",
            e
          ))
        })?;
        Ok(Request::Put { key, value })
      }
      OpKind::ListKeys => {
        expect_no_arg(kind, arg)?;
        Ok(Request::ListKeys)
      }
      OpKind::Clear => {
        expect_no_arg(kind, arg)?;
        Ok(Request::Clear)
      }
    }
  }
}

fn decode_key(kind: OpKind, arg: Value) -> Result<String, WireError> {
  match arg {
    Value::String(key) => Ok(key),
    other => Err(WireError::invalid_argument(format!(
      "{} expects a string key, got {}",
      kind.as_str(),
      type_name(&other)
    ))),
  }
}

fn expect_no_arg(kind: OpKind, arg: Value) -> Result<(), WireError> {
  if arg.is_null() {
    Ok(())
  } else {
    Err(WireError::invalid_argument(format!(
      "{} takes no argument, got {}",
      kind.as_str(),
      type_name(&arg)
    )))
  }
}

fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

/// Result of a storage operation, ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
  /// Result of `get`; `None` encodes as `null`.
  Value(Option<String>),
  /// Result of `listKeys`.
  Keys(Vec<String>),
  /// Result of `put`, `remove` and `clear`.
  Done,
}

impl Response {
  pub fn into_value(self) -> Value {
    match self {
      Response::Value(Some(value)) => Value::String(value),
      Response::Value(None) | Response::Done => Value::Null,
      Response::Keys(keys) => Value::Array(keys.into_iter().map(Value::String).collect()),
    }
  }
}
