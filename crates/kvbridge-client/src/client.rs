//! Facade over the ten host functions.

use kvbridge_protocol::{Area, Call, Namespace, OpKind, Operation, Request, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::decode;
use crate::error::ClientError;

/// Caller-side handle to a kvbridge host.
///
/// Holds only the transport and the namespace it was built against; every
/// call is independent.
pub struct Client<T> {
  transport: T,
  namespace: Namespace,
}

impl<T: Transport> Client<T> {
  /// Client for the default namespace at this crate's protocol version.
  pub fn new(transport: T) -> Self {
    Self::with_namespace(transport, Namespace::default())
  }

  pub fn with_namespace(transport: T, namespace: Namespace) -> Self {
    Self {
      transport,
      namespace,
    }
  }

  pub fn namespace(&self) -> &Namespace {
    &self.namespace
  }

  /// The area that survives across sessions.
  pub fn local(&self) -> AreaClient<'_, T> {
    self.area(Area::Local)
  }

  /// The area scoped to the current session.
  pub fn session(&self) -> AreaClient<'_, T> {
    self.area(Area::Session)
  }

  pub fn area(&self, area: Area) -> AreaClient<'_, T> {
    AreaClient { client: self, area }
  }

  /// Send one call and unwrap the reply.
  async fn invoke(&self, op: Operation, request: Request) -> Result<Value, ClientError> {
    let call = Call::new(&self.namespace, op, request.encode_arg());

    let reply = self
      .transport
      .call(call)
      .await
      .map_err(|source| ClientError::Transport { op, source })?;

    Result::<Value, _>::from(reply).map_err(|source| ClientError::from_wire(op, source))
  }
}

/// Operations on one storage area.
pub struct AreaClient<'a, T> {
  client: &'a Client<T>,
  area: Area,
}

impl<T: Transport> AreaClient<'_, T> {
  fn op(&self, kind: OpKind) -> Operation {
    Operation::new(self.area, kind)
  }

  /// Read the raw value stored for `key`. `Ok(None)` means the key is not set.
  pub async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
    let op = self.op(OpKind::Get);
    let request = Request::Get {
      key: key.to_string(),
    };

    let value = self.client.invoke(op, request).await?;
    decode::optional_string(value).map_err(|message| ClientError::decode(op, message))
  }

  /// Store `value` under `key`, replacing any previous value.
  pub async fn put(&self, key: &str, value: &str) -> Result<(), ClientError> {
    let request = Request::Put {
      key: key.to_string(),
      value: value.to_string(),
    };

    self.client.invoke(self.op(OpKind::Put), request).await?;
    Ok(())
  }

  /// Remove `key`. Succeeds whether or not the key was set.
  pub async fn remove(&self, key: &str) -> Result<(), ClientError> {
    let request = Request::Remove {
      key: key.to_string(),
    };

    self.client.invoke(self.op(OpKind::Remove), request).await?;
    Ok(())
  }

  /// Every key currently stored, in no particular order.
  pub async fn list_keys(&self) -> Result<Vec<String>, ClientError> {
    let op = self.op(OpKind::ListKeys);
    let value = self.client.invoke(op, Request::ListKeys).await?;
    decode::string_list(value).map_err(|message| ClientError::decode(op, message))
  }

  /// Remove every entry in the area.
  pub async fn clear(&self) -> Result<(), ClientError> {
    self
      .client
      .invoke(self.op(OpKind::Clear), Request::Clear)
      .await?;
    Ok(())
  }

  /// Read `key` and parse its value as JSON.
  ///
  /// A stored value that does not parse as `V` is a decode error.
  pub async fn get_json<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>, ClientError> {
    let Some(raw) = self.get(key).await? else {
      return Ok(None);
    };

    serde_json::from_str(&raw).map(Some).map_err(|e| {
      ClientError::decode(
        self.op(OpKind::Get),
        format!("value of '{}' is not valid JSON for the requested type: {}", key, e),
      )
    })
  }

  /// Serialize `value` as JSON and store it under `key`.
  pub async fn put_json<V: Serialize + ?Sized>(
    &self,
    key: &str,
    value: &V,
  ) -> Result<(), ClientError> {
    let raw = serde_json::to_string(value)
      .map_err(|e| ClientError::encode(self.op(OpKind::Put), format!("'{}': {}", key, e)))?;

    self.put(key, &raw).await
  }
}
