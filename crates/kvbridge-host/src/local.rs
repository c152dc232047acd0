use std::sync::Arc;

use async_trait::async_trait;
use kvbridge_protocol::{Call, Reply, Transport, TransportError};

use crate::registry::Registry;

/// In-process transport.
///
/// Each call runs on tokio's blocking pool, since storage areas may do file
/// I/O, and completes exactly once. A call whose task panics surfaces as
/// [`TransportError::Dropped`].
#[derive(Debug, Clone)]
pub struct LocalTransport {
  registry: Arc<Registry>,
}

impl LocalTransport {
  pub fn new(registry: Arc<Registry>) -> Self {
    Self { registry }
  }
}

#[async_trait]
impl Transport for LocalTransport {
  async fn call(&self, call: Call) -> Result<Reply, TransportError> {
    let registry = Arc::clone(&self.registry);

    tokio::task::spawn_blocking(move || registry.dispatch(call))
      .await
      .map_err(|e| TransportError::dropped(e.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use kvbridge_protocol::{Area, Namespace, OpKind, Operation};
  use serde_json::{Value, json};

  use super::*;
  use crate::registry::Areas;

  #[tokio::test]
  async fn test_local_transport_round_trip() {
    let registry = Arc::new(Registry::new(Namespace::default(), Areas::in_memory()));
    let transport = LocalTransport::new(registry);
    let ns = Namespace::default();

    let put = Call::new(
      &ns,
      Operation::new(Area::Session, OpKind::Put),
      json!({"key": "k", "value": "v"}),
    );
    assert_eq!(transport.call(put).await.unwrap(), Reply::Ok(Value::Null));

    let get = Call::new(&ns, Operation::new(Area::Session, OpKind::Get), json!("k"));
    assert_eq!(transport.call(get).await.unwrap(), Reply::Ok(json!("v")));
  }
}
