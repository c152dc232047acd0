//! Integration tests for the caller facade against an in-process host.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use kvbridge_client::{Client, ClientError, ErrorKind};
use kvbridge_host::{Areas, LocalTransport, Registry};
use kvbridge_protocol::{
  Area, Call, Namespace, OpKind, Operation, Reply, Transport, TransportError,
};
use kvbridge_store::{DisabledArea, InMemoryArea};
use serde_json::json;

fn client() -> Client<LocalTransport> {
  client_with(Areas::in_memory())
}

fn client_with(areas: Areas) -> Client<LocalTransport> {
  let registry = Arc::new(Registry::new(Namespace::default(), areas));
  Client::new(LocalTransport::new(registry))
}

#[tokio::test]
async fn test_end_to_end_scenario() {
  let client = client();

  for area in Area::ALL {
    let store = client.area(area);

    store.clear().await.unwrap();
    store.put("testKey", "testValue").await.unwrap();
    assert_eq!(store.list_keys().await.unwrap(), vec!["testKey".to_string()]);
    assert_eq!(
      store.get("testKey").await.unwrap(),
      Some("testValue".to_string())
    );
    store.remove("testKey").await.unwrap();
    assert!(store.list_keys().await.unwrap().is_empty());
  }
}

#[tokio::test]
async fn test_put_get_round_trip() {
  let client = client();
  let cases = [
    ("plain", "value"),
    ("empty", ""),
    ("json", r#"{"nested":{"list":[1,2,3]},"flag":true}"#),
    ("unicode ключ", "значение ✓"),
    ("null-text", "null"),
  ];

  for (key, value) in cases {
    client.session().put(key, value).await.unwrap();
    assert_eq!(client.session().get(key).await.unwrap(), Some(value.to_string()));
  }
}

#[tokio::test]
async fn test_clear_empties_area() {
  let client = client();
  for i in 0..5 {
    client.local().put(&format!("key-{}", i), "v").await.unwrap();
  }

  client.local().clear().await.unwrap();
  assert!(client.local().list_keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_key_is_absent() {
  let client = client();

  assert_eq!(client.local().get("never-put").await.unwrap(), None);

  client.local().put("gone", "soon").await.unwrap();
  client.local().remove("gone").await.unwrap();
  assert_eq!(client.local().get("gone").await.unwrap(), None);
}

#[tokio::test]
async fn test_remove_is_idempotent() {
  let client = client();
  client.session().remove("never-put").await.unwrap();
  client.session().remove("never-put").await.unwrap();
}

#[tokio::test]
async fn test_overwrite_keeps_single_key() {
  let client = client();

  for value in ["one", "two", "three"] {
    client.local().put("counter", value).await.unwrap();
  }

  let keys = client.local().list_keys().await.unwrap();
  assert_eq!(keys, vec!["counter".to_string()]);
  assert_eq!(
    client.local().get("counter").await.unwrap(),
    Some("three".to_string())
  );
}

#[tokio::test]
async fn test_areas_are_isolated() {
  let client = client();

  client.session().put("only-session", "s").await.unwrap();
  client.local().put("only-local", "l").await.unwrap();

  assert_eq!(
    client.local().list_keys().await.unwrap(),
    vec!["only-local".to_string()]
  );
  assert_eq!(
    client.session().list_keys().await.unwrap(),
    vec!["only-session".to_string()]
  );
  assert_eq!(client.local().get("only-session").await.unwrap(), None);

  client.session().clear().await.unwrap();
  assert_eq!(
    client.local().get("only-local").await.unwrap(),
    Some("l".to_string())
  );
}

#[tokio::test]
async fn test_json_helpers() {
  let client = client();

  client
    .local()
    .put_json("prefs", &json!({"theme": "dark", "size": 12}))
    .await
    .unwrap();

  let raw = client.local().get("prefs").await.unwrap().unwrap();
  assert_eq!(
    serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
    json!({"theme": "dark", "size": 12})
  );

  let prefs: Option<serde_json::Value> = client.local().get_json("prefs").await.unwrap();
  assert_eq!(prefs, Some(json!({"theme": "dark", "size": 12})));

  client.local().put("broken", "{not json").await.unwrap();
  let err = client
    .local()
    .get_json::<serde_json::Value>("broken")
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_unencodable_value_is_encode_error() {
  let client = client();

  // JSON object keys must be strings.
  let value: HashMap<Vec<u8>, u8> = HashMap::from([(vec![1, 2], 3)]);
  let err = client.local().put_json("bytes", &value).await.unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Encode);
  assert_eq!(err.operation(), Operation::new(Area::Local, OpKind::Put));
  assert_eq!(client.local().get("bytes").await.unwrap(), None);
}

#[tokio::test]
async fn test_version_mismatch_is_distinguishable() {
  let registry = Arc::new(Registry::new(
    Namespace::new("kvbridge", "9.9.9"),
    Areas::in_memory(),
  ));
  let client = Client::new(LocalTransport::new(registry));

  let err = client.local().get("k").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Mismatch);
  assert_eq!(err.operation(), Operation::new(Area::Local, OpKind::Get));
}

#[tokio::test]
async fn test_namespace_mismatch_is_distinguishable() {
  let registry = Arc::new(Registry::new(Namespace::default(), Areas::in_memory()));
  let client = Client::with_namespace(
    LocalTransport::new(registry),
    Namespace::named("other-package"),
  );

  let err = client.session().clear().await.unwrap_err();
  assert!(matches!(err, ClientError::Mismatch { .. }));
  assert_eq!(err.operation(), Operation::new(Area::Session, OpKind::Clear));
}

#[tokio::test]
async fn test_host_fault_is_tagged_with_operation() {
  let areas = Areas::new(
    Arc::new(InMemoryArea::with_quota(16)),
    Arc::new(DisabledArea),
  );
  let client = client_with(areas);

  let err = client
    .local()
    .put("key", "a value that is far too long")
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Host);
  assert_eq!(err.operation(), Operation::new(Area::Local, OpKind::Put));
  assert!(err.to_string().contains("quota exceeded"));

  let err = client.session().list_keys().await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Host);
  assert_eq!(
    err.operation(),
    Operation::new(Area::Session, OpKind::ListKeys)
  );

  // A failing area does not affect the other one.
  client.local().put("k", "v").await.unwrap();
}

/// Transport that answers every call with a fixed reply.
struct FixedReply(Reply);

#[async_trait]
impl Transport for FixedReply {
  async fn call(&self, _call: Call) -> Result<Reply, TransportError> {
    Ok(self.0.clone())
  }
}

#[tokio::test]
async fn test_wrong_result_shape_is_decode_error() {
  let client = Client::new(FixedReply(Reply::Ok(json!(42))));

  let err = client.local().get("k").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Decode);

  let err = client.local().list_keys().await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Decode);
  assert_eq!(
    err.operation(),
    Operation::new(Area::Local, OpKind::ListKeys)
  );

  // Unit results discard whatever the host returned.
  client.local().put("k", "v").await.unwrap();
}

/// Transport whose host is unreachable.
struct Unreachable;

#[async_trait]
impl Transport for Unreachable {
  async fn call(&self, _call: Call) -> Result<Reply, TransportError> {
    Err(TransportError::Closed)
  }
}

#[tokio::test]
async fn test_transport_failure() {
  let client = Client::new(Unreachable);

  let err = client.session().remove("k").await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Transport);
  assert_eq!(err.to_string(), "session.remove: transport closed");
}

#[tokio::test]
async fn test_concurrent_puts_last_write_wins() {
  let client = Arc::new(client());

  let handles: Vec<_> = (0..16)
    .map(|i| {
      let client = Arc::clone(&client);
      tokio::spawn(async move {
        client
          .session()
          .put("shared", &i.to_string())
          .await
          .unwrap();
      })
    })
    .collect();

  for handle in handles {
    handle.await.unwrap();
  }

  assert_eq!(
    client.session().list_keys().await.unwrap(),
    vec!["shared".to_string()]
  );
  let value = client.session().get("shared").await.unwrap().unwrap();
  assert!(value.parse::<u32>().unwrap() < 16);
}
