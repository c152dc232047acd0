//! Function table and dispatch.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use kvbridge_protocol::{
  Area, Call, Namespace, Operation, Reply, Request, Response, WireError, WireErrorKind,
};
use kvbridge_store::{InMemoryArea, StorageArea, StoreError};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// The two storage areas a registry serves.
#[derive(Clone)]
pub struct Areas {
  /// Area that survives across sessions.
  pub local: Arc<dyn StorageArea>,
  /// Area scoped to the current session.
  pub session: Arc<dyn StorageArea>,
}

impl Areas {
  pub fn new(local: Arc<dyn StorageArea>, session: Arc<dyn StorageArea>) -> Self {
    Self { local, session }
  }

  /// Two independent in-memory areas.
  pub fn in_memory() -> Self {
    Self::new(Arc::new(InMemoryArea::new()), Arc::new(InMemoryArea::new()))
  }

  pub fn get(&self, area: Area) -> &dyn StorageArea {
    match area {
      Area::Local => self.local.as_ref(),
      Area::Session => self.session.as_ref(),
    }
  }
}

impl fmt::Debug for Areas {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Areas").finish_non_exhaustive()
  }
}

/// Registered functions of one namespace.
///
/// The function table is built once in [`Registry::new`] and never changes
/// afterwards. A registry is cheap to share behind an `Arc`; all mutation
/// happens inside the storage areas.
#[derive(Debug)]
pub struct Registry {
  namespace: Namespace,
  areas: Areas,
  functions: HashMap<String, Operation>,
}

impl Registry {
  /// Register all ten functions under `namespace`, bound to `areas`.
  pub fn new(namespace: Namespace, areas: Areas) -> Self {
    let functions = Operation::all().map(|op| (op.function_name(), op)).collect();

    Self {
      namespace,
      areas,
      functions,
    }
  }

  pub fn namespace(&self) -> &Namespace {
    &self.namespace
  }

  /// Fully qualified names of every registered function, sorted.
  pub fn functions(&self) -> Vec<String> {
    let mut names: Vec<String> = self
      .functions
      .values()
      .map(|op| self.namespace.qualify(*op))
      .collect();
    names.sort();
    names
  }

  /// Answer a single call.
  ///
  /// The namespace, version and function name are checked in that order
  /// before the argument is decoded. Storage is only touched once the
  /// argument has the right shape.
  #[instrument(
    name = "dispatch",
    skip(self, call),
    fields(function = %call.function)
  )]
  pub fn dispatch(&self, call: Call) -> Reply {
    let result = self.dispatch_inner(call);

    match &result {
      Ok(_) => debug!("call completed"),
      Err(e) => warn!(error = %e, "call failed"),
    }

    result.into()
  }

  fn dispatch_inner(&self, call: Call) -> Result<Value, WireError> {
    if call.namespace != self.namespace.name {
      return Err(WireError::new(
        WireErrorKind::NamespaceMismatch,
        format!(
          "host serves '{}', call targets '{}'",
          self.namespace.name, call.namespace
        ),
      ));
    }

    if call.version != self.namespace.version {
      return Err(WireError::new(
        WireErrorKind::VersionMismatch,
        format!(
          "host serves {}, call targets {}@{}",
          self.namespace, call.namespace, call.version
        ),
      ));
    }

    let op = self.functions.get(&call.function).copied().ok_or_else(|| {
      WireError::new(
        WireErrorKind::UnknownFunction,
        format!("no function '{}' in {}", call.function, self.namespace),
      )
    })?;

    let request = Request::decode(op.kind, call.arg)?;
    debug_assert_eq!(request.kind(), op.kind);
    let response =
      execute(self.areas.get(op.area), request).map_err(|e| WireError::storage(e.to_string()))?;

    Ok(response.into_value())
  }
}

/// Run a validated request against one area.
fn execute(area: &dyn StorageArea, request: Request) -> Result<Response, StoreError> {
  match request {
    Request::Get { key } => area.get(&key).map(Response::Value),
    Request::Put { key, value } => area.put(&key, &value).map(|()| Response::Done),
    Request::Remove { key } => area.remove(&key).map(|()| Response::Done),
    Request::ListKeys => area.keys().map(Response::Keys),
    Request::Clear => area.clear().map(|()| Response::Done),
  }
}
