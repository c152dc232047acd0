use std::fmt;

/// One of the two storage areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
  /// Survives across sessions.
  Local,
  /// Scoped to the current session.
  Session,
}

impl Area {
  pub const ALL: [Area; 2] = [Area::Local, Area::Session];

  pub fn as_str(self) -> &'static str {
    match self {
      Area::Local => "local",
      Area::Session => "session",
    }
  }

  fn parse(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|area| area.as_str() == s)
  }
}

/// The five operations every area exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
  Get,
  Put,
  Remove,
  ListKeys,
  Clear,
}

impl OpKind {
  pub const ALL: [OpKind; 5] = [
    OpKind::Get,
    OpKind::Put,
    OpKind::Remove,
    OpKind::ListKeys,
    OpKind::Clear,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      OpKind::Get => "get",
      OpKind::Put => "put",
      OpKind::Remove => "remove",
      OpKind::ListKeys => "listKeys",
      OpKind::Clear => "clear",
    }
  }

  fn parse(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|kind| kind.as_str() == s)
  }
}

/// A single registered function: an operation kind applied to an area.
///
/// Its function name is `"<area>.<op>"`, e.g. `local.get` or
/// `session.listKeys`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
  pub area: Area,
  pub kind: OpKind,
}

impl Operation {
  pub fn new(area: Area, kind: OpKind) -> Self {
    Self { area, kind }
  }

  /// All ten operations, local area first.
  pub fn all() -> impl Iterator<Item = Operation> {
    Area::ALL
      .into_iter()
      .flat_map(|area| OpKind::ALL.into_iter().map(move |kind| Operation::new(area, kind)))
  }

  /// Function name as registered on the host.
  pub fn function_name(self) -> String {
    self.to_string()
  }

  /// Parse a function name such as "session.clear".
  pub fn parse(name: &str) -> Option<Self> {
    let (area, kind) = name.split_once('.')?;
    Some(Self::new(Area::parse(area)?, OpKind::parse(kind)?))
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.area.as_str(), self.kind.as_str())
  }
}
