use std::fmt;

use eterm_wire::Compound;

/// Category of a term: one of five scalar kinds or three compounds.
///
/// ```text
/// ┌─────────┬──────────┬──────────────────────────────┐
/// │ Kind    │ Category │ Rust value                   │
/// ├─────────┼──────────┼──────────────────────────────┤
/// │ Integer │ scalar   │ i64                          │
/// │ Float   │ scalar   │ f64                          │
/// │ String  │ scalar   │ String                       │
/// │ Atom    │ scalar   │ Atom                         │
/// │ Binary  │ scalar   │ Binary                       │
/// │ List    │ compound │ List<T>                      │
/// │ Tuple   │ compound │ (T1, ..., Tn)                │
/// │ Map     │ compound │ Map<K, V>                    │
/// └─────────┴──────────┴──────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
  Integer,
  Float,
  String,
  Atom,
  Binary,
  List,
  Tuple,
  Map,
}

impl Kind {
  /// Lowercase name, matching the schema syntax.
  #[must_use]
  pub fn name(self) -> &'static str {
    match self {
      Self::Integer => "integer",
      Self::Float => "float",
      Self::String => "string",
      Self::Atom => "atom",
      Self::Binary => "binary",
      Self::List => "list",
      Self::Tuple => "tuple",
      Self::Map => "map",
    }
  }

  #[must_use]
  pub fn is_scalar(self) -> bool {
    self.compound().is_none()
  }

  /// The wire compound for this kind, or `None` for scalars.
  #[must_use]
  pub fn compound(self) -> Option<Compound> {
    match self {
      Self::List => Some(Compound::List),
      Self::Tuple => Some(Compound::Tuple),
      Self::Map => Some(Compound::Map),
      Self::Integer | Self::Float | Self::String | Self::Atom | Self::Binary => None,
    }
  }
}

impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scalars_have_no_compound() {
    for kind in [Kind::Integer, Kind::Float, Kind::String, Kind::Atom, Kind::Binary] {
      assert!(kind.is_scalar(), "{kind} should be scalar");
    }
    assert_eq!(Kind::List.compound(), Some(Compound::List));
    assert_eq!(Kind::Map.compound(), Some(Compound::Map));
  }

  #[test]
  fn display_uses_schema_names() {
    assert_eq!(Kind::Binary.to_string(), "binary");
    assert_eq!(Kind::Tuple.to_string(), "tuple");
  }
}
