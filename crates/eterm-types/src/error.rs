/// Errors produced while parsing a textual schema.
///
/// Schemas registered at run time are written in a small term-like
/// syntax (`{integer, [atom]}`, `#{atom => binary}`). A `TypeError`
/// carries the byte offset into the schema text where parsing stopped.
///
/// ```text
/// ┌─────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                              │
/// │   ├── UnknownScalar for a misspelled type name      │
/// │   ├── UnexpectedChar for stray punctuation          │
/// │   ├── UnexpectedEnd when the text stops mid-shape   │
/// │   ├── TrailingInput after a complete schema         │
/// │   └── TooDeep when compounds nest past the limit    │
/// └─────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
  /// A bare word that does not name a scalar type.
  #[error("unknown scalar type `{name}` at offset {offset}")]
  UnknownScalar { name: String, offset: usize },

  /// A character that cannot start or continue the expected production.
  #[error("unexpected character {found:?} at offset {offset}, expected {expected}")]
  UnexpectedChar {
    found: char,
    offset: usize,
    expected: &'static str,
  },

  /// The schema text ended before the shape was closed.
  #[error("schema ended unexpectedly, expected {expected}")]
  UnexpectedEnd { expected: &'static str },

  /// Extra text follows a complete schema.
  #[error("unexpected trailing input at offset {offset}")]
  TrailingInput { offset: usize },

  /// Compounds are nested more than [`SchemaNode::MAX_DEPTH`] levels deep.
  ///
  /// [`SchemaNode::MAX_DEPTH`]: crate::SchemaNode::MAX_DEPTH
  #[error("schema nests deeper than {max} levels at offset {offset}")]
  TooDeep { offset: usize, max: usize },
}
