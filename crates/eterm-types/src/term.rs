use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::kind::Kind;
use crate::scalar::{Atom, Binary};
use crate::schema::SchemaNode;

/// An owned term tree whose shape is only known at run time.
///
/// This is the value produced when decoding against a registered
/// [`SchemaNode`] instead of a static Rust type. Each compound owns its
/// children outright; dropping a `Term` drops the whole subtree.
///
/// `Term` is totally ordered so it can key a map: terms of different
/// kinds order by kind (integer < float < string < atom < binary <
/// list < tuple < map), floats by `f64::total_cmp`, compounds
/// element-wise. Equality follows the same order, so `NaN == NaN` and
/// `0.0 != -0.0`.
#[derive(Clone, Debug)]
pub enum Term {
    Integer(i64),
    Float(f64),
    String(String),
    Atom(Atom),
    Binary(Binary),
    List(Vec<Term>),
    Tuple(Vec<Term>),
    Map(BTreeMap<Term, Term>),
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(Atom::new(name))
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Integer(_) => Kind::Integer,
            Self::Float(_) => Kind::Float,
            Self::String(_) => Kind::String,
            Self::Atom(_) => Kind::Atom,
            Self::Binary(_) => Kind::Binary,
            Self::List(_) => Kind::List,
            Self::Tuple(_) => Kind::Tuple,
            Self::Map(_) => Kind::Map,
        }
    }

    /// Whether this term has exactly the shape `schema` describes.
    ///
    /// Tuples must match arity and every position; lists and maps must
    /// match on every element.
    #[must_use]
    pub fn conforms_to(&self, schema: &SchemaNode) -> bool {
        match (self, schema) {
            (Self::Integer(_), SchemaNode::Integer)
            | (Self::Float(_), SchemaNode::Float)
            | (Self::String(_), SchemaNode::String)
            | (Self::Atom(_), SchemaNode::Atom)
            | (Self::Binary(_), SchemaNode::Binary) => true,
            (Self::List(items), SchemaNode::List(element)) => {
                items.iter().all(|item| item.conforms_to(element))
            }
            (Self::Tuple(items), SchemaNode::Tuple(elements)) => {
                items.len() == elements.len()
                    && items.iter().zip(elements).all(|(item, s)| item.conforms_to(s))
            }
            (Self::Map(entries), SchemaNode::Map(key, value)) => entries
                .iter()
                .all(|(k, v)| k.conforms_to(key) && v.conforms_to(value)),
            _ => false,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Text of a string or atom term.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            Self::Atom(atom) => Some(atom.as_str()),
            _ => None,
        }
    }

    /// Children of a list or tuple term.
    #[must_use]
    pub fn elements(&self) -> Option<&[Term]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<Term, Term>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Integer(_) => 0,
            Self::Float(_) => 1,
            Self::String(_) => 2,
            Self::Atom(_) => 3,
            Self::Binary(_) => 4,
            Self::List(_) => 5,
            Self::Tuple(_) => 6,
            Self::Map(_) => 7,
        }
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Atom(a), Self::Atom(b)) => a.cmp(b),
            (Self::Binary(a), Self::Binary(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a.cmp(b),
            (Self::Map(a), Self::Map(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Term {}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<String> for Term {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<Atom> for Term {
    fn from(atom: Atom) -> Self {
        Self::Atom(atom)
    }
}

impl From<Binary> for Term {
    fn from(binary: Binary) -> Self {
        Self::Binary(binary)
    }
}

impl From<Vec<Term>> for Term {
    fn from(items: Vec<Term>) -> Self {
        Self::List(items)
    }
}

/// Erlang-style rendering: `{42,[ok,error]}`, `#{a => 1}`, `<<1,2>>`.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::String(text) => write!(f, "\"{}\"", text.escape_debug()),
            Self::Atom(atom) => write!(f, "{atom}"),
            Self::Binary(binary) => write!(f, "{binary}"),
            Self::List(items) => write_seq(f, "[", items, "]"),
            Self::Tuple(items) => write_seq(f, "{", items, "}"),
            Self::Map(entries) => {
                f.write_str("#{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key} => {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Term], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}
