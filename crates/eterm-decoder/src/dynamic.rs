use std::collections::BTreeMap;

use eterm_types::{SchemaNode, Term};

use crate::error::DecodeError;
use crate::reader::TermReader;

/// Decode one term whose shape is given by a registered schema.
///
/// Walks `schema` and the wire in lockstep, the same way the static
/// [`Decode`](crate::Decode) impls do, and builds a [`Term`] tree.
/// A static type and its [`schema()`](crate::Decode::schema) accept
/// exactly the same bytes.
///
/// # Errors
///
/// The same errors as the static decoders: type or arity mismatches,
/// malformed primitives, and configured limits.
pub fn read_term(reader: &mut TermReader<'_>, schema: &SchemaNode) -> Result<Term, DecodeError> {
    match schema {
        SchemaNode::Integer => reader.read_long().map(Term::Integer),
        SchemaNode::Float => reader.read_double().map(Term::Float),
        SchemaNode::String => reader.read_string().map(Term::String),
        SchemaNode::Atom => reader.read_atom().map(Term::Atom),
        SchemaNode::Binary => reader.read_binary().map(Term::Binary),
        SchemaNode::Tuple(elements) => reader.nested(|reader| {
            reader.expect_tuple(elements.len())?;
            elements
                .iter()
                .map(|element| read_term(reader, element))
                .collect::<Result<Vec<_>, _>>()
                .map(Term::Tuple)
        }),
        SchemaNode::List(element) => reader.nested(|reader| {
            let arity = reader.list_header()?;
            if arity == 0 {
                return Ok(Term::List(Vec::new()));
            }
            let mut items = Vec::with_capacity(reader.capacity_hint(arity));
            for _ in 0..arity {
                items.push(read_term(reader, element)?);
            }
            reader.list_tail()?;
            Ok(Term::List(items))
        }),
        SchemaNode::Map(key, value) => reader.nested(|reader| {
            let arity = reader.map_header()?;
            let mut entries = BTreeMap::new();
            for _ in 0..arity {
                let k = read_term(reader, key)?;
                let v = read_term(reader, value)?;
                entries.insert(k, v);
            }
            Ok(Term::Map(entries))
        }),
    }
}
