use eterm_types::{Atom, Binary, Kind, List, Map, SchemaNode};

use crate::error::DecodeError;
use crate::reader::TermReader;

/// A schema type: something the decoder can build from the wire.
///
/// The type itself is the schema. Scalars map to one primitive read,
/// tuples check their header arity against the tuple's length, and
/// `List`/`Map` take their element count from the wire.
///
/// ```text
/// ┌─────────────────┬───────────┬──────────────────────────────────┐
/// │ Rust type       │ Kind      │ Reads                            │
/// ├─────────────────┼───────────┼──────────────────────────────────┤
/// │ i64             │ Integer   │ small int / int / bignum         │
/// │ f64             │ Float     │ new float / legacy text float    │
/// │ String          │ String    │ nil / string / list of bytes     │
/// │ Atom            │ Atom      │ UTF-8 or Latin-1 atom tags       │
/// │ Binary          │ Binary    │ binary                           │
/// │ (T1, ..., Tn)   │ Tuple     │ header (arity n), then T1..Tn    │
/// │ List<T>         │ List      │ header (m), m × T, tail          │
/// │ Map<K, V>       │ Map       │ header (m), m × (K, V)           │
/// └─────────────────┴───────────┴──────────────────────────────────┘
/// ```
///
/// Decoding is fail-fast: the first error aborts the whole value, and
/// children built so far are dropped with it.
pub trait Decode: Sized {
    /// Kind of term this type expects on the wire.
    const KIND: Kind;

    /// Runtime description of this type's shape.
    fn schema() -> SchemaNode;

    /// Read one value at the reader's cursor.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`] raised while reading this value or its children.
    fn decode(reader: &mut TermReader<'_>) -> Result<Self, DecodeError>;
}

// ── Scalars ───────────────────────────────────────────────────────────

macro_rules! scalar_decode {
    ($ty:ty, $kind:ident, $read:ident) => {
        impl Decode for $ty {
            const KIND: Kind = Kind::$kind;

            fn schema() -> SchemaNode {
                SchemaNode::$kind
            }

            fn decode(reader: &mut TermReader<'_>) -> Result<Self, DecodeError> {
                reader.$read()
            }
        }
    };
}

scalar_decode!(i64, Integer, read_long);
scalar_decode!(f64, Float, read_double);
scalar_decode!(String, String, read_string);
scalar_decode!(Atom, Atom, read_atom);
scalar_decode!(Binary, Binary, read_binary);

// ── Lists and maps ────────────────────────────────────────────────────

impl<T: Decode> Decode for List<T> {
    const KIND: Kind = Kind::List;

    fn schema() -> SchemaNode {
        SchemaNode::list(T::schema())
    }

    fn decode(reader: &mut TermReader<'_>) -> Result<Self, DecodeError> {
        reader.nested(|reader| {
            let arity = reader.list_header()?;
            if arity == 0 {
                return Ok(List::new());
            }

            let mut items = List::with_capacity(reader.capacity_hint(arity));
            for _ in 0..arity {
                items.push(T::decode(reader)?);
            }
            reader.list_tail()?;
            Ok(items)
        })
    }
}

impl<K: Decode + Ord, V: Decode> Decode for Map<K, V> {
    const KIND: Kind = Kind::Map;

    fn schema() -> SchemaNode {
        SchemaNode::map(K::schema(), V::schema())
    }

    fn decode(reader: &mut TermReader<'_>) -> Result<Self, DecodeError> {
        reader.nested(|reader| {
            let arity = reader.map_header()?;
            let mut map = Map::new();
            for _ in 0..arity {
                let key = K::decode(reader)?;
                let value = V::decode(reader)?;
                map.insert(key, value);
            }
            Ok(map)
        })
    }
}

// ── Tuples ────────────────────────────────────────────────────────────
//
// One impl per arity. Elements are decoded left to right, which is the
// order a tuple expression evaluates its operands.

macro_rules! tuple_decode {
    ($len:expr => $($name:ident)*) => {
        impl<$($name: Decode),*> Decode for ($($name,)*) {
            const KIND: Kind = Kind::Tuple;

            fn schema() -> SchemaNode {
                SchemaNode::Tuple(vec![$($name::schema()),*])
            }

            fn decode(reader: &mut TermReader<'_>) -> Result<Self, DecodeError> {
                reader.nested(|reader| {
                    reader.expect_tuple($len)?;
                    Ok(($($name::decode(reader)?,)*))
                })
            }
        }
    };
}

tuple_decode!(0 =>);
tuple_decode!(1 => A);
tuple_decode!(2 => A B);
tuple_decode!(3 => A B C);
tuple_decode!(4 => A B C D);
tuple_decode!(5 => A B C D E);
tuple_decode!(6 => A B C D E F);
tuple_decode!(7 => A B C D E F G);
tuple_decode!(8 => A B C D E F G H);
tuple_decode!(9 => A B C D E F G H I);
tuple_decode!(10 => A B C D E F G H I J);
tuple_decode!(11 => A B C D E F G H I J K);
tuple_decode!(12 => A B C D E F G H I J K L);
