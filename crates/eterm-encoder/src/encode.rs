use std::collections::{BTreeMap, HashMap, LinkedList, VecDeque};
use std::hash::BuildHasher;

use eterm_types::{Atom, Binary, List, Map, Term};
use eterm_wire::Compound;

use crate::encoder::Encoder;

/// A value the encoder can write as a term.
///
/// The impl picks the term's shape; nesting happens by calling
/// [`Encoder::encode`] (or `child.encode(encoder)`) on each child from
/// inside a [`CompositeScope`](crate::CompositeScope).
///
/// ```text
/// ┌──────────────────────────────────────────┬──────────────────────┐
/// │ Rust value                               │ Term                 │
/// ├──────────────────────────────────────────┼──────────────────────┤
/// │ i8 .. i64, isize, u8 .. u64, usize       │ integer              │
/// │ f32, f64                                 │ float                │
/// │ str, String                              │ string               │
/// │ Atom                                     │ atom                 │
/// │ Binary                                   │ binary               │
/// │ (T1, ..., Tn), n ≤ 12                    │ tuple                │
/// │ [T], [T; N], Vec, VecDeque, LinkedList,  │ list                 │
/// │ List                                     │                      │
/// │ BTreeMap, HashMap, Map                   │ map                  │
/// │ Term                                     │ per variant          │
/// └──────────────────────────────────────────┴──────────────────────┘
/// ```
///
/// Note that `Vec<u8>` is a list of small integers; wrap bytes in
/// [`Binary`] to get a binary.
pub trait Encode {
    fn encode(&self, encoder: &mut Encoder);
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, encoder: &mut Encoder) {
        (**self).encode(encoder);
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, encoder: &mut Encoder) {
        (**self).encode(encoder);
    }
}

// ── Scalars ───────────────────────────────────────────────────────────

macro_rules! signed_encode {
    ($($ty:ty)*) => {$(
        impl Encode for $ty {
            fn encode(&self, encoder: &mut Encoder) {
                encoder.write_long(i64::from(*self));
            }
        }
    )*};
}

macro_rules! unsigned_encode {
    ($($ty:ty)*) => {$(
        impl Encode for $ty {
            fn encode(&self, encoder: &mut Encoder) {
                encoder.write_ulong(u64::from(*self));
            }
        }
    )*};
}

signed_encode!(i8 i16 i32 i64);
unsigned_encode!(u8 u16 u32 u64);

// Pointer-sized integers saturate on targets wider than 64 bits.
impl Encode for isize {
    fn encode(&self, encoder: &mut Encoder) {
        let value = i64::try_from(*self).unwrap_or(if *self < 0 { i64::MIN } else { i64::MAX });
        encoder.write_long(value);
    }
}

impl Encode for usize {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_ulong(u64::try_from(*self).unwrap_or(u64::MAX));
    }
}

impl Encode for f32 {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_double(f64::from(*self));
    }
}

impl Encode for f64 {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_double(*self);
    }
}

impl Encode for str {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_string(self);
    }
}

impl Encode for String {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_string(self);
    }
}

impl Encode for Atom {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_atom(self.as_str());
    }
}

impl Encode for Binary {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.write_binary(self.as_bytes());
    }
}

// ── Sequences ─────────────────────────────────────────────────────────

/// Write `items` as a list; the length comes from the iterator.
fn encode_seq<I>(encoder: &mut Encoder, items: I)
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    I::Item: Encode,
{
    let items = items.into_iter();
    let mut scope = encoder.composite(Compound::List, items.len());
    for item in items {
        item.encode(&mut scope);
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, encoder: &mut Encoder) {
        encode_seq(encoder, self);
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self, encoder: &mut Encoder) {
        encode_seq(encoder, self);
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, encoder: &mut Encoder) {
        encode_seq(encoder, self);
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode(&self, encoder: &mut Encoder) {
        encode_seq(encoder, self);
    }
}

impl<T: Encode> Encode for LinkedList<T> {
    fn encode(&self, encoder: &mut Encoder) {
        encode_seq(encoder, self);
    }
}

impl<T: Encode> Encode for List<T> {
    fn encode(&self, encoder: &mut Encoder) {
        encode_seq(encoder, self);
    }
}

// ── Maps ──────────────────────────────────────────────────────────────

/// Write `pairs` as a map, in the container's iteration order.
fn encode_pairs<'a, K, V, I>(encoder: &mut Encoder, pairs: I)
where
    K: Encode + 'a,
    V: Encode + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
    I::IntoIter: ExactSizeIterator,
{
    let pairs = pairs.into_iter();
    let mut scope = encoder.composite(Compound::Map, pairs.len());
    for (key, value) in pairs {
        key.encode(&mut scope);
        value.encode(&mut scope);
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self, encoder: &mut Encoder) {
        encode_pairs(encoder, self);
    }
}

impl<K: Encode, V: Encode, S: BuildHasher> Encode for HashMap<K, V, S> {
    fn encode(&self, encoder: &mut Encoder) {
        encode_pairs(encoder, self);
    }
}

impl<K: Encode, V: Encode> Encode for Map<K, V> {
    fn encode(&self, encoder: &mut Encoder) {
        encode_pairs(encoder, self);
    }
}

// ── Tuples ────────────────────────────────────────────────────────────

macro_rules! tuple_encode {
    ($len:expr => $($name:ident $idx:tt)*) => {
        impl<$($name: Encode),*> Encode for ($($name,)*) {
            #[allow(unused_mut, unused_variables)]
            fn encode(&self, encoder: &mut Encoder) {
                let mut scope = encoder.composite(Compound::Tuple, $len);
                $(self.$idx.encode(&mut scope);)*
            }
        }
    };
}

tuple_encode!(0 =>);
tuple_encode!(1 => A 0);
tuple_encode!(2 => A 0 B 1);
tuple_encode!(3 => A 0 B 1 C 2);
tuple_encode!(4 => A 0 B 1 C 2 D 3);
tuple_encode!(5 => A 0 B 1 C 2 D 3 E 4);
tuple_encode!(6 => A 0 B 1 C 2 D 3 E 4 F 5);
tuple_encode!(7 => A 0 B 1 C 2 D 3 E 4 F 5 G 6);
tuple_encode!(8 => A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7);
tuple_encode!(9 => A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8);
tuple_encode!(10 => A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8 J 9);
tuple_encode!(11 => A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8 J 9 K 10);
tuple_encode!(12 => A 0 B 1 C 2 D 3 E 4 F 5 G 6 H 7 I 8 J 9 K 10 L 11);

// ── Dynamic terms ─────────────────────────────────────────────────────

impl Encode for Term {
    fn encode(&self, encoder: &mut Encoder) {
        match self {
            Term::Integer(value) => encoder.write_long(*value),
            Term::Float(value) => encoder.write_double(*value),
            Term::String(text) => encoder.write_string(text),
            Term::Atom(atom) => atom.encode(encoder),
            Term::Binary(binary) => binary.encode(encoder),
            Term::List(items) => encode_seq(encoder, items),
            Term::Tuple(items) => {
                let mut scope = encoder.composite(Compound::Tuple, items.len());
                for item in items {
                    item.encode(&mut scope);
                }
            }
            Term::Map(entries) => encode_pairs(encoder, entries),
        }
    }
}
