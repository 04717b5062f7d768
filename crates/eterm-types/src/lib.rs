#![warn(clippy::pedantic)]

pub mod error;
pub mod kind;
pub mod list;
pub mod map;
pub mod scalar;
pub mod schema;
pub mod term;

pub use error::TypeError;
pub use kind::Kind;
pub use list::List;
pub use map::Map;
pub use scalar::{Atom, Binary};
pub use schema::SchemaNode;
pub use term::Term;
