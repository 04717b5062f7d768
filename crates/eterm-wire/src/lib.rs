#![warn(clippy::pedantic)]

pub mod error;
pub mod header;
pub mod scalar;
pub mod tag;

mod bytes;

pub use error::WireError;
pub use header::Compound;
