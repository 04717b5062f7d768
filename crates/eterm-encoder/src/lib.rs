#![warn(clippy::pedantic)]

pub mod encode;
pub mod encoder;
pub mod error;
pub mod scope;

pub use encode::Encode;
pub use encoder::{Encoder, encode};
pub use error::EncodeError;
pub use scope::CompositeScope;
