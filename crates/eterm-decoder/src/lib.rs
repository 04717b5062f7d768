#![warn(clippy::pedantic)]

pub mod config;
pub mod decode;
pub mod decoder;
pub mod dynamic;
pub mod error;
pub mod reader;

pub use config::DecoderConfig;
pub use decode::Decode;
pub use decoder::{Decoder, decode, decode_term};
pub use error::DecodeError;
pub use reader::TermReader;
