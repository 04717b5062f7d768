use eterm_types::{SchemaNode, Term};
use eterm_wire::header;

use crate::config::DecoderConfig;
use crate::decode::Decode;
use crate::dynamic::read_term;
use crate::error::DecodeError;
use crate::reader::TermReader;

/// A decoding session over one encoded buffer.
///
/// The session validates the version byte up front, then hands out one
/// top-level term per [`parse`](Self::parse) call. Terms are read from
/// a single cursor that only moves forward, so several terms written
/// back to back by one encoder session come out in the same order.
///
/// ```text
/// ┌─────┬──────────┬──────────┬─────┬──────────┐
/// │ 131 │ term #1  │ term #2  │ ... │ term #n  │
/// └─────┴──────────┴──────────┴─────┴──────────┘
///   ▲ new()  ▲ parse()  ▲ parse()        ▲ finish()
/// ```
///
/// Each `parse` returns an owned value; nothing borrows the session
/// afterwards. The first failure poisons the session: `is_valid()`
/// turns false and every later call returns
/// [`DecodeError::SessionFailed`], since the cursor may sit in the
/// middle of a half-read term.
///
/// # Example
///
/// ```rust
/// use eterm_decoder::Decoder;
/// use eterm_encoder::Encoder;
/// use eterm_types::{Atom, List};
///
/// let mut encoder = Encoder::new();
/// let atoms: List<Atom> = vec![Atom::from("ok"), Atom::from("error")].into();
/// encoder.encode(&(42_i64, atoms));
/// let bytes = encoder.into_bytes().unwrap();
///
/// let mut decoder = Decoder::new(&bytes).unwrap();
/// let (n, names): (i64, List<Atom>) = decoder.parse().unwrap();
/// assert_eq!(n, 42);
/// assert_eq!(names[1], "error");
/// decoder.finish().unwrap();
/// ```
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: TermReader<'a>,
    version: u8,
    failed: bool,
}

impl<'a> Decoder<'a> {
    /// Open a session with the default limits.
    ///
    /// # Errors
    ///
    /// [`DecodeError::BridgeFailure`] if the buffer is empty or does not
    /// start with the version byte.
    pub fn new(buf: &'a [u8]) -> Result<Self, DecodeError> {
        Self::with_config(buf, DecoderConfig::default())
    }

    /// Open a session with explicit limits.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_config(buf: &'a [u8], config: DecoderConfig) -> Result<Self, DecodeError> {
        let (version, consumed) = header::decode_version(buf)
            .map_err(|source| DecodeError::BridgeFailure { offset: 0, source })?;
        tracing::debug!(len = buf.len(), version, "decoder session opened");
        Ok(Self {
            reader: TermReader::new(buf, consumed, config),
            version,
            failed: false,
        })
    }

    /// Decode the next top-level term as schema `S`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::SessionFailed`] if an earlier call failed.
    /// - Any error from `S`'s [`Decode`] impl; this poisons the session.
    pub fn parse<S: Decode>(&mut self) -> Result<S, DecodeError> {
        self.run(S::decode)
    }

    /// Decode the next top-level term against a registered schema.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse).
    pub fn parse_dynamic(&mut self, schema: &SchemaNode) -> Result<Term, DecodeError> {
        self.run(|reader| read_term(reader, schema))
    }

    fn run<T>(
        &mut self,
        body: impl FnOnce(&mut TermReader<'a>) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        if self.failed {
            return Err(DecodeError::SessionFailed);
        }
        let result = body(&mut self.reader);
        if let Err(err) = &result {
            self.failed = true;
            tracing::debug!(position = self.reader.position(), %err, "decoder session failed");
        }
        result
    }

    /// Whether every parse so far has succeeded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.failed
    }

    /// Absolute cursor position, counting the version byte.
    #[must_use]
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    /// Whether every byte has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.reader.remaining() == 0
    }

    #[must_use]
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Close the session, checking that the whole buffer was consumed.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::SessionFailed`] if a parse failed.
    /// - [`DecodeError::TrailingData`] if bytes remain after the last term.
    pub fn finish(self) -> Result<(), DecodeError> {
        if self.failed {
            return Err(DecodeError::SessionFailed);
        }
        match self.reader.remaining() {
            0 => Ok(()),
            extra_bytes => Err(DecodeError::TrailingData { extra_bytes }),
        }
    }
}

/// Decode a buffer holding exactly one term of schema `S`.
///
/// # Errors
///
/// Any error from [`Decoder::new`] or [`Decoder::parse`], or
/// [`DecodeError::TrailingData`] if more bytes follow the term.
pub fn decode<S: Decode>(buf: &[u8]) -> Result<S, DecodeError> {
    let mut decoder = Decoder::new(buf)?;
    let value = decoder.parse()?;
    decoder.finish()?;
    Ok(value)
}

/// Decode a buffer holding exactly one term of a registered schema.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_term(buf: &[u8], schema: &SchemaNode) -> Result<Term, DecodeError> {
    let mut decoder = Decoder::new(buf)?;
    let term = decoder.parse_dynamic(schema)?;
    decoder.finish()?;
    Ok(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eterm_encoder::Encoder;
    use eterm_types::{Atom, Kind, List, Map};
    use eterm_wire::WireError;

    fn encode_all(build: impl FnOnce(&mut Encoder)) -> Vec<u8> {
        let mut encoder = Encoder::new();
        build(&mut encoder);
        encoder.into_bytes().unwrap()
    }

    #[test]
    fn rejects_missing_version() {
        assert!(matches!(
            Decoder::new(&[97, 1]),
            Err(DecodeError::BridgeFailure {
                offset: 0,
                source: WireError::InvalidVersion { found: 97 },
            })
        ));
        assert!(matches!(
            Decoder::new(&[]),
            Err(DecodeError::BridgeFailure {
                source: WireError::UnexpectedEof { .. },
                ..
            })
        ));
    }

    #[test]
    fn reads_successive_top_level_terms() {
        let bytes = encode_all(|e| {
            e.encode(&7_i64);
            e.encode("seven");
            e.encode(&Atom::from("seven"));
        });

        let mut decoder = Decoder::new(&bytes).unwrap();
        assert_eq!(decoder.version(), 131);
        assert_eq!(decoder.position(), 1);
        assert_eq!(decoder.parse::<i64>().unwrap(), 7);
        assert_eq!(decoder.parse::<String>().unwrap(), "seven");
        assert!(!decoder.is_exhausted());
        assert_eq!(decoder.parse::<Atom>().unwrap(), "seven");
        assert!(decoder.is_exhausted());
        decoder.finish().unwrap();
    }

    #[test]
    fn failure_poisons_the_session() {
        let bytes = encode_all(|e| {
            e.encode(&1_i64);
            e.encode(&2_i64);
        });

        let mut decoder = Decoder::new(&bytes).unwrap();
        assert_eq!(
            decoder.parse::<Atom>(),
            Err(DecodeError::TypeMismatch {
                expected: Kind::Atom,
                found: 97,
                offset: 1,
            })
        );
        assert!(!decoder.is_valid());
        assert_eq!(decoder.parse::<i64>(), Err(DecodeError::SessionFailed));
        assert_eq!(decoder.finish(), Err(DecodeError::SessionFailed));
    }

    #[test]
    fn finish_reports_trailing_bytes() {
        let bytes = encode_all(|e| {
            e.encode(&1_i64);
            e.encode(&2_i64);
        });
        assert_eq!(
            decode::<i64>(&bytes),
            Err(DecodeError::TrailingData { extra_bytes: 2 })
        );
    }

    #[test]
    fn truncated_buffer_fails_with_bridge_failure() {
        let atoms: List<Atom> = vec![Atom::from("ok"), Atom::from("error")].into();
        let bytes = encode_all(|e| {
            e.encode(&(42_i64, atoms));
        });
        for cut in 1..bytes.len() {
            let result = decode::<(i64, List<Atom>)>(&bytes[..cut]);
            assert!(
                matches!(result, Err(DecodeError::BridgeFailure { .. })),
                "cut at {cut}: {result:?}"
            );
        }
    }

    #[test]
    fn static_and_dynamic_decoding_agree() {
        type Schema = Map<Atom, (i64, List<String>)>;
        let mut value = Schema::new();
        value.insert(Atom::from("a"), (1, vec!["x".to_string()].into()));
        value.insert(Atom::from("b"), (2, List::new()));
        let bytes = encode_all(|e| {
            e.encode(&value);
        });

        let decoded: Schema = decode(&bytes).unwrap();
        assert_eq!(decoded, value);

        let term = decode_term(&bytes, &Schema::schema()).unwrap();
        assert!(term.conforms_to(&Schema::schema()));
        assert_eq!(term.to_string(), "#{a => {1,[\"x\"]},b => {2,[]}}");
    }

    #[test]
    fn depth_limit_applies_per_session() {
        let nested: List<List<List<i64>>> = vec![vec![vec![1].into()].into()].into();
        let bytes = encode_all(|e| {
            e.encode(&nested);
        });

        let config = DecoderConfig::default().with_max_depth(2);
        let mut decoder = Decoder::with_config(&bytes, config).unwrap();
        assert!(matches!(
            decoder.parse::<List<List<List<i64>>>>(),
            Err(DecodeError::LimitExceeded { limit: "depth", max: 2, .. })
        ));

        let config = DecoderConfig::default().with_max_depth(3);
        let mut decoder = Decoder::with_config(&bytes, config).unwrap();
        assert_eq!(decoder.parse::<List<List<List<i64>>>>().unwrap(), nested);
    }
}
