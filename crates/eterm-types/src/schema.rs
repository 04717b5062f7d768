use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;
use crate::kind::Kind;

/// A schema known at run time.
///
/// Static schemas are Rust types (`(i64, List<Atom>)`); a `SchemaNode`
/// describes the same shapes as a value, so a schema can be registered
/// from configuration or the command line and still drive the decoder.
///
/// Text syntax (also the `Display` output):
///
/// ```text
/// ┌───────────────────┬──────────────────────────────────────┐
/// │ Syntax            │ Shape                                │
/// ├───────────────────┼──────────────────────────────────────┤
/// │ integer | int     │ Integer                              │
/// │ float             │ Float                                │
/// │ string            │ String                               │
/// │ atom              │ Atom                                 │
/// │ binary            │ Binary                               │
/// │ [T]               │ List of T                            │
/// │ {T1, T2, ...}     │ Tuple of fixed arity (`{}` is empty) │
/// │ #{K => V}         │ Map from K to V                      │
/// └───────────────────┴──────────────────────────────────────┘
/// ```
///
/// ```rust
/// use eterm_types::SchemaNode;
///
/// let schema: SchemaNode = "{integer, [atom]}".parse().unwrap();
/// assert_eq!(
///     schema,
///     SchemaNode::Tuple(vec![
///         SchemaNode::Integer,
///         SchemaNode::list(SchemaNode::Atom),
///     ])
/// );
/// assert_eq!(schema.to_string(), "{integer, [atom]}");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SchemaNode {
    Integer,
    Float,
    String,
    Atom,
    Binary,
    List(Box<SchemaNode>),
    Tuple(Vec<SchemaNode>),
    Map(Box<SchemaNode>, Box<SchemaNode>),
}

impl SchemaNode {
    /// Deepest compound nesting accepted by the text parser.
    pub const MAX_DEPTH: usize = 256;

    #[must_use]
    pub fn list(element: SchemaNode) -> Self {
        Self::List(Box::new(element))
    }

    #[must_use]
    pub fn map(key: SchemaNode, value: SchemaNode) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Integer => Kind::Integer,
            Self::Float => Kind::Float,
            Self::String => Kind::String,
            Self::Atom => Kind::Atom,
            Self::Binary => Kind::Binary,
            Self::List(_) => Kind::List,
            Self::Tuple(_) => Kind::Tuple,
            Self::Map(..) => Kind::Map,
        }
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(element) => write!(f, "[{element}]"),
            Self::Tuple(elements) => {
                f.write_str("{")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("}")
            }
            Self::Map(key, value) => write!(f, "#{{{key} => {value}}}"),
            scalar => f.write_str(scalar.kind().name()),
        }
    }
}

impl FromStr for SchemaNode {
    type Err = TypeError;

    fn from_str(text: &str) -> Result<Self, TypeError> {
        let mut parser = Parser {
            text,
            pos: 0,
            depth: 0,
        };
        let node = parser.node()?;
        parser.skip_ws();
        if parser.pos < text.len() {
            return Err(TypeError::TrailingInput { offset: parser.pos });
        }
        Ok(node)
    }
}

// ── Schema text parser ────────────────────────────────────────────────
//
// Recursive descent over the text; `pos` is a byte offset and always
// sits on a char boundary.

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, wanted: char, expected: &'static str) -> Result<(), TypeError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == wanted => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(TypeError::UnexpectedChar {
                found,
                offset: self.pos,
                expected,
            }),
            None => Err(TypeError::UnexpectedEnd { expected }),
        }
    }

    fn node(&mut self) -> Result<SchemaNode, TypeError> {
        const EXPECTED: &str = "a schema";

        self.skip_ws();
        match self.peek() {
            Some('[') => self.nested(|p| {
                p.pos += 1;
                let element = p.node()?;
                p.expect(']', "`]`")?;
                Ok(SchemaNode::list(element))
            }),
            Some('{') => self.nested(|p| {
                p.pos += 1;
                p.tuple_body()
            }),
            Some('#') => self.nested(|p| {
                p.pos += 1;
                p.expect('{', "`{` after `#`")?;
                let key = p.node()?;
                p.expect('=', "`=>`")?;
                p.expect('>', "`=>`")?;
                let value = p.node()?;
                p.expect('}', "`}`")?;
                Ok(SchemaNode::map(key, value))
            }),
            Some(c) if c.is_ascii_alphabetic() => self.scalar(),
            Some(found) => Err(TypeError::UnexpectedChar {
                found,
                offset: self.pos,
                expected: EXPECTED,
            }),
            None => Err(TypeError::UnexpectedEnd { expected: EXPECTED }),
        }
    }

    /// Parse one compound at the cursor, one level deeper.
    fn nested(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<SchemaNode, TypeError>,
    ) -> Result<SchemaNode, TypeError> {
        if self.depth >= SchemaNode::MAX_DEPTH {
            return Err(TypeError::TooDeep {
                offset: self.pos,
                max: SchemaNode::MAX_DEPTH,
            });
        }
        self.depth += 1;
        let out = body(self);
        self.depth -= 1;
        out
    }

    /// Tuple elements after the opening brace.
    fn tuple_body(&mut self) -> Result<SchemaNode, TypeError> {
        let mut elements = Vec::new();
        self.skip_ws();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(SchemaNode::Tuple(elements));
        }

        loop {
            elements.push(self.node()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    return Ok(SchemaNode::Tuple(elements));
                }
                Some(found) => {
                    return Err(TypeError::UnexpectedChar {
                        found,
                        offset: self.pos,
                        expected: "`,` or `}`",
                    });
                }
                None => {
                    return Err(TypeError::UnexpectedEnd {
                        expected: "`,` or `}`",
                    });
                }
            }
        }
    }

    fn scalar(&mut self) -> Result<SchemaNode, TypeError> {
        let start = self.pos;
        let len = self.text[start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(self.text.len() - start);
        self.pos += len;

        match &self.text[start..self.pos] {
            "integer" | "int" => Ok(SchemaNode::Integer),
            "float" => Ok(SchemaNode::Float),
            "string" => Ok(SchemaNode::String),
            "atom" => Ok(SchemaNode::Atom),
            "binary" => Ok(SchemaNode::Binary),
            other => Err(TypeError::UnknownScalar {
                name: other.to_owned(),
                offset: start,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<SchemaNode, TypeError> {
        text.parse()
    }

    #[test]
    fn parses_scalars() {
        assert_eq!(parse("integer").unwrap(), SchemaNode::Integer);
        assert_eq!(parse("int").unwrap(), SchemaNode::Integer);
        assert_eq!(parse("  binary ").unwrap(), SchemaNode::Binary);
    }

    #[test]
    fn parses_nested_shapes() {
        let schema = parse("{atom, [#{string => {integer, float}}]}").unwrap();
        assert_eq!(
            schema,
            SchemaNode::Tuple(vec![
                SchemaNode::Atom,
                SchemaNode::list(SchemaNode::map(
                    SchemaNode::String,
                    SchemaNode::Tuple(vec![SchemaNode::Integer, SchemaNode::Float]),
                )),
            ])
        );
    }

    #[test]
    fn empty_tuple() {
        assert_eq!(parse("{ }").unwrap(), SchemaNode::Tuple(Vec::new()));
        assert_eq!(SchemaNode::Tuple(Vec::new()).to_string(), "{}");
    }

    #[test]
    fn display_reparses_to_same_schema() {
        let text = "#{{atom, integer} => [binary]}";
        let schema = parse(text).unwrap();
        assert_eq!(schema.to_string(), text);
        assert_eq!(parse(&schema.to_string()).unwrap(), schema);
    }

    #[test]
    fn unknown_scalar_reports_offset() {
        assert_eq!(
            parse("{integer, strng}"),
            Err(TypeError::UnknownScalar {
                name: "strng".to_string(),
                offset: 10,
            })
        );
    }

    #[test]
    fn unclosed_list() {
        assert!(matches!(
            parse("[atom"),
            Err(TypeError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn stray_punctuation() {
        assert!(matches!(
            parse("{atom; atom}"),
            Err(TypeError::UnexpectedChar { found: ';', .. })
        ));
    }

    #[test]
    fn trailing_input() {
        assert_eq!(
            parse("atom atom"),
            Err(TypeError::TrailingInput { offset: 5 })
        );
    }

    #[test]
    fn nesting_is_bounded() {
        let max = SchemaNode::MAX_DEPTH;
        let deepest = format!("{}atom{}", "[".repeat(max), "]".repeat(max));
        assert!(parse(&deepest).is_ok());

        assert_eq!(
            parse(&"[".repeat(100_000)),
            Err(TypeError::TooDeep { offset: max, max })
        );
        let maps = "#{atom => ".repeat(max + 1);
        assert!(matches!(parse(&maps), Err(TypeError::TooDeep { .. })));
        assert!(matches!(
            parse(&"{".repeat(max + 1)),
            Err(TypeError::TooDeep { .. })
        ));
    }

    #[test]
    fn kind_of_each_node() {
        assert_eq!(parse("[atom]").unwrap().kind(), Kind::List);
        assert_eq!(parse("#{atom => atom}").unwrap().kind(), Kind::Map);
        assert_eq!(parse("float").unwrap().kind(), Kind::Float);
    }
}
