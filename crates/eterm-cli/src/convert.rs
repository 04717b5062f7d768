//! JSON ↔ term conversion under a schema.
//!
//! JSON has fewer shapes than the term format, so the schema decides how
//! each JSON value is read: the same string becomes a string, an atom or
//! (as hex) a binary depending on where it sits.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow, bail, ensure};
use eterm_types::{Binary, SchemaNode, Term};
use serde_json::{Number, Value};

/// Convert `value` into a term shaped like `schema`.
///
/// # Errors
///
/// Returns an error naming the JSON path (`$[1].name`) of the first value
/// that does not fit the schema.
pub fn term_from_json(value: &Value, schema: &SchemaNode) -> Result<Term> {
    convert(value, schema, "$")
}

fn convert(value: &Value, schema: &SchemaNode, path: &str) -> Result<Term> {
    match (schema, value) {
        (SchemaNode::Integer, Value::Number(n)) => n
            .as_i64()
            .map(Term::Integer)
            .ok_or_else(|| anyhow!("{path}: {n} is not a 64-bit integer")),
        (SchemaNode::Float, Value::Number(n)) => n
            .as_f64()
            .map(Term::Float)
            .ok_or_else(|| anyhow!("{path}: {n} is not representable as a float")),
        (SchemaNode::String, Value::String(text)) => Ok(Term::String(text.clone())),
        (SchemaNode::Atom, Value::String(text)) => Ok(Term::atom(text.as_str())),
        (SchemaNode::Binary, Value::String(text)) => hex::decode(text)
            .map(|bytes| Term::Binary(Binary::from(bytes)))
            .with_context(|| format!("{path}: binary must be a hex string")),
        (SchemaNode::List(element), Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| convert(item, element, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Term::List),
        (SchemaNode::Tuple(elements), Value::Array(items)) => {
            ensure!(
                items.len() == elements.len(),
                "{path}: tuple {schema} needs {} elements, found {}",
                elements.len(),
                items.len()
            );
            items
                .iter()
                .zip(elements)
                .enumerate()
                .map(|(i, (item, element))| convert(item, element, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>>>()
                .map(Term::Tuple)
        }
        (SchemaNode::Map(key, val), Value::Object(fields)) => {
            let mut entries = BTreeMap::new();
            for (name, field) in fields {
                let field_path = format!("{path}.{name}");
                let k = convert(&Value::String(name.clone()), key, &field_path)?;
                let v = convert(field, val, &field_path)?;
                entries.insert(k, v);
            }
            Ok(Term::Map(entries))
        }
        (SchemaNode::Map(key, val), Value::Array(pairs)) => {
            let mut entries = BTreeMap::new();
            for (i, pair) in pairs.iter().enumerate() {
                let pair_path = format!("{path}[{i}]");
                let [k, v] = pair.as_array().map(Vec::as_slice).unwrap_or_default() else {
                    bail!("{pair_path}: map entry must be a [key, value] array");
                };
                let k = convert(k, key, &format!("{pair_path}[0]"))?;
                let v = convert(v, val, &format!("{pair_path}[1]"))?;
                entries.insert(k, v);
            }
            Ok(Term::Map(entries))
        }
        (schema, value) => bail!(
            "{path}: expected {}, found JSON {}",
            schema.kind(),
            json_kind(value)
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a term as JSON, the inverse of [`term_from_json`].
///
/// Maps whose keys are all strings or atoms become objects; other maps
/// become arrays of `[key, value]` pairs. Non-finite floats become `null`.
pub fn term_to_json(term: &Term) -> Value {
    match term {
        Term::Integer(value) => Value::from(*value),
        Term::Float(value) => Number::from_f64(*value).map_or(Value::Null, Value::Number),
        Term::String(text) => Value::String(text.clone()),
        Term::Atom(atom) => Value::String(atom.as_str().to_owned()),
        Term::Binary(binary) => Value::String(hex::encode(binary.as_bytes())),
        Term::List(items) | Term::Tuple(items) => items.iter().map(term_to_json).collect(),
        Term::Map(entries) => {
            if entries.keys().all(|key| key.as_str().is_some()) {
                let fields = entries
                    .iter()
                    .map(|(key, value)| {
                        (key.as_str().unwrap_or_default().to_owned(), term_to_json(value))
                    })
                    .collect();
                Value::Object(fields)
            } else {
                entries
                    .iter()
                    .map(|(key, value)| Value::Array(vec![term_to_json(key), term_to_json(value)]))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(text: &str) -> SchemaNode {
        text.parse().unwrap()
    }

    #[test]
    fn tuple_with_atom_list() {
        let term = term_from_json(&json!([42, ["ok", "error"]]), &schema("{integer, [atom]}"))
            .unwrap();
        assert_eq!(term.to_string(), "{42,[ok,error]}");
        assert_eq!(term_to_json(&term), json!([42, ["ok", "error"]]));
    }

    #[test]
    fn object_and_pair_forms_of_a_map() {
        let s = schema("#{atom => binary}");
        let from_object = term_from_json(&json!({"a": "00ff"}), &s).unwrap();
        let from_pairs = term_from_json(&json!([["a", "00ff"]]), &s).unwrap();
        assert_eq!(from_object, from_pairs);
        assert_eq!(from_object.to_string(), "#{a => <<0,255>>}");
        assert_eq!(term_to_json(&from_object), json!({"a": "00ff"}));
    }

    #[test]
    fn compound_keys_render_as_pairs() {
        let s = schema("#{{integer, integer} => string}");
        let term = term_from_json(&json!([[[1, 2], "x"]]), &s).unwrap();
        assert_eq!(term_to_json(&term), json!([[[1, 2], "x"]]));
    }

    #[test]
    fn errors_name_the_json_path() {
        let err = term_from_json(&json!([1, ["ok", 2]]), &schema("{integer, [atom]}"))
            .unwrap_err();
        assert_eq!(err.to_string(), "$[1][1]: expected atom, found JSON number");
    }

    #[test]
    fn tuple_length_is_checked() {
        let err = term_from_json(&json!([1]), &schema("{integer, float}")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "$: tuple {integer, float} needs 2 elements, found 1"
        );
    }

    #[test]
    fn fractional_number_is_not_an_integer() {
        assert!(term_from_json(&json!(1.5), &SchemaNode::Integer).is_err());
        assert_eq!(
            term_from_json(&json!(2), &SchemaNode::Float).unwrap(),
            Term::Float(2.0)
        );
    }
}
