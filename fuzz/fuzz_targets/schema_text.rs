#![no_main]

use eterm_types::SchemaNode;
use libfuzzer_sys::fuzz_target;

// Fuzz target: schema text parser.
//
// Any schema that parses must print back to text that parses to the
// same schema.
fuzz_target!(|text: &str| {
    let Ok(schema) = text.parse::<SchemaNode>() else {
        return;
    };
    let printed = schema.to_string();
    let reparsed: SchemaNode = printed.parse().expect("printed schema must parse");
    assert_eq!(reparsed, schema);
});
