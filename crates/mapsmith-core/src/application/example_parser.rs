//! Literal example classification.
//!
//! When a use case carries hand-authored example data it arrives as an
//! arbitrary JSON value; this module classifies it into a tagged
//! [`Example`] tree. Classification is structural: arrays first, then
//! objects, else primitives. Object properties keep their authored
//! iteration order (`serde_json` is built with `preserve_order`).

use serde_json::Value;

use crate::domain::model::{Example, ExampleProperty};

/// Classify an authored literal value, if there is one.
///
/// Absent input and JSON null both pass through as `None`: no example is
/// constructed, the slot stays empty. Nested nulls are dropped; they carry
/// no renderable value. A scalar kind outside boolean/number/string cannot
/// occur in JSON, so no further error surface exists here.
pub fn parse(value: Option<&Value>) -> Option<Example> {
    let value = value?;
    classify(value)
}

fn classify(value: &Value) -> Option<Example> {
    match value {
        Value::Null => None,
        Value::Array(items) => Some(Example::Array {
            items: items.iter().filter_map(classify).collect(),
        }),
        Value::Object(entries) => Some(Example::Object {
            properties: entries
                .iter()
                .filter_map(|(name, value)| {
                    classify(value).map(|example| ExampleProperty {
                        name: name.clone(),
                        example,
                    })
                })
                .collect(),
        }),
        Value::Bool(b) => Some(Example::boolean(*b)),
        Value::Number(n) => Some(Example::number(n.as_f64().unwrap_or_default())),
        Value::String(s) => Some(Example::string(s.clone())),
    }
}
