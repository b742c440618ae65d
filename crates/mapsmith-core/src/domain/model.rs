//! Resolved type models and example trees.
//!
//! This module defines the renderable representation of a profile type.
//! Templates never see the profile AST directly; they see a flat [`Model`]
//! tree produced by the resolver, plus [`Example`] trees that seed the
//! generated source with sample values.
//!
//! ## Shape overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  UseCaseDetail (one per profile use case)            │
//! │  ├── input / result / error : Option<Model>          │
//! │  └── success / error example : Option<UseCaseExample>│
//! │                                                      │
//! │  Model                                               │
//! │  ├── kind: ModelKind   (tagged by `modelType`)       │
//! │  ├── non_null: bool                                  │
//! │  └── name / description (from named definitions)     │
//! │                                                      │
//! │  Example (tagged by `kind`)                          │
//! │  └── boolean | number | string | array | object      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization contract
//!
//! Template fragments switch on the serialized discriminators, so the
//! serde layout here is part of the public contract: `ModelKind` is
//! internally tagged as `modelType`, `Example` as `kind`, field names are
//! camelCase, and absent optionals are omitted (templates treat a missing
//! key as falsy in `{{#if}}` blocks).
//!
//! "No type at all" is represented as `Option<Model>` = `None` at every
//! use site, never as a dedicated variant.

use serde::{Deserialize, Serialize};

/// Primitive scalar kinds a profile can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Boolean,
    Number,
    String,
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
        }
    }
}

/// A literal scalar value, classified by its runtime type.
///
/// Untagged: serializes as the bare JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl ScalarValue {
    /// The [`ScalarKind`] matching this value's runtime type.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Boolean,
            Self::Number(_) => ScalarKind::Number,
            Self::String(_) => ScalarKind::String,
        }
    }
}

/// A resolved, renderable profile type.
///
/// Invariant: `kind` mirrors the AST's structural nesting exactly (object
/// fields, list depth, union arity, enum element count), and `non_null`
/// mirrors the AST's `NonNullDefinition` wrapping exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(flatten)]
    pub kind: ModelKind,

    pub non_null: bool,

    /// Name of the named model definition this was resolved through, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Model {
    /// Anonymous model with the given kind and nullability.
    pub fn new(kind: ModelKind, non_null: bool) -> Self {
        Self {
            kind,
            non_null,
            name: None,
            description: None,
        }
    }

    /// Fill `name`/`description` from a named definition, keeping values
    /// already set by an inner resolution step.
    pub fn named(mut self, name: Option<String>, description: Option<String>) -> Self {
        if self.name.is_none() {
            self.name = name;
        }
        if self.description.is_none() {
            self.description = description;
        }
        self
    }
}

/// The discriminated shape of a [`Model`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modelType", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ModelKind {
    Scalar {
        scalar_type: ScalarKind,
        /// Observed literal value, present only for instance-derived models
        /// (curl body classification).
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<ScalarValue>,
    },
    Object {
        fields: Vec<Field>,
    },
    List {
        /// `None` when the element type could not be determined (e.g. an
        /// empty array observed during body classification).
        #[serde(skip_serializing_if = "Option::is_none")]
        model: Option<Box<Model>>,
    },
    Enum {
        enum_elements: Vec<EnumElement>,
    },
    Union {
        types: Vec<Model>,
    },
    /// Back-reference to a named model currently being resolved. Substituted
    /// where the source AST is self-referential so resolution terminates.
    Recursive {
        name: String,
    },
}

/// One field of an object model. Authoring order is significant; output
/// ordering mirrors it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub field_name: String,

    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `None` when the field's type node resolved to the "no type" sentinel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Model>,
}

/// One declared element of an enum model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub value: ScalarValue,
}

/// A concrete or synthesized instance of a type.
///
/// Either parsed from authored example data or synthesized from the type
/// itself with fixed placeholder values (synthesis is deterministic, which
/// golden-file tests rely on).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Example {
    Boolean { value: bool },
    Number { value: f64 },
    String { value: String },
    Array { items: Vec<Example> },
    Object { properties: Vec<ExampleProperty> },
}

impl Example {
    pub fn boolean(value: bool) -> Self {
        Self::Boolean { value }
    }

    pub fn number(value: f64) -> Self {
        Self::Number { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            value: value.into(),
        }
    }

    pub fn from_scalar(value: &ScalarValue) -> Self {
        match value {
            ScalarValue::Bool(b) => Self::boolean(*b),
            ScalarValue::Number(n) => Self::number(*n),
            ScalarValue::String(s) => Self::string(s.clone()),
        }
    }
}

/// A named property inside an object example. The example itself is
/// flattened so the serialized form reads `{ name, kind, ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleProperty {
    pub name: String,
    #[serde(flatten)]
    pub example: Example,
}

/// Paired input/output instance for one use-case example slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseExample {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Example>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Example>,
}

/// Everything the templates need to render one use case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseDetail {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Model>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Model>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Model>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_example: Option<UseCaseExample>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_example: Option<UseCaseExample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_serializes_with_model_type_tag() {
        let model = Model::new(
            ModelKind::Scalar {
                scalar_type: ScalarKind::String,
                value: None,
            },
            true,
        );
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["modelType"], "scalar");
        assert_eq!(json["scalarType"], "string");
        assert_eq!(json["nonNull"], true);
        assert!(json.get("name").is_none());
    }

    #[test]
    fn example_serializes_with_kind_tag() {
        let example = Example::Object {
            properties: vec![ExampleProperty {
                name: "id".into(),
                example: Example::number(0.0),
            }],
        };
        let json = serde_json::to_value(&example).unwrap();
        assert_eq!(json["kind"], "object");
        assert_eq!(json["properties"][0]["name"], "id");
        assert_eq!(json["properties"][0]["kind"], "number");
    }

    #[test]
    fn scalar_value_reports_runtime_kind() {
        assert_eq!(ScalarValue::Bool(true).kind(), ScalarKind::Boolean);
        assert_eq!(ScalarValue::Number(1.5).kind(), ScalarKind::Number);
        assert_eq!(ScalarValue::String("x".into()).kind(), ScalarKind::String);
    }
}
