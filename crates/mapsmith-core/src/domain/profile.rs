//! Profile AST boundary types.
//!
//! The profile parser is an external collaborator; its output reaches this
//! crate as a JSON document. These types are the deserialization boundary,
//! nothing more: no resolution logic lives here.
//!
//! Unknown node kinds must survive deserialization (the resolver maps them
//! to the "no type" sentinel, the synthesizer reports them), so every node
//! position uses [`AstNode`], an untagged wrapper that falls back to
//! [`UnrecognizedNode`] when the `kind` tag is not a known variant.

use serde::Deserialize;

use super::model::{ScalarKind, ScalarValue};

/// A parsed profile document: header plus a flat list of top-level
/// definitions. Names of named definitions are unique within a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileAst {
    pub header: ProfileHeader,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl ProfileAst {
    /// Canonical profile identifier, `scope/name@major.minor`.
    pub fn profile_id(&self) -> String {
        let version = format!(
            "{}.{}",
            self.header.version.major, self.header.version.minor
        );
        match &self.header.scope {
            Some(scope) => format!("{}/{}@{}", scope, self.header.name, version),
            None => format!("{}@{}", self.header.name, version),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileHeader {
    pub name: String,
    #[serde(default)]
    pub scope: Option<String>,
    pub version: ProfileVersion,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProfileVersion {
    pub major: u64,
    pub minor: u64,
}

/// A top-level profile definition. Unknown kinds are preserved so a newer
/// parser does not break generation of the parts we do understand.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Definition {
    Known(KnownDefinition),
    Unrecognized(UnrecognizedNode),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum KnownDefinition {
    NamedModelDefinition(NamedModelDefinition),
    NamedFieldDefinition(NamedFieldDefinition),
    UseCaseDefinition(UseCaseDefinition),
}

/// A reusable, name-addressable type declared once and referenced by
/// `ModelTypeName` nodes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedModelDefinition {
    pub model_name: String,
    #[serde(rename = "type", default)]
    pub type_node: Option<AstNode>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A reusable field declaration; object fields without an inline type fall
/// back to the named field definition with the same name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedFieldDefinition {
    pub field_name: String,
    #[serde(rename = "type", default)]
    pub type_node: Option<AstNode>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One named operation with typed input, result and error slots plus
/// optionally authored literal examples.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseDefinition {
    pub use_case_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input: Option<AstNode>,
    #[serde(default)]
    pub result: Option<AstNode>,
    #[serde(default)]
    pub error: Option<AstNode>,
    #[serde(default)]
    pub examples: Vec<UseCaseExampleNode>,
}

/// An authored literal example. A node with `result` seeds the success
/// example, a node with `error` seeds the error example; values are raw
/// JSON classified later by the example parser.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseExampleNode {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub input: Option<serde_json::Value>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Any type node position: a known variant or a preserved unknown.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AstNode {
    Known(TypeNode),
    Unrecognized(UnrecognizedNode),
}

impl AstNode {
    /// The node's `kind` string for diagnostics; `undefined` when the node
    /// carried none.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Known(node) => node.kind_name(),
            Self::Unrecognized(node) => node.kind.as_deref().unwrap_or("undefined"),
        }
    }
}

/// The known profile type node kinds, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeNode {
    ObjectDefinition {
        #[serde(default)]
        fields: Vec<FieldNode>,
    },
    PrimitiveTypeName {
        name: ScalarKind,
    },
    ListDefinition {
        #[serde(rename = "elementType")]
        element_type: Box<AstNode>,
    },
    EnumDefinition {
        #[serde(default)]
        values: Vec<EnumValueNode>,
    },
    ModelTypeName {
        name: String,
    },
    NonNullDefinition {
        #[serde(rename = "type")]
        inner: Box<AstNode>,
    },
    UnionDefinition {
        #[serde(default)]
        types: Vec<AstNode>,
    },
}

impl TypeNode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::ObjectDefinition { .. } => "ObjectDefinition",
            Self::PrimitiveTypeName { .. } => "PrimitiveTypeName",
            Self::ListDefinition { .. } => "ListDefinition",
            Self::EnumDefinition { .. } => "EnumDefinition",
            Self::ModelTypeName { .. } => "ModelTypeName",
            Self::NonNullDefinition { .. } => "NonNullDefinition",
            Self::UnionDefinition { .. } => "UnionDefinition",
        }
    }
}

/// A field inside an `ObjectDefinition`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldNode {
    pub field_name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type", default)]
    pub type_node: Option<AstNode>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One declared value of an `EnumDefinition`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueNode {
    #[serde(default)]
    pub title: Option<String>,
    pub value: ScalarValue,
}

/// A node whose `kind` is not one of the known variants.
#[derive(Debug, Clone, Deserialize)]
pub struct UnrecognizedNode {
    #[serde(default)]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_known_type_node() {
        let json = r#"{ "kind": "PrimitiveTypeName", "name": "string" }"#;
        let node: AstNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind_name(), "PrimitiveTypeName");
    }

    #[test]
    fn unknown_kind_is_preserved_not_rejected() {
        let json = r#"{ "kind": "FancyNewNode", "payload": 1 }"#;
        let node: AstNode = serde_json::from_str(json).unwrap();
        assert!(matches!(node, AstNode::Unrecognized(_)));
        assert_eq!(node.kind_name(), "FancyNewNode");
    }

    #[test]
    fn node_without_kind_reports_undefined() {
        let json = "{}";
        let node: AstNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind_name(), "undefined");
    }

    #[test]
    fn profile_id_includes_scope_and_version() {
        let profile = ProfileAst {
            header: ProfileHeader {
                name: "character-information".into(),
                scope: Some("starwars".into()),
                version: ProfileVersion { major: 1, minor: 0 },
            },
            definitions: vec![],
        };
        assert_eq!(profile.profile_id(), "starwars/character-information@1.0");
    }

    #[test]
    fn profile_id_without_scope() {
        let profile = ProfileAst {
            header: ProfileHeader {
                name: "ping".into(),
                scope: None,
                version: ProfileVersion { major: 2, minor: 3 },
            },
            definitions: vec![],
        };
        assert_eq!(profile.profile_id(), "ping@2.3");
    }
}
