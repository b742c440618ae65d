//! Type-model resolution.
//!
//! Walks profile AST type nodes into [`Model`] trees, resolving named-type
//! indirection through the per-call [`ResolveContext`].
//!
//! ## Shape rules
//!
//! | AST node              | Model                                        |
//! |-----------------------|----------------------------------------------|
//! | `ObjectDefinition`    | `Object`, field types inline-or-named        |
//! | `PrimitiveTypeName`   | `Scalar`, `non_null` from the hint           |
//! | `ListDefinition`      | `List`, element always resolved nullable     |
//! | `EnumDefinition`      | `Enum` with every declared element           |
//! | `ModelTypeName`       | resolved underlying type, hint forwarded     |
//! | `NonNullDefinition`   | inner type with `non_null` forced true       |
//! | `UnionDefinition`     | `Union`, members resolved nullable           |
//! | anything else / none  | `None` (the "no type" sentinel, not an error)|
//!
//! A named model that (transitively) references itself resolves to a
//! [`ModelKind::Recursive`] marker instead of recursing forever: the set of
//! names currently being resolved is threaded through the walk.

use std::collections::HashSet;

use crate::domain::error::ModelError;
use crate::domain::model::{EnumElement, Field, Model, ModelKind};
use crate::domain::profile::{AstNode, FieldNode, TypeNode};

use super::context::ResolveContext;

/// Resolve a type node into a renderable model.
///
/// `Ok(None)` means the node carried no determinable type; every error is
/// fatal for the surrounding generation call.
pub fn resolve(
    node: Option<&AstNode>,
    non_null: bool,
    ctx: &ResolveContext<'_>,
) -> Result<Option<Model>, ModelError> {
    let mut resolving = HashSet::new();
    resolve_node(node, non_null, ctx, &mut resolving)
}

fn resolve_node(
    node: Option<&AstNode>,
    non_null: bool,
    ctx: &ResolveContext<'_>,
    resolving: &mut HashSet<String>,
) -> Result<Option<Model>, ModelError> {
    let Some(node) = node else {
        return Ok(None);
    };
    let AstNode::Known(node) = node else {
        return Ok(None);
    };

    let model = match node {
        TypeNode::ObjectDefinition { fields } => {
            let fields = fields
                .iter()
                .map(|field| resolve_field(field, ctx, resolving))
                .collect::<Result<Vec<_>, _>>()?;
            Some(Model::new(ModelKind::Object { fields }, non_null))
        }
        TypeNode::PrimitiveTypeName { name } => Some(Model::new(
            ModelKind::Scalar {
                scalar_type: *name,
                value: None,
            },
            non_null,
        )),
        TypeNode::ListDefinition { element_type } => {
            let element = resolve_node(Some(element_type), false, ctx, resolving)?;
            Some(Model::new(
                ModelKind::List {
                    model: element.map(Box::new),
                },
                non_null,
            ))
        }
        TypeNode::EnumDefinition { values } => {
            let enum_elements = values
                .iter()
                .map(|value| EnumElement {
                    title: value.title.clone(),
                    value: value.value.clone(),
                })
                .collect();
            Some(Model::new(ModelKind::Enum { enum_elements }, non_null))
        }
        TypeNode::ModelTypeName { name } => {
            if resolving.contains(name) {
                return Ok(Some(Model::new(
                    ModelKind::Recursive { name: name.clone() },
                    non_null,
                )));
            }
            let definition = ctx
                .model(name)
                .ok_or_else(|| ModelError::TypeNotFound { name: name.clone() })?;

            resolving.insert(name.clone());
            let resolved =
                resolve_node(definition.type_node.as_ref(), non_null, ctx, resolving)?;
            resolving.remove(name);

            resolved.map(|model| {
                model.named(
                    Some(definition.model_name.clone()),
                    definition.description.clone(),
                )
            })
        }
        TypeNode::NonNullDefinition { inner } => resolve_node(Some(inner), true, ctx, resolving)?,
        TypeNode::UnionDefinition { types } => {
            let mut members = Vec::with_capacity(types.len());
            for member in types {
                if let Some(model) = resolve_node(Some(member), false, ctx, resolving)? {
                    members.push(model);
                }
            }
            Some(Model::new(ModelKind::Union { types: members }, non_null))
        }
    };

    Ok(model)
}

fn resolve_field(
    field: &FieldNode,
    ctx: &ResolveContext<'_>,
    resolving: &mut HashSet<String>,
) -> Result<Field, ModelError> {
    let named = ctx.field(&field.field_name);

    // Inline type wins; the named field definition is the fallback.
    let type_node = field
        .type_node
        .as_ref()
        .or_else(|| named.and_then(|def| def.type_node.as_ref()));
    let Some(type_node) = type_node else {
        return Err(ModelError::FieldTypeUndefined {
            field_name: field.field_name.clone(),
        });
    };

    let description = field
        .description
        .clone()
        .or_else(|| named.and_then(|def| def.description.clone()));

    Ok(Field {
        field_name: field.field_name.clone(),
        required: field.required,
        description,
        model: resolve_node(Some(type_node), false, ctx, resolving)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ScalarKind;
    use crate::domain::profile::{Definition, ProfileAst};

    fn profile(definitions_json: &str) -> ProfileAst {
        serde_json::from_str(&format!(
            r#"{{
                "header": {{ "name": "p", "version": {{ "major": 1, "minor": 0 }} }},
                "definitions": {definitions_json}
            }}"#
        ))
        .unwrap()
    }

    fn node(json: &str) -> AstNode {
        serde_json::from_str(json).unwrap()
    }

    fn empty_ctx() -> Vec<Definition> {
        Vec::new()
    }

    #[test]
    fn resolves_primitive_with_non_null_hint() {
        let defs = empty_ctx();
        let ctx = ResolveContext::from_definitions(&defs);
        let n = node(r#"{ "kind": "PrimitiveTypeName", "name": "string" }"#);

        let model = resolve(Some(&n), true, &ctx).unwrap().unwrap();
        assert!(model.non_null);
        assert!(matches!(
            model.kind,
            ModelKind::Scalar {
                scalar_type: ScalarKind::String,
                value: None
            }
        ));

        let model = resolve(Some(&n), false, &ctx).unwrap().unwrap();
        assert!(!model.non_null);
    }

    #[test]
    fn absent_node_is_the_no_type_sentinel() {
        let defs = empty_ctx();
        let ctx = ResolveContext::from_definitions(&defs);
        assert_eq!(resolve(None, false, &ctx).unwrap(), None);
    }

    #[test]
    fn unrecognized_kind_is_the_no_type_sentinel() {
        let defs = empty_ctx();
        let ctx = ResolveContext::from_definitions(&defs);
        let n = node(r#"{ "kind": "HologramDefinition" }"#);
        assert_eq!(resolve(Some(&n), false, &ctx).unwrap(), None);
    }

    #[test]
    fn non_null_wrapping_forces_the_flag() {
        let defs = empty_ctx();
        let ctx = ResolveContext::from_definitions(&defs);
        let n = node(
            r#"{ "kind": "NonNullDefinition",
                 "type": { "kind": "PrimitiveTypeName", "name": "number" } }"#,
        );
        let model = resolve(Some(&n), false, &ctx).unwrap().unwrap();
        assert!(model.non_null);
    }

    #[test]
    fn list_element_is_always_resolved_nullable() {
        let defs = empty_ctx();
        let ctx = ResolveContext::from_definitions(&defs);
        let n = node(
            r#"{ "kind": "ListDefinition",
                 "elementType": { "kind": "NonNullDefinition",
                   "type": { "kind": "PrimitiveTypeName", "name": "string" } } }"#,
        );
        // The NonNull wrapper still applies to the element itself; the flag
        // the *list* passes down is false.
        let model = resolve(Some(&n), true, &ctx).unwrap().unwrap();
        assert!(model.non_null);
        let ModelKind::List { model: Some(element) } = model.kind else {
            panic!("expected list with element");
        };
        assert!(element.non_null);
    }

    #[test]
    fn object_fields_keep_authoring_order_and_fall_back_to_named_fields() {
        let p = profile(
            r#"[
                { "kind": "NamedFieldDefinition", "fieldName": "name",
                  "description": "display name",
                  "type": { "kind": "PrimitiveTypeName", "name": "string" } }
            ]"#,
        );
        let ctx = ResolveContext::from_definitions(&p.definitions);
        let n = node(
            r#"{ "kind": "ObjectDefinition", "fields": [
                { "fieldName": "id", "required": true,
                  "type": { "kind": "PrimitiveTypeName", "name": "number" } },
                { "fieldName": "name" }
            ] }"#,
        );
        let model = resolve(Some(&n), false, &ctx).unwrap().unwrap();
        let ModelKind::Object { fields } = model.kind else {
            panic!("expected object");
        };
        assert_eq!(fields[0].field_name, "id");
        assert!(fields[0].required);
        assert_eq!(fields[1].field_name, "name");
        assert_eq!(fields[1].description.as_deref(), Some("display name"));
        assert!(matches!(
            fields[1].model.as_ref().unwrap().kind,
            ModelKind::Scalar { .. }
        ));
    }

    #[test]
    fn field_without_any_type_source_is_an_error() {
        let defs = empty_ctx();
        let ctx = ResolveContext::from_definitions(&defs);
        let n = node(r#"{ "kind": "ObjectDefinition", "fields": [{ "fieldName": "ghost" }] }"#);
        let err = resolve(Some(&n), false, &ctx).unwrap_err();
        assert_eq!(
            err,
            ModelError::FieldTypeUndefined {
                field_name: "ghost".into()
            }
        );
    }

    #[test]
    fn enum_keeps_every_declared_element() {
        let defs = empty_ctx();
        let ctx = ResolveContext::from_definitions(&defs);
        let n = node(
            r#"{ "kind": "EnumDefinition", "values": [
                { "value": "A" }, { "value": "B" }, { "value": 3 }
            ] }"#,
        );
        let model = resolve(Some(&n), false, &ctx).unwrap().unwrap();
        let ModelKind::Enum { enum_elements } = model.kind else {
            panic!("expected enum");
        };
        assert_eq!(enum_elements.len(), 3);
    }

    #[test]
    fn union_members_are_resolved_nullable() {
        let defs = empty_ctx();
        let ctx = ResolveContext::from_definitions(&defs);
        let n = node(
            r#"{ "kind": "UnionDefinition", "types": [
                { "kind": "NonNullDefinition",
                  "type": { "kind": "PrimitiveTypeName", "name": "string" } },
                { "kind": "PrimitiveTypeName", "name": "number" }
            ] }"#,
        );
        let model = resolve(Some(&n), false, &ctx).unwrap().unwrap();
        let ModelKind::Union { types } = model.kind else {
            panic!("expected union");
        };
        assert_eq!(types.len(), 2);
        assert!(types[0].non_null);
        assert!(!types[1].non_null);
    }

    #[test]
    fn named_reference_forwards_the_hint_and_carries_the_name() {
        let p = profile(
            r#"[
                { "kind": "NamedModelDefinition", "modelName": "Id",
                  "description": "opaque id",
                  "type": { "kind": "PrimitiveTypeName", "name": "string" } }
            ]"#,
        );
        let ctx = ResolveContext::from_definitions(&p.definitions);
        let n = node(r#"{ "kind": "ModelTypeName", "name": "Id" }"#);
        let model = resolve(Some(&n), true, &ctx).unwrap().unwrap();
        assert!(model.non_null);
        assert_eq!(model.name.as_deref(), Some("Id"));
        assert_eq!(model.description.as_deref(), Some("opaque id"));
    }

    #[test]
    fn missing_named_reference_is_fatal() {
        let defs = empty_ctx();
        let ctx = ResolveContext::from_definitions(&defs);
        let n = node(r#"{ "kind": "ModelTypeName", "name": "NoSuch" }"#);
        let err = resolve(Some(&n), false, &ctx).unwrap_err();
        assert_eq!(err, ModelError::TypeNotFound { name: "NoSuch".into() });
    }

    #[test]
    fn self_referential_type_resolves_to_a_recursive_marker() {
        let p = profile(
            r#"[
                { "kind": "NamedModelDefinition", "modelName": "Tree",
                  "type": { "kind": "ObjectDefinition", "fields": [
                    { "fieldName": "value",
                      "type": { "kind": "PrimitiveTypeName", "name": "number" } },
                    { "fieldName": "children",
                      "type": { "kind": "ListDefinition",
                        "elementType": { "kind": "ModelTypeName", "name": "Tree" } } }
                  ] } }
            ]"#,
        );
        let ctx = ResolveContext::from_definitions(&p.definitions);
        let n = node(r#"{ "kind": "ModelTypeName", "name": "Tree" }"#);

        let model = resolve(Some(&n), false, &ctx).unwrap().unwrap();
        let ModelKind::Object { fields } = &model.kind else {
            panic!("expected object");
        };
        let ModelKind::List { model: Some(element) } = &fields[1].model.as_ref().unwrap().kind
        else {
            panic!("expected list");
        };
        assert_eq!(
            element.kind,
            ModelKind::Recursive { name: "Tree".into() }
        );
    }

    #[test]
    fn structural_shape_mirrors_ast_nesting() {
        let defs = empty_ctx();
        let ctx = ResolveContext::from_definitions(&defs);
        let n = node(
            r#"{ "kind": "ListDefinition", "elementType":
                 { "kind": "ListDefinition", "elementType":
                   { "kind": "PrimitiveTypeName", "name": "boolean" } } }"#,
        );
        let model = resolve(Some(&n), false, &ctx).unwrap().unwrap();
        let ModelKind::List { model: Some(inner) } = model.kind else {
            panic!("depth 1");
        };
        let ModelKind::List { model: Some(leaf) } = inner.kind else {
            panic!("depth 2");
        };
        assert!(matches!(leaf.kind, ModelKind::Scalar { .. }));
    }
}
