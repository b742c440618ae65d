//! Example synthesis.
//!
//! Produces a placeholder [`Example`] for a type when no literal example is
//! authored. Values are fixed and deterministic, which golden-file tests
//! depend on:
//!
//! - boolean primitive: `true`; number: `0`; string: `""`
//! - enum: the *first* declared element's value
//! - list: a single-element array of the synthesized element
//! - union: the *first* member only (documented "pick one shape")
//!
//! The first-element-wins picks are a documented deterministic tie-break,
//! not a placeholder for smarter selection.

use std::collections::HashSet;

use crate::domain::error::ModelError;
use crate::domain::model::{Example, ExampleProperty, ScalarKind};
use crate::domain::profile::{AstNode, TypeNode};

use super::context::ResolveContext;

/// Synthesize a placeholder example for a type node.
///
/// Unlike the resolver there is no "no type" sentinel here: an example must
/// have a concrete shape, so undeterminable types are errors.
pub fn synthesize(node: &AstNode, ctx: &ResolveContext<'_>) -> Result<Example, ModelError> {
    let mut resolving = HashSet::new();
    synthesize_node(node, ctx, &mut resolving)
}

fn synthesize_node(
    node: &AstNode,
    ctx: &ResolveContext<'_>,
    resolving: &mut HashSet<String>,
) -> Result<Example, ModelError> {
    let AstNode::Known(known) = node else {
        return Err(ModelError::UnrecognizedNodeKind {
            kind: node.kind_name().to_string(),
        });
    };

    match known {
        TypeNode::PrimitiveTypeName { name } => Ok(match name {
            ScalarKind::Boolean => Example::boolean(true),
            ScalarKind::Number => Example::number(0.0),
            ScalarKind::String => Example::string(""),
        }),
        TypeNode::EnumDefinition { values } => {
            let first = values.first().ok_or_else(|| ModelError::UnrecognizedNodeKind {
                kind: "EnumDefinition".to_string(),
            })?;
            Ok(Example::from_scalar(&first.value))
        }
        TypeNode::ListDefinition { element_type } => {
            let element = synthesize_node(element_type, ctx, resolving)?;
            Ok(Example::Array {
                items: vec![element],
            })
        }
        TypeNode::UnionDefinition { types } => {
            let first = types.first().ok_or_else(|| ModelError::UnrecognizedNodeKind {
                kind: "UnionDefinition".to_string(),
            })?;
            synthesize_node(first, ctx, resolving)
        }
        TypeNode::ObjectDefinition { fields } => {
            let mut properties = Vec::with_capacity(fields.len());
            for field in fields {
                let type_node = field.type_node.as_ref().or_else(|| {
                    ctx.field(&field.field_name)
                        .and_then(|def| def.type_node.as_ref())
                });
                let Some(type_node) = type_node else {
                    return Err(ModelError::FieldTypeUndefined {
                        field_name: field.field_name.clone(),
                    });
                };
                properties.push(ExampleProperty {
                    name: field.field_name.clone(),
                    example: synthesize_node(type_node, ctx, resolving)?,
                });
            }
            Ok(Example::Object { properties })
        }
        TypeNode::ModelTypeName { name } => {
            if resolving.contains(name) {
                // An example tree cannot express a back-reference.
                return Err(ModelError::CyclicType { name: name.clone() });
            }
            let definition = ctx
                .model(name)
                .ok_or_else(|| ModelError::TypeNotFound { name: name.clone() })?;
            let underlying = definition
                .type_node
                .as_ref()
                .ok_or_else(|| ModelError::TypeNotFound { name: name.clone() })?;

            resolving.insert(name.clone());
            let example = synthesize_node(underlying, ctx, resolving)?;
            resolving.remove(name);
            Ok(example)
        }
        TypeNode::NonNullDefinition { inner } => synthesize_node(inner, ctx, resolving),
    }
}
