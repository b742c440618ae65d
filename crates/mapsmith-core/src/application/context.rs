//! Per-call named-type lookup context.
//!
//! Built fresh at the start of every resolution or synthesis entry point
//! from the profile's flat definition list and passed by reference. Never
//! module or global state, so repeated and concurrent invocations need no
//! coordination.

use std::collections::HashMap;

use crate::domain::profile::{
    Definition, KnownDefinition, NamedFieldDefinition, NamedModelDefinition,
};

/// Name-addressable views over a profile's named definitions.
///
/// Names are unique within a profile; a lookup miss is a defect in the
/// upstream AST (surfaced by the caller as `TypeNotFound`), never a
/// silent fallback.
pub struct ResolveContext<'a> {
    models: HashMap<&'a str, &'a NamedModelDefinition>,
    fields: HashMap<&'a str, &'a NamedFieldDefinition>,
}

impl<'a> ResolveContext<'a> {
    /// Index the named definitions of a profile's definition list.
    pub fn from_definitions(definitions: &'a [Definition]) -> Self {
        let mut models = HashMap::new();
        let mut fields = HashMap::new();
        for definition in definitions {
            match definition {
                Definition::Known(KnownDefinition::NamedModelDefinition(def)) => {
                    models.insert(def.model_name.as_str(), def);
                }
                Definition::Known(KnownDefinition::NamedFieldDefinition(def)) => {
                    fields.insert(def.field_name.as_str(), def);
                }
                _ => {}
            }
        }
        Self { models, fields }
    }

    pub fn model(&self, name: &str) -> Option<&'a NamedModelDefinition> {
        self.models.get(name).copied()
    }

    pub fn field(&self, name: &str) -> Option<&'a NamedFieldDefinition> {
        self.fields.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::ProfileAst;

    #[test]
    fn indexes_named_definitions_and_skips_the_rest() {
        let profile: ProfileAst = serde_json::from_str(
            r#"{
                "header": { "name": "p", "version": { "major": 1, "minor": 0 } },
                "definitions": [
                    { "kind": "NamedModelDefinition", "modelName": "User" },
                    { "kind": "NamedFieldDefinition", "fieldName": "id" },
                    { "kind": "UseCaseDefinition", "useCaseName": "GetUser" },
                    { "kind": "SomethingNew" }
                ]
            }"#,
        )
        .unwrap();

        let ctx = ResolveContext::from_definitions(&profile.definitions);
        assert!(ctx.model("User").is_some());
        assert!(ctx.field("id").is_some());
        assert!(ctx.model("Missing").is_none());
        assert!(ctx.field("User").is_none());
    }
}
