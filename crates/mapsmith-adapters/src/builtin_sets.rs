//! Built-in template sets.
//!
//! One set per [`DocumentKind`], authored directly in the engine's fragment
//! vocabulary. Every set exposes a `document` entry fragment; the literal
//! fragments (`exampleValue`, `objectLiteral`, `jsonValue`) recurse over
//! serialized example trees via context-shifted partials.
//!
//! These sets are data, not code: the loader in [`crate::set_loader`] can
//! replace any of them with a set read from disk, and the store treats both
//! sources identically.

use mapsmith_core::domain::DocumentKind;
use mapsmith_core::engine::TemplateSet;

/// Comlink literal for one example node. Switches on the serialized `kind`
/// discriminator; strings go through the quote helper.
const EXAMPLE_VALUE: &str = r#"{{#switch kind}}{{#case "boolean"}}{{value}}{{/case}}{{#case "number"}}{{value}}{{/case}}{{#case "string"}}{{quote value}}{{/case}}{{#case "array"}}[{{#each items}}{{> exampleValue this}}{{#if @last}}{{else}}, {{/if}}{{/each}}]{{/case}}{{#case "object"}}{{> objectLiteral}}{{/case}}{{/switch}}"#;

/// Comlink object literal, `{ a = 1, b = 'x' }`. Empty objects collapse
/// to `{}`.
const OBJECT_LITERAL: &str = r#"{{#if properties}}{ {{#each properties}}{{name}} = {{> exampleValue this}}{{#if @last}}{{else}}, {{/if}}{{/each}} }{{else}}{}{{/if}}"#;

/// JavaScript literal for one example node, used by the test set.
/// Identical shape to `exampleValue` except for `key: value` object syntax.
const JSON_VALUE: &str = r#"{{#switch kind}}{{#case "boolean"}}{{value}}{{/case}}{{#case "number"}}{{value}}{{/case}}{{#case "string"}}{{quote value}}{{/case}}{{#case "array"}}[{{#each items}}{{> jsonValue this}}{{#if @last}}{{else}}, {{/if}}{{/each}}]{{/case}}{{#case "object"}}{{#if properties}}{ {{#each properties}}{{name}}: {{> jsonValue this}}{{#if @last}}{{else}}, {{/if}}{{/each}} }{{else}}{}{{/if}}{{/case}}{{/switch}}"#;

const MAP_DOCUMENT: &str = r#"profile = "{{profile.id}}"
provider = "{{provider.name}}"
{{#each useCases}}
{{> useCase}}{{/each}}"#;

const MAP_USE_CASE: &str = r#""""
{{#if title}}{{title}}{{else}}{{name}}{{/if}}
"""
map {{name}} {
{{#if successExample.output}}  map result {{> exampleValue successExample.output}}
{{/if}}{{#if errorExample.output}}  map error {{> exampleValue errorExample.output}}
{{/if}}}
"#;

const MOCK_MAP_DOCUMENT: &str = r#"profile = "{{profile.id}}"
provider = "mock"
{{#each useCases}}
{{> useCase}}{{/each}}"#;

const MOCK_MAP_USE_CASE: &str = r#"map {{name}} {
{{#if successExample.output}}  map result {{> exampleValue successExample.output}}
{{/if}}}
"#;

const PREPARED_MAP_USE_CASE: &str = r#"map {{name}} {
  http GET "/" {
    response 200 "application/json" {
{{#if successExample.output}}      map result {{> exampleValue successExample.output}}
{{/if}}    }
{{#if errorExample.output}}    response 400 "application/json" {
      map error {{> exampleValue errorExample.output}}
    }
{{/if}}  }
}
"#;

const PREPARED_TEST_DOCUMENT: &str = r#"import { SuperfaceTest } from '@superfaceai/testing';

describe('{{profile.id}}/{{provider.name}}', () => {
  let superface: SuperfaceTest;

  beforeEach(() => {
    superface = new SuperfaceTest({
      profile: '{{profile.id}}',
      provider: '{{provider.name}}',
    });
  });
{{#each useCases}}
{{> testCase}}{{/each}}});
"#;

const PREPARED_TEST_CASE: &str = r#"  describe('{{name}}', () => {
    it('returns a result when given a valid input', async () => {
      await expect(
        superface.run({
          useCase: '{{name}}',
          input: {{#if successExample.input}}{{> jsonValue successExample.input}}{{else}}{}{{/if}},
        })
      ).resolves.toMatchSnapshot();
    });
  });
"#;

/// The built-in set for one document kind.
pub fn set_for(kind: DocumentKind) -> TemplateSet {
    match kind {
        DocumentKind::Map => TemplateSet::from_static(
            "builtin:map",
            &[
                ("document", MAP_DOCUMENT),
                ("useCase", MAP_USE_CASE),
                ("exampleValue", EXAMPLE_VALUE),
                ("objectLiteral", OBJECT_LITERAL),
            ],
        ),
        DocumentKind::MockMap => TemplateSet::from_static(
            "builtin:mock-map",
            &[
                ("document", MOCK_MAP_DOCUMENT),
                ("useCase", MOCK_MAP_USE_CASE),
                ("exampleValue", EXAMPLE_VALUE),
                ("objectLiteral", OBJECT_LITERAL),
            ],
        ),
        DocumentKind::PreparedMap => TemplateSet::from_static(
            "builtin:prepared-map",
            &[
                ("document", MAP_DOCUMENT),
                ("useCase", PREPARED_MAP_USE_CASE),
                ("exampleValue", EXAMPLE_VALUE),
                ("objectLiteral", OBJECT_LITERAL),
            ],
        ),
        DocumentKind::PreparedTest => TemplateSet::from_static(
            "builtin:prepared-test",
            &[
                ("document", PREPARED_TEST_DOCUMENT),
                ("testCase", PREPARED_TEST_CASE),
                ("jsonValue", JSON_VALUE),
            ],
        ),
    }
}

/// All built-in sets, in [`DocumentKind::ALL`] order.
pub fn all_sets() -> Vec<(DocumentKind, TemplateSet)> {
    DocumentKind::ALL
        .into_iter()
        .map(|kind| (kind, set_for(kind)))
        .collect()
}
