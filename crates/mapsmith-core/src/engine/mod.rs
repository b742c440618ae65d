//! Minimal domain-specific template engine.
//!
//! A template set is a mapping from fragment name to fragment text.
//! Fragments compose through partial references and a fixed helper
//! vocabulary (see [`parser`]); the engine compiles a set into one render
//! function per entry fragment.
//!
//! Properties the rest of the system depends on:
//!
//! - **Pure and synchronous.** Rendering does no I/O and never suspends.
//! - **Deterministic.** Identical set + entry + input yields byte-identical
//!   output, which snapshot-style tests rely on.
//! - **Strict.** Referencing an undefined (or null) value is a fatal
//!   [`TemplateError::UndefinedValue`], never a silent empty string.
//! - **No escaping.** Output is source code, not markup; text passes
//!   through untouched.
//!
//! Compiled templates are memoized per (set name, entry) pair. This is a
//! performance property only; a fresh compile of the same inputs yields an
//! equivalent renderer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

pub mod error;
mod parser;

pub use error::TemplateError;
use parser::{Arg, Node, Path, parse_fragment};

/// A named collection of template fragments. Fragment order is preserved
/// for diagnostics but has no semantic meaning.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    name: String,
    fragments: IndexMap<String, String>,
}

impl TemplateSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fragments: IndexMap::new(),
        }
    }

    /// Build a set from static fragment pairs (builtin sets).
    pub fn from_static(name: &str, fragments: &[(&str, &str)]) -> Self {
        let mut set = Self::new(name);
        for (fragment_name, text) in fragments {
            set.insert(*fragment_name, *text);
        }
        set
    }

    pub fn insert(&mut self, fragment_name: impl Into<String>, text: impl Into<String>) {
        self.fragments.insert(fragment_name.into(), text.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, fragment_name: &str) -> Option<&str> {
        self.fragments.get(fragment_name).map(String::as_str)
    }

    pub fn fragment_names(&self) -> impl Iterator<Item = &str> {
        self.fragments.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Compiles template sets and memoizes the result.
///
/// The cache key is (set name, entry); set names are expected to identify
/// their content, which holds for the builtin sets and for loader-provided
/// sets named after their manifest.
pub struct TemplateEngine {
    compiled: RefCell<HashMap<(String, String), Rc<CompiledTemplate>>>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self {
            compiled: RefCell::new(HashMap::new()),
        }
    }

    /// Compile `entry` (and everything it references) from `set`.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::UnknownFragment`] if the entry is missing or any
    ///   partial reference does not resolve within the set.
    /// - [`TemplateError::Parse`] if a fragment is malformed.
    pub fn compile(
        &self,
        set: &TemplateSet,
        entry: &str,
    ) -> Result<Rc<CompiledTemplate>, TemplateError> {
        let key = (set.name().to_string(), entry.to_string());
        if let Some(compiled) = self.compiled.borrow().get(&key) {
            return Ok(Rc::clone(compiled));
        }

        let compiled = Rc::new(CompiledTemplate::compile(set, entry)?);
        debug!(set = set.name(), entry, "compiled template");
        self.compiled.borrow_mut().insert(key, Rc::clone(&compiled));
        Ok(compiled)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully parsed template set, rendered from a fixed entry fragment.
#[derive(Debug)]
pub struct CompiledTemplate {
    entry: String,
    fragments: HashMap<String, Vec<Node>>,
}

impl CompiledTemplate {
    /// Parse every fragment of the set and validate partial references.
    /// Validation covers the whole set, not just what the entry reaches,
    /// so a broken fragment fails fast regardless of input shape.
    pub fn compile(set: &TemplateSet, entry: &str) -> Result<Self, TemplateError> {
        if set.get(entry).is_none() {
            return Err(TemplateError::UnknownFragment {
                name: entry.to_string(),
            });
        }

        let mut fragments = HashMap::new();
        for name in set.fragment_names() {
            let text = set.get(name).unwrap_or_default();
            fragments.insert(name.to_string(), parse_fragment(name, text)?);
        }

        for nodes in fragments.values() {
            check_partials(nodes, &fragments)?;
        }

        Ok(Self {
            entry: entry.to_string(),
            fragments,
        })
    }

    /// Render the entry fragment against `input`.
    pub fn render(&self, input: &Value) -> Result<String, TemplateError> {
        let mut out = String::new();
        let scope = Scope {
            value: input,
            repeat: None,
        };
        self.render_nodes(&self.fragments[&self.entry], &scope, &mut out)?;
        Ok(out)
    }

    fn render_nodes(
        &self,
        nodes: &[Node],
        scope: &Scope<'_>,
        out: &mut String,
    ) -> Result<(), TemplateError> {
        for node in nodes {
            self.render_node(node, scope, out)?;
        }
        Ok(())
    }

    fn render_node(
        &self,
        node: &Node,
        scope: &Scope<'_>,
        out: &mut String,
    ) -> Result<(), TemplateError> {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Interp(path) => {
                let value = lookup_strict(scope, path)?;
                out.push_str(&display_string(&value));
            }
            Node::Partial { name, context } => {
                // Compile-time validation guarantees presence.
                let fragment = self
                    .fragments
                    .get(name)
                    .ok_or_else(|| TemplateError::UnknownFragment { name: name.clone() })?;
                match context {
                    Some(path) => {
                        let value = lookup_strict(scope, path)?;
                        let child = Scope {
                            value: &value,
                            repeat: None,
                        };
                        self.render_nodes(fragment, &child, out)?;
                    }
                    None => self.render_nodes(fragment, scope, out)?,
                }
            }
            Node::TypeOf(path) => {
                let value = lookup_strict(scope, path)?;
                out.push_str(type_name(&value));
            }
            Node::Quote(path) => {
                let value = lookup_strict(scope, path)?;
                match value {
                    Value::String(s) => out.push_str(&quote_literal(&s)),
                    other => out.push_str(&display_string(&other)),
                }
            }
            Node::If {
                path,
                then,
                otherwise,
            } => {
                let branch = match lookup(scope, path)? {
                    Some(value) if is_truthy(&value) => then,
                    _ => otherwise,
                };
                self.render_nodes(branch, scope, out)?;
            }
            Node::Eq {
                left,
                right,
                then,
                otherwise,
            } => {
                let left = eval_arg(scope, left)?;
                let right = eval_arg(scope, right)?;
                let branch = if left == right { then } else { otherwise };
                self.render_nodes(branch, scope, out)?;
            }
            Node::Each { path, body } => {
                let value = lookup_strict(scope, path)?;
                let Value::Array(items) = value else {
                    return Err(TemplateError::NotIterable {
                        path: path.display(),
                    });
                };
                let len = items.len();
                for (index, item) in items.iter().enumerate() {
                    let child = Scope {
                        value: item,
                        repeat: Some(Repeat { index, len }),
                    };
                    self.render_nodes(body, &child, out)?;
                }
            }
            Node::Switch {
                subject,
                cases,
                default,
            } => {
                // Discriminant evaluated once; cases tested in authoring
                // order with loose equality, first match wins.
                let subject = loose_string(&eval_arg(scope, subject)?);
                let mut matched = false;
                for (case, body) in cases {
                    if loose_string(&eval_arg(scope, case)?) == subject {
                        self.render_nodes(body, scope, out)?;
                        matched = true;
                        break;
                    }
                }
                if !matched {
                    if let Some(body) = default {
                        self.render_nodes(body, scope, out)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_partials(
    nodes: &[Node],
    fragments: &HashMap<String, Vec<Node>>,
) -> Result<(), TemplateError> {
    for node in nodes {
        match node {
            Node::Partial { name, .. } => {
                if !fragments.contains_key(name) {
                    return Err(TemplateError::UnknownFragment { name: name.clone() });
                }
            }
            Node::If {
                then, otherwise, ..
            }
            | Node::Eq {
                then, otherwise, ..
            } => {
                check_partials(then, fragments)?;
                check_partials(otherwise, fragments)?;
            }
            Node::Each { body, .. } => check_partials(body, fragments)?,
            Node::Switch { cases, default, .. } => {
                for (_, body) in cases {
                    check_partials(body, fragments)?;
                }
                if let Some(body) = default {
                    check_partials(body, fragments)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

// ── Render context ──────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct Repeat {
    index: usize,
    len: usize,
}

struct Scope<'a> {
    value: &'a Value,
    repeat: Option<Repeat>,
}

/// Resolve a path against the scope. `Ok(None)` means undefined; it is the
/// caller's decision whether that is fatal (`if` tolerates it, everything
/// else does not).
fn lookup(scope: &Scope<'_>, path: &Path) -> Result<Option<Value>, TemplateError> {
    match path {
        Path::This => Ok(Some(scope.value.clone())),
        Path::LoopIndex => {
            let repeat = require_repeat(scope, "@index")?;
            Ok(Some(Value::from(repeat.index)))
        }
        Path::LoopFirst => {
            let repeat = require_repeat(scope, "@first")?;
            Ok(Some(Value::Bool(repeat.index == 0)))
        }
        Path::LoopLast => {
            let repeat = require_repeat(scope, "@last")?;
            Ok(Some(Value::Bool(repeat.index + 1 == repeat.len)))
        }
        Path::Segments(segments) => {
            let mut current = scope.value;
            for segment in segments {
                match current.get(segment) {
                    Some(next) => current = next,
                    None => return Ok(None),
                }
            }
            Ok(Some(current.clone()))
        }
    }
}

fn lookup_strict(scope: &Scope<'_>, path: &Path) -> Result<Value, TemplateError> {
    match lookup(scope, path)? {
        Some(Value::Null) | None => Err(TemplateError::UndefinedValue {
            path: path.display(),
        }),
        Some(value) => Ok(value),
    }
}

fn require_repeat(scope: &Scope<'_>, name: &str) -> Result<Repeat, TemplateError> {
    scope
        .repeat
        .ok_or_else(|| TemplateError::LoopVariableOutsideEach {
            name: name.to_string(),
        })
}

fn eval_arg(scope: &Scope<'_>, arg: &Arg) -> Result<Value, TemplateError> {
    match arg {
        Arg::Path(path) => lookup_strict(scope, path),
        Arg::String(s) => Ok(Value::String(s.clone())),
        Arg::Number(n) => Ok(serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .unwrap_or(Value::Null)),
        Arg::Bool(b) => Ok(Value::Bool(*b)),
    }
}

// ── Helper semantics ────────────────────────────────────────────────────────

/// Plain text form of a value for interpolation. Integral numbers print
/// without a fractional part (`0`, not `0.0`); composites print as compact
/// JSON.
fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::Null => "null".to_string(),
        composite => serde_json::to_string(composite).unwrap_or_default(),
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(f) = n.as_f64() {
        if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
            return format!("{}", f as i64);
        }
        return f.to_string();
    }
    n.to_string()
}

/// Canonical string form used for the switch/case loose comparison.
fn loose_string(value: &Value) -> String {
    display_string(value)
}

/// Runtime type name of a value, as the `typeof` helper reports it.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Null => "null",
    }
}

/// Source-literal quoting with the asymmetric rule generated documents
/// depend on: a string containing a single quote and no double quote is
/// wrapped in double quotes unescaped; every other string is wrapped in
/// single quotes with embedded single quotes escaped.
pub fn quote_literal(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        format!("\"{s}\"")
    } else {
        format!("'{}'", s.replace('\'', "\\'"))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render_one(text: &str, input: Value) -> Result<String, TemplateError> {
        let mut set = TemplateSet::new("test");
        set.insert("document", text);
        let compiled = CompiledTemplate::compile(&set, "document")?;
        compiled.render(&input)
    }

    #[test]
    fn interpolates_paths_and_numbers() {
        let out = render_one("{{a.b}} {{n}}", json!({ "a": { "b": "x" }, "n": 0.0 })).unwrap();
        assert_eq!(out, "x 0");
    }

    #[test]
    fn undefined_value_is_fatal() {
        let err = render_one("{{missing}}", json!({})).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UndefinedValue {
                path: "missing".into()
            }
        );
    }

    #[test]
    fn null_counts_as_undefined() {
        let err = render_one("{{x}}", json!({ "x": null })).unwrap_err();
        assert!(matches!(err, TemplateError::UndefinedValue { .. }));
    }

    #[test]
    fn partial_with_context_renders_nested_value() {
        let mut set = TemplateSet::new("test");
        set.insert("document", "{{> leaf outer.inner}}");
        set.insert("leaf", "[{{name}}]");
        let compiled = CompiledTemplate::compile(&set, "document").unwrap();
        let out = compiled
            .render(&json!({ "outer": { "inner": { "name": "x" } } }))
            .unwrap();
        assert_eq!(out, "[x]");
    }

    #[test]
    fn recursive_partial_walks_example_tree() {
        let mut set = TemplateSet::new("test");
        set.insert(
            "document",
            "{{> exampleValue root}}",
        );
        set.insert(
            "exampleValue",
            "{{#switch kind}}{{#case \"string\"}}{{quote value}}{{/case}}\
             {{#case \"array\"}}[{{#each items}}{{> exampleValue this}}\
             {{#if @last}}{{else}}, {{/if}}{{/each}}]{{/case}}{{/switch}}",
        );
        let compiled = CompiledTemplate::compile(&set, "document").unwrap();
        let input = json!({
            "root": {
                "kind": "array",
                "items": [
                    { "kind": "string", "value": "a" },
                    { "kind": "string", "value": "b" },
                ],
            },
        });
        assert_eq!(compiled.render(&input).unwrap(), "['a', 'b']");
    }

    #[test]
    fn output_is_never_html_escaped() {
        let out = render_one("{{s}}", json!({ "s": "a < b && c > \"d\"" })).unwrap();
        assert_eq!(out, "a < b && c > \"d\"");
    }

    #[test]
    fn partials_compose() {
        let mut set = TemplateSet::new("test");
        set.insert("document", "[{{> inner}}]");
        set.insert("inner", "{{name}}");
        let compiled = CompiledTemplate::compile(&set, "document").unwrap();
        assert_eq!(compiled.render(&json!({ "name": "x" })).unwrap(), "[x]");
    }

    #[test]
    fn unmatched_partial_fails_at_compile_time() {
        let mut set = TemplateSet::new("test");
        set.insert("document", "{{> nowhere}}");
        let err = CompiledTemplate::compile(&set, "document").unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownFragment {
                name: "nowhere".into()
            }
        );
    }

    #[test]
    fn missing_entry_fails_at_compile_time() {
        let set = TemplateSet::new("test");
        let err = CompiledTemplate::compile(&set, "document").unwrap_err();
        assert!(matches!(err, TemplateError::UnknownFragment { .. }));
    }

    #[test]
    fn eq_is_strict() {
        let input = json!({ "a": "1", "b": 1 });
        let out = render_one("{{#eq a b}}same{{else}}different{{/eq}}", input).unwrap();
        assert_eq!(out, "different");

        let out = render_one("{{#eq a \"1\"}}same{{else}}different{{/eq}}", json!({ "a": "1" }))
            .unwrap();
        assert_eq!(out, "same");
    }

    #[test]
    fn switch_matches_loosely_and_first_wins() {
        let template = r#"{{#switch n}}
            {{#case "1"}}one{{/case}}
            {{#case 1}}uno{{/case}}
            {{#default}}other{{/default}}
        {{/switch}}"#;
        // n is the number 1; the string case "1" still matches first.
        assert_eq!(render_one(template, json!({ "n": 1 })).unwrap(), "one");
        assert_eq!(render_one(template, json!({ "n": 2 })).unwrap(), "other");
    }

    #[test]
    fn switch_default_only_when_no_case_matched() {
        let template =
            r#"{{#switch kind}}{{#case "string"}}s{{/case}}{{#default}}d{{/default}}{{/switch}}"#;
        assert_eq!(
            render_one(template, json!({ "kind": "string" })).unwrap(),
            "s"
        );
        assert_eq!(
            render_one(template, json!({ "kind": "object" })).unwrap(),
            "d"
        );
    }

    #[test]
    fn each_exposes_loop_variables() {
        let template = "{{#each items}}{{this}}{{#if @last}}{{else}}, {{/if}}{{/each}}";
        let out = render_one(template, json!({ "items": ["a", "b", "c"] })).unwrap();
        assert_eq!(out, "a, b, c");
    }

    #[test]
    fn loop_variable_outside_each_is_an_error() {
        let err = render_one("{{@index}}", json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::LoopVariableOutsideEach { .. }));
    }

    #[test]
    fn typeof_reports_runtime_type() {
        assert_eq!(render_one("{{typeof x}}", json!({ "x": true })).unwrap(), "boolean");
        assert_eq!(render_one("{{typeof x}}", json!({ "x": [] })).unwrap(), "array");
        assert_eq!(render_one("{{typeof x}}", json!({ "x": {} })).unwrap(), "object");
    }

    #[test]
    fn quoting_rule_is_asymmetric() {
        // Single quote, no double quote: double-quote wrap, unescaped.
        assert_eq!(quote_literal("don't"), "\"don't\"");
        // Double quote present: single-quote wrap, unescaped.
        assert_eq!(quote_literal("she said \"hi\""), "'she said \"hi\"'");
        // Neither quote kind: default single-quote wrap.
        assert_eq!(quote_literal("plain"), "'plain'");
        // Both kinds: single-quote wrap with escaped single quotes.
        assert_eq!(quote_literal("a'b\"c"), "'a\\'b\"c'");
    }

    #[test]
    fn quote_helper_applies_rule_to_strings_only() {
        assert_eq!(
            render_one("{{quote s}}", json!({ "s": "don't" })).unwrap(),
            "\"don't\""
        );
        assert_eq!(render_one("{{quote n}}", json!({ "n": 3 })).unwrap(), "3");
    }

    #[test]
    fn engine_memoizes_compiled_templates() {
        let engine = TemplateEngine::new();
        let mut set = TemplateSet::new("test");
        set.insert("document", "x");
        let first = engine.compile(&set, "document").unwrap();
        let second = engine.compile(&set, "document").unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut set = TemplateSet::new("test");
        set.insert("document", "{{#each xs}}{{v}};{{/each}}");
        let compiled = CompiledTemplate::compile(&set, "document").unwrap();
        let input = json!({ "xs": [{ "v": 1 }, { "v": 2 }] });
        assert_eq!(
            compiled.render(&input).unwrap(),
            compiled.render(&input).unwrap()
        );
    }
}
