//! curl request resolution.
//!
//! The curl tokenizer is an external collaborator; it hands over a parsed
//! method/URL/query/headers/body tuple. This module maps that tuple
//! against a provider's declared services into the endpoint-relative shape
//! maps expect, and guesses a body schema from the single observed
//! instance.

use indexmap::IndexMap;
use serde_json::Value;

use crate::domain::error::ModelError;
use crate::domain::model::{Field, Model, ModelKind, ScalarKind, ScalarValue};
use crate::domain::provider::ProviderDefinition;

/// A tokenized curl invocation. All fields are as authored; nothing has
/// been validated against a provider yet.
#[derive(Debug, Clone, Default)]
pub struct ParsedCurl {
    pub method: Option<String>,
    pub url: Option<String>,
    pub query: IndexMap<String, Value>,
    pub headers: IndexMap<String, String>,
    pub body: Option<Value>,
}

/// The provider-relative request shape a map template consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub method: Option<String>,
    /// Endpoint path relative to the matched service base URL, always
    /// ending with `/`.
    pub url: Option<String>,
    /// `None` when the parsed query was absent or empty; never an empty map.
    pub query: Option<IndexMap<String, String>>,
    pub headers: Option<IndexMap<String, String>>,
    /// Schema guessed from the single observed body instance.
    pub body: Option<Model>,
}

/// Resolve a parsed curl invocation against a provider definition.
pub fn resolve(
    curl: &ParsedCurl,
    provider: &ProviderDefinition,
) -> Result<ResolvedRequest, ModelError> {
    let url = curl
        .url
        .as_deref()
        .map(|url| resolve_url(url, provider))
        .transpose()?;

    Ok(ResolvedRequest {
        method: curl.method.clone(),
        url,
        query: resolve_query(&curl.query),
        headers: if curl.headers.is_empty() {
            None
        } else {
            Some(curl.headers.clone())
        },
        body: curl.body.as_ref().and_then(body_to_model),
    })
}

/// Strip the matching service base URL, drop the query string, and ensure
/// the canonical trailing path separator.
fn resolve_url(url: &str, provider: &ProviderDefinition) -> Result<String, ModelError> {
    let service = provider
        .service_for_url(url)
        .ok_or_else(|| ModelError::ServiceNotFound {
            url: url.to_string(),
        })?;

    let mut path = &url[service.base_url.len()..];
    if let Some(query_start) = path.find('?') {
        path = &path[..query_start];
    }
    if path.ends_with('/') {
        Ok(path.to_string())
    } else {
        Ok(format!("{path}/"))
    }
}

/// Stringify query entries, joining array values with commas and dropping
/// null entries. An empty result is omitted entirely.
fn resolve_query(query: &IndexMap<String, Value>) -> Option<IndexMap<String, String>> {
    let resolved: IndexMap<String, String> = query
        .iter()
        .filter_map(|(key, value)| query_value_string(value).map(|s| (key.clone(), s)))
        .collect();
    if resolved.is_empty() { None } else { Some(resolved) }
}

fn query_value_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(query_value_string)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => None,
    }
}

/// "Guess the schema from one instance": the same structural classification
/// as the example parser, but producing `Model` shapes. Every observed
/// field becomes required; arrays are assumed homogeneous and typed from
/// the first element only, so an empty array cannot be typed.
fn body_to_model(value: &Value) -> Option<Model> {
    let kind = match value {
        Value::Null => return None,
        Value::Bool(b) => ModelKind::Scalar {
            scalar_type: ScalarKind::Boolean,
            value: Some(ScalarValue::Bool(*b)),
        },
        Value::Number(n) => ModelKind::Scalar {
            scalar_type: ScalarKind::Number,
            value: Some(ScalarValue::Number(n.as_f64().unwrap_or_default())),
        },
        Value::String(s) => ModelKind::Scalar {
            scalar_type: ScalarKind::String,
            value: Some(ScalarValue::String(s.clone())),
        },
        Value::Array(items) => ModelKind::List {
            model: items.first().and_then(body_to_model).map(Box::new),
        },
        Value::Object(entries) => ModelKind::Object {
            fields: entries
                .iter()
                .map(|(name, value)| Field {
                    field_name: name.clone(),
                    required: true,
                    description: None,
                    model: body_to_model(value),
                })
                .collect(),
        },
    };
    Some(Model::new(kind, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> ProviderDefinition {
        serde_json::from_str(
            r#"{
                "name": "example",
                "services": [
                    { "id": "default", "baseUrl": "https://api.example.com/v1" }
                ],
                "defaultService": "default"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn strips_base_url_and_query_and_appends_separator() {
        let curl = ParsedCurl {
            url: Some("https://api.example.com/v1/users?active=true".into()),
            query: IndexMap::from([("active".to_string(), json!("true"))]),
            ..Default::default()
        };
        let resolved = resolve(&curl, &provider()).unwrap();
        assert_eq!(resolved.url.as_deref(), Some("/users/"));
        assert_eq!(
            resolved.query.unwrap().get("active").map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn url_already_ending_with_separator_is_kept() {
        let curl = ParsedCurl {
            url: Some("https://api.example.com/v1/users/".into()),
            ..Default::default()
        };
        let resolved = resolve(&curl, &provider()).unwrap();
        assert_eq!(resolved.url.as_deref(), Some("/users/"));
    }

    #[test]
    fn unmatched_base_url_is_fatal() {
        let curl = ParsedCurl {
            url: Some("https://elsewhere.test/users".into()),
            ..Default::default()
        };
        let err = resolve(&curl, &provider()).unwrap_err();
        assert!(matches!(err, ModelError::ServiceNotFound { .. }));
    }

    #[test]
    fn array_query_values_join_with_comma() {
        let curl = ParsedCurl {
            query: IndexMap::from([("tags".to_string(), json!(["a", "b"]))]),
            ..Default::default()
        };
        let resolved = resolve(&curl, &provider()).unwrap();
        assert_eq!(
            resolved.query.unwrap().get("tags").map(String::as_str),
            Some("a,b")
        );
    }

    #[test]
    fn empty_query_is_omitted_not_empty() {
        let curl = ParsedCurl::default();
        let resolved = resolve(&curl, &provider()).unwrap();
        assert_eq!(resolved.query, None);

        let curl = ParsedCurl {
            query: IndexMap::from([("skip".to_string(), Value::Null)]),
            ..Default::default()
        };
        let resolved = resolve(&curl, &provider()).unwrap();
        assert_eq!(resolved.query, None);
    }

    #[test]
    fn body_fields_are_all_required_and_typed_from_first_array_element() {
        let curl = ParsedCurl {
            body: Some(json!({
                "name": "x",
                "scores": [1, "mixed-is-ignored"],
                "empty": []
            })),
            ..Default::default()
        };
        let resolved = resolve(&curl, &provider()).unwrap();
        let ModelKind::Object { fields } = resolved.body.unwrap().kind else {
            panic!("expected object body model");
        };
        assert!(fields.iter().all(|f| f.required));

        let scores = &fields[1];
        let ModelKind::List { model: Some(element) } = &scores.model.as_ref().unwrap().kind
        else {
            panic!("expected typed list");
        };
        assert!(matches!(
            element.kind,
            ModelKind::Scalar {
                scalar_type: ScalarKind::Number,
                ..
            }
        ));

        // Empty arrays cannot be typed.
        let empty = &fields[2];
        assert!(matches!(
            empty.model.as_ref().unwrap().kind,
            ModelKind::List { model: None }
        ));
    }
}
