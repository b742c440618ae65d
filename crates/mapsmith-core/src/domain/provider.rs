//! Provider definition boundary types.
//!
//! Loaded by surrounding code from `provider.json`; this crate only reads
//! the parts generation needs (service base URLs for curl resolution, the
//! default service and parameters for template input).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDefinition {
    pub name: String,

    #[serde(default)]
    pub services: Vec<ProviderService>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_service: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_schemes: Vec<SecurityScheme>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<IntegrationParameter>,
}

impl ProviderDefinition {
    /// The service whose base URL is a string prefix of `url`, if any.
    pub fn service_for_url(&self, url: &str) -> Option<&ProviderService> {
        self.services.iter().find(|s| url.starts_with(&s.base_url))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderService {
    pub id: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    pub id: String,
    #[serde(rename = "type")]
    pub scheme_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}
