//! Data models for API requests and responses.

pub mod audit_trail;
pub mod pagination;

pub use audit_trail::{
    AuditAuth, AuditEvent, AuditEventList, AuditRequest, AuditResource, AuditTrailReadOptions,
};
pub use pagination::{ListOptions, Pagination};

use serde::Deserialize;

/// JSON:API error document returned with non-success statuses.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiErrors {
    #[serde(default)]
    pub errors: Vec<ApiErrorObject>,
}

/// One entry of an `errors` array: a JSON:API error object or a bare string.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum ApiErrorObject {
    Structured {
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        detail: Option<String>,
    },
    Text(String),
}

impl ApiErrors {
    /// Join the error titles and details into one human-readable line.
    pub fn message(&self) -> Option<String> {
        let parts: Vec<String> = self
            .errors
            .iter()
            .filter_map(|e| match e {
                ApiErrorObject::Structured { title, detail, .. } => {
                    match (title.as_deref(), detail.as_deref()) {
                        (Some(title), Some(detail)) => Some(format!("{title}: {detail}")),
                        (Some(text), None) | (None, Some(text)) => Some(text.to_string()),
                        (None, None) => None,
                    }
                }
                ApiErrorObject::Text(text) => Some(text.clone()),
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}
