//! Organization audit-trail models.
//!
//! Audit events record security-relevant actions taken within an
//! organization. They are only ever produced by decoding server responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use super::pagination::{ListOptions, Pagination};

/// Who performed the audited action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditAuth {
    /// Identifier of the user, team or token that acted.
    pub accessor_id: String,
    pub description: String,
    /// Accessor kind, e.g. `Client` or `Impersonated`.
    #[serde(rename = "type")]
    pub auth_type: String,
    /// Set when an administrator acted on behalf of the accessor.
    #[serde(default)]
    pub impersonator_id: Option<String>,
    pub organization_id: String,
}

/// The API request that triggered the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRequest {
    pub id: String,
}

/// The resource the action was applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResource {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub action: String,
    /// Free-form, resource-specific details passed through untouched.
    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}

/// A single audit event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: String,
    pub version: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub auth: AuditAuth,
    pub request: AuditRequest,
    pub resource: AuditResource,
}

/// One page of audit events.
///
/// `items` mirrors the server's `data` array in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "AuditEventListResponse")]
pub struct AuditEventList {
    #[serde(rename = "data")]
    pub items: Vec<AuditEvent>,
    pub pagination: Pagination,
}

/// Wire shape of the list response.
///
/// Pagination may arrive as top-level keys or nested under `pagination`;
/// the nested object wins when both are present.
#[derive(Debug, Deserialize)]
struct AuditEventListResponse {
    data: Vec<AuditEvent>,
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(flatten)]
    top_level: Pagination,
}

impl From<AuditEventListResponse> for AuditEventList {
    fn from(response: AuditEventListResponse) -> Self {
        Self {
            items: response.data,
            pagination: response.pagination.unwrap_or(response.top_level),
        }
    }
}

/// Filters for reading the audit trail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditTrailReadOptions {
    /// Only return events after this instant. Sent as RFC 3339.
    pub since: Option<OffsetDateTime>,
    pub list_options: ListOptions,
}

impl AuditTrailReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(mut self, since: OffsetDateTime) -> Self {
        self.since = Some(since);
        self
    }

    pub fn page_number(mut self, page_number: u32) -> Self {
        self.list_options.page_number = Some(page_number);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.list_options.page_size = Some(page_size);
        self
    }
}
