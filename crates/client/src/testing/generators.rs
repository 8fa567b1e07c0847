//! Deterministic audit-trail page generators.
//!
//! Event ids, timestamps and actions are derived from the event's position so
//! tests can assert on ordering without storing large fixtures.

use serde_json::{Value, json};

const ACTIONS: [&str; 4] = ["create", "update", "destroy", "read"];
const RESOURCE_TYPES: [&str; 3] = ["workspace", "run", "variable"];

/// Generates audit events and paginated list responses.
///
/// # Example
/// ```ignore
/// let generator = AuditEventGenerator::new().with_count(45);
/// let first = generator.page(1, 20); // events 0..20, next_page = 2
/// let last = generator.page(3, 20);  // events 40..45, next_page = null
/// ```
#[derive(Debug, Clone)]
pub struct AuditEventGenerator {
    count: usize,
    organization_id: String,
    nested_pagination: bool,
}

impl Default for AuditEventGenerator {
    fn default() -> Self {
        Self {
            count: 10,
            organization_id: "org-test".to_string(),
            nested_pagination: true,
        }
    }
}

impl AuditEventGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of events across all pages.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = organization_id.into();
        self
    }

    /// Emit pagination as top-level `current-page`-style keys instead of a
    /// nested `pagination` object.
    pub fn with_top_level_pagination(mut self) -> Self {
        self.nested_pagination = false;
        self
    }

    /// Id of the event at `index`.
    pub fn event_id(index: usize) -> String {
        format!("ae-{index:06}")
    }

    /// The event at `index`.
    pub fn event(&self, index: usize) -> Value {
        let minute = index % 60;
        let hour = (index / 60) % 24;
        let meta = if index % 2 == 0 {
            json!({ "index": index, "tags": ["generated"] })
        } else {
            Value::Null
        };
        json!({
            "id": Self::event_id(index),
            "version": "0",
            "type": "Resource",
            "timestamp": format!("2024-05-01T{hour:02}:{minute:02}:00.000Z"),
            "auth": {
                "accessor_id": format!("user-{}", index % 7),
                "description": format!("user{}", index % 7),
                "type": "Client",
                "impersonator_id": null,
                "organization_id": self.organization_id,
            },
            "request": { "id": format!("req-{index}") },
            "resource": {
                "id": format!("res-{index}"),
                "type": RESOURCE_TYPES[index % RESOURCE_TYPES.len()],
                "action": ACTIONS[index % ACTIONS.len()],
                "meta": meta,
            }
        })
    }

    /// The list response for 1-based `page` with `page_size` events per page.
    pub fn page(&self, page: usize, page_size: usize) -> Value {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = self.count.div_ceil(page_size).max(1);
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(self.count);
        let data: Vec<Value> = (start..end).map(|i| self.event(i)).collect();

        let prev_page = (page > 1).then(|| page - 1);
        let next_page = (page < total_pages).then(|| page + 1);

        if self.nested_pagination {
            json!({
                "data": data,
                "pagination": {
                    "current_page": page,
                    "prev_page": prev_page,
                    "next_page": next_page,
                    "total_pages": total_pages,
                    "total_count": self.count,
                }
            })
        } else {
            json!({
                "data": data,
                "current-page": page,
                "prev-page": prev_page,
                "next-page": next_page,
                "total-pages": total_pages,
                "total-count": self.count,
            })
        }
    }
}
