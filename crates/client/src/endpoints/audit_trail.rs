//! Organization audit-trail endpoint.
//!
//! One call is one paced, retried `GET` of a single page. Errors surface in
//! the order the work happens: request construction, permit wait, transport,
//! decode.
//!
//! The organization token is sent as a bearer credential and is never logged.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request};
use tracing::{debug, warn};
use url::Url;

use crate::cancellation::CancellationToken;
use crate::endpoints::query::audit_trail_query;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{AuditEventList, AuditTrailReadOptions};
use crate::rate_limit::{RateLimiter, acquire_permit};
use crate::transport::HttpTransport;

/// Path of the audit-trail resource, relative to the service root.
pub const AUDIT_TRAIL_PATH: &str = "/api/v2/organization/audit-trail";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Read one page of the organization audit trail.
///
/// `options = None` sends no query string at all.
pub async fn read_audit_trail(
    transport: &dyn HttpTransport,
    rate_limiter: &dyn RateLimiter,
    base_url: &Url,
    org_token: &str,
    options: Option<&AuditTrailReadOptions>,
    cancel: &CancellationToken,
    metrics: Option<&MetricsCollector>,
) -> Result<AuditEventList> {
    let request = build_request(base_url, org_token, options)?;

    let waited = acquire_permit(rate_limiter, cancel).await?;
    if let Some(m) = metrics {
        m.record_rate_limit_wait(AUDIT_TRAIL_PATH, waited);
    }

    debug!(url = %request.url(), "Reading organization audit trail");

    let response = match transport.execute(request, cancel).await {
        Ok(response) => response,
        Err(_) if cancel.is_cancelled() => return Err(ClientError::Cancelled),
        Err(e) => return Err(e),
    };

    // A body cut off mid-read is a transport failure, not a decode failure
    let body = response.bytes().await.map_err(|e| {
        if cancel.is_cancelled() {
            ClientError::Cancelled
        } else {
            ClientError::HttpError(e)
        }
    })?;

    let list: AuditEventList = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body_len = body.len(), "Failed to decode audit trail response");
        if let Some(m) = metrics {
            m.record_deserialization_failure(AUDIT_TRAIL_PATH, "AuditEventList");
        }
        ClientError::Decode(e)
    })?;

    debug!(
        items = list.items.len(),
        current_page = list.pagination.current_page,
        total_count = list.pagination.total_count,
        "Read audit trail page"
    );
    Ok(list)
}

/// Resolve the endpoint URL and attach query and headers.
pub(crate) fn build_request(
    base_url: &Url,
    org_token: &str,
    options: Option<&AuditTrailReadOptions>,
) -> Result<Request> {
    let mut url = base_url.join(AUDIT_TRAIL_PATH).map_err(|e| {
        ClientError::InvalidUrl(format!(
            "cannot resolve {AUDIT_TRAIL_PATH} against {base_url}: {e}"
        ))
    })?;

    if let Some(options) = options {
        let pairs = audit_trail_query(options)?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
    }

    let mut authorization = HeaderValue::from_str(&format!("Bearer {org_token}"))
        .map_err(|_| ClientError::InvalidHeader("Authorization"))?;
    authorization.set_sensitive(true);

    let mut request = Request::new(Method::GET, url);
    let headers = request.headers_mut();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
    Ok(request)
}
