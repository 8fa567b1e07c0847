//! Organization audit-trail reader for [`TfeClient`].
//!
//! # What this module handles:
//! - Reading one page of audit events
//! - Walking every page from a starting instant
//!
//! # What this module does NOT handle:
//! - Low-level HTTP calls (in [`crate::endpoints`])

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::debug;

use crate::cancellation::CancellationToken;
use crate::client::TfeClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{AuditEvent, AuditEventList, AuditTrailReadOptions};

/// Read access to an organization's audit trail.
///
/// The organization token is supplied per call; audit trails are only
/// readable with an organization token, not a user or team token.
#[async_trait]
pub trait AuditTrails: Send + Sync {
    /// Read one page of audit events.
    ///
    /// `options = None` sends no query string; the server then applies its
    /// own defaults.
    async fn read(
        &self,
        org_token: &str,
        options: Option<&AuditTrailReadOptions>,
        cancel: &CancellationToken,
    ) -> Result<AuditEventList>;
}

/// Default [`AuditTrails`] implementation bound to a [`TfeClient`].
#[derive(Debug, Clone)]
pub struct AuditTrailReader {
    client: TfeClient,
}

impl AuditTrailReader {
    pub fn new(client: TfeClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &TfeClient {
        &self.client
    }

    /// Read every page of events after `since`, in server order.
    ///
    /// Stops when the server reports no further page. Each page takes its own
    /// rate limiter permit.
    pub async fn read_all(
        &self,
        org_token: &str,
        since: Option<OffsetDateTime>,
        page_size: Option<u32>,
        cancel: &CancellationToken,
    ) -> Result<Vec<AuditEvent>> {
        let mut events = Vec::new();
        let mut page = 1;
        loop {
            if cancel.is_cancelled() {
                return Err(ClientError::Cancelled);
            }

            let mut options = AuditTrailReadOptions::new().page_number(page);
            options.since = since;
            options.list_options.page_size = page_size;

            let list = self.read(org_token, Some(&options), cancel).await?;
            events.extend(list.items);

            match list.pagination.next_page {
                Some(next) if next > page => {
                    debug!(page, next, fetched = events.len(), "Following next audit trail page");
                    page = next;
                }
                _ => break,
            }
        }
        Ok(events)
    }
}

#[async_trait]
impl AuditTrails for AuditTrailReader {
    async fn read(
        &self,
        org_token: &str,
        options: Option<&AuditTrailReadOptions>,
        cancel: &CancellationToken,
    ) -> Result<AuditEventList> {
        endpoints::read_audit_trail(
            self.client.transport.as_ref(),
            self.client.rate_limiter.as_ref(),
            &self.client.base_url,
            org_token,
            options,
            cancel,
            self.client.metrics.as_ref(),
        )
        .await
    }
}
