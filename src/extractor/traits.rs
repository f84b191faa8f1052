use crate::browser::Page;
use crate::classifier::{ClassifiedLink, Service};
use crate::extractor::models::IdentityRecord;
use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

/// Per-service identity adapter
///
/// Adapters report failures through `try_extract`; callers use `extract`,
/// which logs the failure and turns it into `None` so one broken adapter
/// never takes the pipeline down.
#[async_trait]
pub trait IdentityExtractor: Send + Sync {
    /// Identifier used in logs (e.g. "meta-tags", "spotify-rendered")
    fn id(&self) -> &'static str;

    /// Whether this adapter handles links from `service`
    fn supports(&self, service: Service) -> bool;

    /// Read the identity of `link`. `page` belongs to the caller's rendering
    /// context and may be navigated.
    async fn try_extract(&self, link: &ClassifiedLink, page: &dyn Page) -> Result<IdentityRecord>;

    /// Identity of `link`, or `None` when nothing usable could be read
    async fn extract(&self, link: &ClassifiedLink, page: &dyn Page) -> Option<IdentityRecord> {
        match self.try_extract(link, page).await {
            Ok(record) if !record.is_empty() => Some(record),
            Ok(_) => {
                warn!("[{}] Extracted an empty identity from {}", self.id(), link.raw_url);
                None
            }
            Err(e) => {
                warn!("[{}] Extraction failed for {}: {:#}", self.id(), link.raw_url, e);
                None
            }
        }
    }
}
