//! One rendering context per resolution, released on every exit path

use super::traits::{Browser, Page, Session};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// A launched session plus its single page
///
/// Call [`RenderContext::release`] on the normal paths. If the context is
/// dropped without it (early return, panic unwinding, or the owning future
/// being abandoned at an await point) the page and session are closed on a
/// background task instead.
pub struct RenderContext {
    session: Arc<dyn Session>,
    page: Arc<dyn Page>,
    released: bool,
}

impl RenderContext {
    /// Launch a session and open its page
    pub async fn open(browser: &dyn Browser) -> Result<Self> {
        debug!("Opening rendering context via {}", browser.id());
        let session: Arc<dyn Session> = Arc::from(browser.launch().await?);

        match session.new_page().await {
            Ok(page) => Ok(Self {
                session,
                page: Arc::from(page),
                released: false,
            }),
            Err(e) => {
                if let Err(close_err) = session.close().await {
                    warn!("Failed to close session after page error: {}", close_err);
                }
                Err(e)
            }
        }
    }

    pub fn page(&self) -> &dyn Page {
        self.page.as_ref()
    }

    /// Close the page, then the session
    pub async fn release(mut self) {
        self.released = true;
        close_both(self.page.clone(), self.session.clone()).await;
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let page = self.page.clone();
        let session = self.session.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("Rendering context dropped unreleased; closing in background");
                handle.spawn(close_both(page, session));
            }
            Err(_) => warn!("Rendering context dropped outside a runtime; it could not be closed"),
        }
    }
}

async fn close_both(page: Arc<dyn Page>, session: Arc<dyn Session>) {
    if let Err(e) = page.close().await {
        warn!("Failed to close page: {}", e);
    }
    if let Err(e) = session.close().await {
        warn!("Failed to close browser session: {}", e);
    }
}
