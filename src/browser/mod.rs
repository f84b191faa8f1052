//! Browser automation capability
//!
//! The resolution pipeline never talks to a rendering engine directly; it
//! goes through the [`Browser`] / [`Session`] / [`Page`] traits so the
//! collector and matcher can run against a scripted fake in tests.

pub mod context;
pub mod static_page;
pub mod traits;

#[cfg(feature = "chromium")]
pub mod chromium;

pub use context::RenderContext;
pub use static_page::HttpPage;
pub use traits::{
    Browser, Field, FieldSource, GotoOptions, ItemQuery, Page, ScrapedItem, Session, WaitCondition,
};

#[cfg(feature = "chromium")]
pub use chromium::ChromiumBrowser;

use crate::utils::error::ResolveError;
use std::sync::Arc;

/// The browser used for resolutions
///
/// Destination listings only exist after client-side rendering, so a build
/// without a rendering engine refuses to start instead of resolving every
/// link to nothing.
#[cfg(feature = "chromium")]
pub fn rendering_browser(headless: bool) -> Result<Arc<dyn Browser>, ResolveError> {
    Ok(Arc::new(ChromiumBrowser::new(headless)))
}

#[cfg(not(feature = "chromium"))]
pub fn rendering_browser(_headless: bool) -> Result<Arc<dyn Browser>, ResolveError> {
    Err(ResolveError::Config(
        "resolving links needs a rendering browser; rebuild with the `chromium` feature"
            .to_string(),
    ))
}
