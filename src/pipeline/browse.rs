//! Expansion of music-browse redirect links

use crate::browser::{Browser, GotoOptions, RenderContext, WaitCondition};
use crate::utils::error::ResolveError;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// `music.youtube.com/browse/<id>` links only redirect to the real page
pub fn is_browse_url(raw: &str) -> bool {
    let raw = raw.trim();
    let raw = raw.strip_prefix("Link ").unwrap_or(raw);
    Url::parse(raw).is_ok_and(|url| {
        url.host_str() == Some("music.youtube.com") && url.path().starts_with("/browse/")
    })
}

/// Follow a browse link and return where the browser ends up
pub async fn expand_browse_url(
    browser: &dyn Browser,
    raw: &str,
    timeout: Duration,
) -> Result<String, ResolveError> {
    let raw = raw.trim();
    let raw = raw.strip_prefix("Link ").unwrap_or(raw);
    let url = Url::parse(raw).map_err(|e| ResolveError::InvalidUrl(format!("{raw}: {e}")))?;

    let ctx = RenderContext::open(browser)
        .await
        .map_err(|e| ResolveError::Browser(format!("{e:#}")))?;

    debug!("Navigating directly to browse URL {}", url);
    let outcome = async {
        ctx.page()
            .goto(
                url.as_str(),
                GotoOptions::new(WaitCondition::DomContentLoaded, timeout),
            )
            .await?;
        ctx.page().current_url().await
    }
    .await
    .map_err(|e| ResolveError::navigation(url.as_str(), format!("{e:#}")));

    ctx.release().await;

    let final_url = outcome?;
    info!("Browse URL {} expanded to {}", url, final_url);
    Ok(final_url)
}
