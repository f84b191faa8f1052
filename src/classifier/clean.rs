//! Pulling a usable link out of pasted or dropped text

use super::models::ClassifiedLink;
use super::rules::classify;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

#[allow(clippy::expect_used)]
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid regex"));

/// Extract the first http(s) URL from free text, dropping a leading `Link ` label
pub fn clean_link(text: &str) -> Option<String> {
    let text = text.trim();
    let text = text.strip_prefix("Link ").unwrap_or(text);
    LINK_PATTERN.find(text).map(|m| m.as_str().to_string())
}

/// Clean and classify; rejects links whose service or media type is invalid
pub fn prepare(text: &str) -> Option<ClassifiedLink> {
    let Some(url) = clean_link(text) else {
        debug!("No link found in {:?}", text);
        return None;
    };

    let link = classify(&url);
    debug!(
        "URL: {} - Service: {} - Media Type: {}",
        link.raw_url, link.service, link.media_type
    );

    if link.is_valid() {
        Some(link)
    } else {
        warn!("Missing or invalid service or media type for {}", url);
        None
    }
}
