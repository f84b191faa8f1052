//! Scroll harness for lazily loaded listings
//!
//! A listing only grows when its trailing continuation sentinel is scrolled
//! into view; the host then fetches the next page and removes the sentinel.
//! Neither signal is reliable alone: a slow fetch can outlive the removal
//! timeout and still deliver items, and a removed sentinel can re-render
//! items already seen. The loop therefore stops only when the sentinel is
//! gone before scrolling, when the sentinel stayed put *and* nothing new
//! arrived, or after `max_scrolls` iterations.

use super::listing::Listing;
use super::models::{CandidateItem, CandidateSet, CollectOptions, ScrollState};
use crate::browser::Page;
use anyhow::Result;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

/// Outcome of one scroll iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    Continue,
    /// No sentinel left to scroll to
    EndOfContent,
    /// Sentinel never went away and no new items appeared
    Stalled,
}

/// Collect every item of `listing` currently loadable on `page`, deduplicated
/// by URL in first-seen order
pub async fn collect_all(
    page: &dyn Page,
    listing: &Listing,
    options: &CollectOptions,
) -> Result<Vec<CandidateItem>> {
    debug!(
        "[{}] Collecting with max_scrolls={}, scroll_delay={}ms, continuation_timeout={}ms",
        listing.name, options.max_scrolls, options.scroll_delay_ms, options.continuation_timeout_ms
    );

    if !page
        .wait_for_selector(&listing.query.item, options.initial_wait())
        .await?
    {
        warn!("[{}] No items appeared on the page", listing.name);
        return Ok(Vec::new());
    }

    let base = Url::parse(&page.current_url().await?).ok();

    let mut state = ScrollState::default();
    let initial = harvest(page, listing, base.as_ref(), &mut state.collected).await?;
    debug!("[{}] Collected {} unique items initially", listing.name, initial);

    while state.scroll_count < options.max_scrolls {
        let (next, progress) = advance(page, listing, options, base.as_ref(), state).await?;
        state = next;
        match progress {
            Progress::Continue => {}
            Progress::EndOfContent => {
                debug!("[{}] Continuation sentinel gone; end of content", listing.name);
                break;
            }
            Progress::Stalled => {
                debug!(
                    "[{}] Sentinel not removed and nothing new after scroll #{}; stopping",
                    listing.name, state.scroll_count
                );
                break;
            }
        }
    }

    if state.scroll_count >= options.max_scrolls {
        info!("[{}] Max scrolls ({}) reached", listing.name, options.max_scrolls);
    }
    info!(
        "[{}] Finished after {} scrolls with {} unique items",
        listing.name,
        state.scroll_count,
        state.collected.len()
    );
    Ok(state.collected.into_items())
}

/// One scroll iteration. Takes the state by value and hands it back.
async fn advance(
    page: &dyn Page,
    listing: &Listing,
    options: &CollectOptions,
    base: Option<&Url>,
    mut state: ScrollState,
) -> Result<(ScrollState, Progress)> {
    let rendered_before = page.count(&listing.query.item).await?;

    state.continuation_present = page.count(&listing.continuation).await? > 0;
    if !state.continuation_present {
        return Ok((state, Progress::EndOfContent));
    }

    if let Err(e) = page.scroll_element_into_view(&listing.continuation).await {
        warn!("[{}] Failed to scroll continuation into view: {}", listing.name, e);
        return Ok((state, Progress::EndOfContent));
    }
    sleep(options.scroll_delay()).await;

    let removed = match page
        .wait_for_removal(
            &listing.continuation,
            options.continuation_timeout(),
            options.poll_interval(),
        )
        .await
    {
        Ok(removed) => removed,
        Err(e) => {
            warn!("[{}] Waiting for continuation removal failed: {}", listing.name, e);
            false
        }
    };
    if !removed {
        debug!("[{}] Continuation not removed within timeout", listing.name);
    }
    sleep(options.settle_delay()).await;

    let added = harvest(page, listing, base, &mut state.collected).await?;
    state.scroll_count += 1;
    debug!(
        "[{}] Scroll #{}: {} rendered before, {} new, {} unique total",
        listing.name,
        state.scroll_count,
        rendered_before,
        added,
        state.collected.len()
    );

    let progress = if !removed && added == 0 {
        Progress::Stalled
    } else {
        Progress::Continue
    };
    Ok((state, progress))
}

/// Read every rendered item into `collected`; returns how many were new
async fn harvest(
    page: &dyn Page,
    listing: &Listing,
    base: Option<&Url>,
    collected: &mut CandidateSet,
) -> Result<usize> {
    let mut added = 0;
    for scraped in page.query_items(&listing.query).await? {
        let Some(url) = scraped
            .url
            .as_deref()
            .and_then(|raw| (listing.resolve_url)(base, raw))
        else {
            continue;
        };
        let title = scraped.title.unwrap_or_default().trim().to_string();
        if collected.insert(CandidateItem::new(title, url)) {
            added += 1;
        }
    }
    Ok(added)
}
