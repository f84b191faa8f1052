//! Data structures for collected candidates

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// An item rendered in a destination listing, not yet confirmed as a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub title: String,
    pub url: String,
}

impl CandidateItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Candidates keyed by URL, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    items: Vec<CandidateItem>,
    seen: HashSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the URL is empty or already present. Returns whether the
    /// item was new.
    pub fn insert(&mut self, item: CandidateItem) -> bool {
        if item.url.is_empty() || self.seen.contains(&item.url) {
            return false;
        }
        self.seen.insert(item.url.clone());
        self.items.push(item);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateItem> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<CandidateItem> {
        self.items
    }
}

/// Scroll loop state, threaded through each iteration and dropped on return
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    pub scroll_count: usize,
    pub collected: CandidateSet,
    pub continuation_present: bool,
}

/// Scroll harness tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectOptions {
    /// Pause after scrolling the sentinel into view
    pub scroll_delay_ms: u64,
    /// How long to wait for the sentinel to disappear
    pub continuation_timeout_ms: u64,
    /// Poll interval while waiting for the sentinel to disappear
    pub poll_interval_ms: u64,
    /// Pause before re-reading items
    pub settle_delay_ms: u64,
    /// Hard bound on scroll iterations
    pub max_scrolls: usize,
    /// How long to wait for the first item to appear
    pub initial_wait_ms: u64,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            scroll_delay_ms: 500,
            continuation_timeout_ms: 20_000,
            poll_interval_ms: 500,
            settle_delay_ms: 500,
            max_scrolls: 100,
            initial_wait_ms: 10_000,
        }
    }
}

impl CollectOptions {
    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }

    pub fn continuation_timeout(&self) -> Duration {
        Duration::from_millis(self.continuation_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn initial_wait(&self) -> Duration {
        Duration::from_millis(self.initial_wait_ms)
    }
}
