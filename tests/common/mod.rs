//! In-memory browser for driving the pipeline without a rendering engine.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tubelink::browser::{Browser, GotoOptions, ItemQuery, Page, ScrapedItem, Session};
use tubelink::classifier::{ClassifiedLink, Service};
use tubelink::extractor::{IdentityExtractor, IdentityRecord};
use tubelink::CollectOptions;

pub const SENTINEL: &str = "ytd-continuation-item-renderer";

/// How the continuation sentinel reacts to being scrolled into view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelMode {
    /// Next page loads and the sentinel is removed
    Normal,
    /// Next page loads but removal is never observed in time
    SlowRemoval,
    /// Sentinel never leaves and new items keep coming forever
    StuckGrowing,
    /// Sentinel never leaves and nothing new arrives
    StuckIdle,
}

#[derive(Debug, Clone)]
pub struct FakeListing {
    pub item_selector: String,
    pub items: Vec<ScrapedItem>,
    pub page_size: usize,
    pub loaded: usize,
    pub mode: SentinelMode,
    generated: usize,
}

impl FakeListing {
    pub fn new(item_selector: &str, items: Vec<ScrapedItem>, page_size: usize) -> Self {
        let loaded = page_size.min(items.len());
        Self {
            item_selector: item_selector.to_string(),
            items,
            page_size,
            loaded,
            mode: SentinelMode::Normal,
            generated: 0,
        }
    }

    pub fn with_mode(mut self, mode: SentinelMode) -> Self {
        self.mode = mode;
        self
    }

    fn visible(&self) -> &[ScrapedItem] {
        &self.items[..self.loaded]
    }

    fn sentinel_present(&self) -> bool {
        match self.mode {
            SentinelMode::StuckGrowing | SentinelMode::StuckIdle => true,
            SentinelMode::Normal | SentinelMode::SlowRemoval => self.loaded < self.items.len(),
        }
    }

    fn load_next(&mut self) {
        if self.loaded < self.items.len() {
            self.loaded = (self.loaded + self.page_size).min(self.items.len());
        } else if self.mode == SentinelMode::StuckGrowing {
            self.generated += 1;
            let n = self.generated;
            let title = format!("Generated {n}");
            let url = format!("/watch?v=gen{n}&list=PLgen{n}");
            self.items.push(item(&title, &url));
            self.loaded = self.items.len();
        }
    }

    /// Returns whether the sentinel was observed leaving
    fn on_wait_for_removal(&mut self) -> bool {
        match self.mode {
            SentinelMode::Normal => {
                self.load_next();
                true
            }
            SentinelMode::SlowRemoval | SentinelMode::StuckGrowing => {
                self.load_next();
                false
            }
            SentinelMode::StuckIdle => false,
        }
    }
}

pub fn item(title: &str, url: &str) -> ScrapedItem {
    ScrapedItem {
        title: Some(title.to_string()),
        url: Some(url.to_string()),
    }
}

pub fn item_without_url(title: &str) -> ScrapedItem {
    ScrapedItem {
        title: Some(title.to_string()),
        url: None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeDoc {
    pub listing: Option<FakeListing>,
    pub texts: HashMap<String, Vec<String>>,
    pub attrs: HashMap<(String, String), String>,
}

impl FakeDoc {
    pub fn with_listing(listing: FakeListing) -> Self {
        Self {
            listing: Some(listing),
            ..Default::default()
        }
    }

    pub fn attr(mut self, selector: &str, attr: &str, value: &str) -> Self {
        self.attrs
            .insert((selector.to_string(), attr.to_string()), value.to_string());
        self
    }

    pub fn text(mut self, selector: &str, value: &str) -> Self {
        self.texts
            .entry(selector.to_string())
            .or_default()
            .push(value.to_string());
        self
    }
}

/// Everything the fake browser knows and records
#[derive(Debug, Default)]
pub struct World {
    pub docs: HashMap<String, FakeDoc>,
    pub current: Option<String>,
    pub gotos: Vec<String>,
    pub launches: usize,
    pub pages_closed: usize,
    pub sessions_closed: usize,
    pub removal_waits: usize,
    pub scrolls: usize,
    pub open_pages: usize,
    pub max_open_pages: usize,
}

#[derive(Clone, Default)]
pub struct FakeBrowser {
    pub world: Arc<Mutex<World>>,
    pub goto_delay: Option<Duration>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc(self, url: &str, doc: FakeDoc) -> Self {
        self.world
            .lock()
            .unwrap()
            .docs
            .insert(url.to_string(), doc);
        self
    }

    pub fn with_goto_delay(mut self, delay: Duration) -> Self {
        self.goto_delay = Some(delay);
        self
    }

    pub fn gotos(&self) -> Vec<String> {
        self.world.lock().unwrap().gotos.clone()
    }

    pub fn launches(&self) -> usize {
        self.world.lock().unwrap().launches
    }

    pub fn pages_closed(&self) -> usize {
        self.world.lock().unwrap().pages_closed
    }

    pub fn sessions_closed(&self) -> usize {
        self.world.lock().unwrap().sessions_closed
    }

    pub fn removal_waits(&self) -> usize {
        self.world.lock().unwrap().removal_waits
    }

    pub fn max_open_pages(&self) -> usize {
        self.world.lock().unwrap().max_open_pages
    }

    /// A page already showing `url`, outside any session
    pub fn page_at(&self, url: &str) -> FakePage {
        self.world.lock().unwrap().current = Some(url.to_string());
        FakePage {
            world: self.world.clone(),
            goto_delay: self.goto_delay,
        }
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn launch(&self) -> Result<Box<dyn Session>> {
        self.world.lock().unwrap().launches += 1;
        Ok(Box::new(FakeSession {
            world: self.world.clone(),
            goto_delay: self.goto_delay,
        }))
    }
}

struct FakeSession {
    world: Arc<Mutex<World>>,
    goto_delay: Option<Duration>,
}

#[async_trait]
impl Session for FakeSession {
    async fn new_page(&self) -> Result<Box<dyn Page>> {
        let mut world = self.world.lock().unwrap();
        world.open_pages += 1;
        world.max_open_pages = world.max_open_pages.max(world.open_pages);
        Ok(Box::new(FakePage {
            world: self.world.clone(),
            goto_delay: self.goto_delay,
        }))
    }

    async fn close(&self) -> Result<()> {
        self.world.lock().unwrap().sessions_closed += 1;
        Ok(())
    }
}

pub struct FakePage {
    world: Arc<Mutex<World>>,
    goto_delay: Option<Duration>,
}

impl FakePage {
    fn with_doc<T>(&self, read: impl FnOnce(&mut FakeDoc) -> T) -> Result<T> {
        let mut world = self.world.lock().unwrap();
        let current = world.current.clone().ok_or_else(|| anyhow!("no page loaded"))?;
        let doc = world
            .docs
            .get_mut(&current)
            .ok_or_else(|| anyhow!("nothing at {current}"))?;
        Ok(read(doc))
    }
}

#[async_trait]
impl Page for FakePage {
    async fn goto(&self, url: &str, _options: GotoOptions) -> Result<()> {
        if let Some(delay) = self.goto_delay {
            tokio::time::sleep(delay).await;
        }
        let mut world = self.world.lock().unwrap();
        world.gotos.push(url.to_string());
        if !world.docs.contains_key(url) {
            return Err(anyhow!("net::ERR_NAME_NOT_RESOLVED at {url}"));
        }
        world.current = Some(url.to_string());
        Ok(())
    }

    async fn query_selector_all_text(&self, selector: &str) -> Result<Vec<String>> {
        self.with_doc(|doc| {
            if let Some(listing) = &doc.listing {
                if selector == listing.item_selector {
                    return listing
                        .visible()
                        .iter()
                        .map(|i| i.title.clone().unwrap_or_default())
                        .collect();
                }
                if selector == SENTINEL {
                    return if listing.sentinel_present() {
                        vec![String::new()]
                    } else {
                        Vec::new()
                    };
                }
            }
            doc.texts.get(selector).cloned().unwrap_or_default()
        })
    }

    async fn query_selector_attr(&self, selector: &str, attr: &str) -> Result<Option<String>> {
        self.with_doc(|doc| {
            doc.attrs
                .get(&(selector.to_string(), attr.to_string()))
                .cloned()
        })
    }

    async fn query_items(&self, query: &ItemQuery) -> Result<Vec<ScrapedItem>> {
        self.with_doc(|doc| match &doc.listing {
            Some(listing) if listing.item_selector == query.item => listing.visible().to_vec(),
            _ => Vec::new(),
        })
    }

    async fn scroll_element_into_view(&self, selector: &str) -> Result<()> {
        if self.count(selector).await? == 0 {
            return Err(anyhow!("no element matches {selector}"));
        }
        self.world.lock().unwrap().scrolls += 1;
        Ok(())
    }

    async fn wait_for_removal(
        &self,
        selector: &str,
        timeout: Duration,
        _poll: Duration,
    ) -> Result<bool> {
        self.world.lock().unwrap().removal_waits += 1;
        let removed = self.with_doc(|doc| match doc.listing.as_mut() {
            Some(listing) if selector == SENTINEL => listing.on_wait_for_removal(),
            _ => true,
        })?;
        if !removed {
            tokio::time::sleep(timeout).await;
        }
        Ok(removed)
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<bool> {
        Ok(self.count(selector).await? > 0)
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self
            .world
            .lock()
            .unwrap()
            .current
            .clone()
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn close(&self) -> Result<()> {
        let mut world = self.world.lock().unwrap();
        world.pages_closed += 1;
        world.open_pages = world.open_pages.saturating_sub(1);
        Ok(())
    }
}

/// Extractor that always reports the same identity
pub struct FixedIdentity(pub Option<IdentityRecord>);

#[async_trait]
impl IdentityExtractor for FixedIdentity {
    fn id(&self) -> &'static str {
        "fixed"
    }

    fn supports(&self, _service: Service) -> bool {
        true
    }

    async fn try_extract(
        &self,
        _link: &ClassifiedLink,
        _page: &dyn Page,
    ) -> Result<IdentityRecord> {
        self.0
            .clone()
            .ok_or_else(|| anyhow!("selector miss: creator-link"))
    }
}

pub fn identity(artist: Option<&str>, album: Option<&str>, track: Option<&str>) -> IdentityRecord {
    IdentityRecord::from_fields(
        artist.map(str::to_string),
        album.map(str::to_string),
        track.map(str::to_string),
    )
}

/// Short timings so paused-clock tests stay readable
pub fn fast_options(max_scrolls: usize) -> CollectOptions {
    CollectOptions {
        scroll_delay_ms: 10,
        continuation_timeout_ms: 100,
        poll_interval_ms: 10,
        settle_delay_ms: 10,
        max_scrolls,
        initial_wait_ms: 100,
    }
}
