//! Headless Chromium backend (feature `chromium`)

use super::traits::{
    Browser, FieldSource, GotoOptions, ItemQuery, Page, ScrapedItem, Session, WaitCondition,
};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig};
use chromiumoxide::element::Element;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};

pub struct ChromiumBrowser {
    headless: bool,
}

impl ChromiumBrowser {
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }
}

#[async_trait]
impl Browser for ChromiumBrowser {
    fn id(&self) -> &'static str {
        "chromium"
    }

    async fn launch(&self) -> Result<Box<dyn Session>> {
        let mut builder = BrowserConfig::builder();
        if !self.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(|e| anyhow!(e))?;

        let (browser, mut handler) = CdpBrowser::launch(config)
            .await
            .context("Failed to launch Chromium")?;

        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!("Chromium session launched");
        Ok(Box::new(ChromiumSession {
            browser: Mutex::new(browser),
            events,
        }))
    }
}

struct ChromiumSession {
    browser: Mutex<CdpBrowser>,
    events: JoinHandle<()>,
}

#[async_trait]
impl Session for ChromiumSession {
    async fn new_page(&self) -> Result<Box<dyn Page>> {
        let page = self.browser.lock().await.new_page("about:blank").await?;
        Ok(Box::new(ChromiumPage { page }))
    }

    async fn close(&self) -> Result<()> {
        let mut browser = self.browser.lock().await;
        if let Err(e) = browser.close().await {
            warn!("Chromium did not close cleanly: {}", e);
        }
        if let Err(e) = browser.wait().await {
            warn!("Chromium process did not exit cleanly: {}", e);
        }
        self.events.abort();
        Ok(())
    }
}

struct ChromiumPage {
    page: chromiumoxide::Page,
}

async fn read_field(item: &Element, selector: &str, source: &FieldSource) -> Option<String> {
    let el = item.find_element(selector).await.ok()?;
    match source {
        FieldSource::Text => el.inner_text().await.ok().flatten().map(|t| t.trim().to_string()),
        FieldSource::Attr(name) => el.attribute(name.as_str()).await.ok().flatten(),
    }
}

#[async_trait]
impl Page for ChromiumPage {
    /// `Load` and `DomContentLoaded` both return once the initial navigation
    /// commits; only `NetworkIdle` also waits for the follow-up navigation.
    async fn goto(&self, url: &str, options: GotoOptions) -> Result<()> {
        let navigation = async {
            self.page.goto(url).await?;
            if options.wait == WaitCondition::NetworkIdle {
                self.page.wait_for_navigation().await?;
            }
            Ok::<_, chromiumoxide::error::CdpError>(())
        };

        timeout(options.timeout, navigation)
            .await
            .map_err(|_| anyhow!("navigation to {url} timed out"))?
            .with_context(|| format!("navigation to {url} failed"))
    }

    async fn query_selector_all_text(&self, selector: &str) -> Result<Vec<String>> {
        let mut texts = Vec::new();
        for el in self.page.find_elements(selector).await.unwrap_or_default() {
            texts.push(el.inner_text().await?.unwrap_or_default().trim().to_string());
        }
        Ok(texts)
    }

    async fn query_selector_attr(&self, selector: &str, attr: &str) -> Result<Option<String>> {
        match self.page.find_element(selector).await {
            Ok(el) => Ok(el.attribute(attr).await?),
            Err(_) => Ok(None),
        }
    }

    async fn query_items(&self, query: &ItemQuery) -> Result<Vec<ScrapedItem>> {
        let mut items = Vec::new();
        for item in self.page.find_elements(query.item.as_str()).await.unwrap_or_default() {
            items.push(ScrapedItem {
                title: read_field(&item, &query.title.selector, &query.title.source).await,
                url: read_field(&item, &query.url.selector, &query.url.source).await,
            });
        }
        Ok(items)
    }

    async fn scroll_element_into_view(&self, selector: &str) -> Result<()> {
        let el = self
            .page
            .find_element(selector)
            .await
            .with_context(|| format!("no element matches {selector:?}"))?;
        el.scroll_into_view().await?;
        Ok(())
    }

    async fn wait_for_removal(
        &self,
        selector: &str,
        limit: Duration,
        poll: Duration,
    ) -> Result<bool> {
        let deadline = Instant::now() + limit;
        loop {
            if self.count(selector).await? == 0 {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            sleep(poll).await;
        }
    }

    async fn wait_for_selector(&self, selector: &str, limit: Duration) -> Result<bool> {
        let deadline = Instant::now() + limit;
        loop {
            if self.count(selector).await? > 0 {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            sleep(Duration::from_millis(250)).await;
        }
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self
            .page
            .url()
            .await?
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn close(&self) -> Result<()> {
        self.page.clone().close().await?;
        Ok(())
    }
}
