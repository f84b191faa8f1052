//! Static documents fetched over plain HTTP
//!
//! No script runs, so a fetched document never changes: scrolling is a no-op
//! and waits resolve immediately against the document as served. That is
//! enough for meta tags. Destination listings are built client-side from a
//! script payload and never appear here; resolutions go through a rendering
//! browser instead.

use super::traits::{FieldSource, GotoOptions, ItemQuery, Page, ScrapedItem};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::sync::RwLock;
use std::time::Duration;
use tracing::debug;

struct Loaded {
    url: String,
    html: String,
}

/// A page holding the last fetched document
pub struct HttpPage {
    client: reqwest::Client,
    loaded: RwLock<Option<Loaded>>,
}

impl HttpPage {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            loaded: RwLock::new(None),
        }
    }

    /// Page with a document already in place
    pub fn from_html(url: &str, html: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            loaded: RwLock::new(Some(Loaded {
                url: url.to_string(),
                html: html.to_string(),
            })),
        }
    }

    /// Raw markup of the loaded document
    pub fn html(&self) -> Result<String> {
        let guard = self
            .loaded
            .read()
            .map_err(|_| anyhow!("page state lock poisoned"))?;
        guard
            .as_ref()
            .map(|loaded| loaded.html.clone())
            .ok_or_else(|| anyhow!("no document loaded"))
    }

    fn with_document<T>(&self, read: impl FnOnce(&Html) -> Result<T>) -> Result<T> {
        let guard = self
            .loaded
            .read()
            .map_err(|_| anyhow!("page state lock poisoned"))?;
        let loaded = guard.as_ref().ok_or_else(|| anyhow!("no document loaded"))?;
        let document = Html::parse_document(&loaded.html);
        read(&document)
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("invalid selector {:?}: {:?}", selector, e))
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn read_field(item: &ElementRef<'_>, selector: &Selector, source: &FieldSource) -> Option<String> {
    let el = item.select(selector).next()?;
    match source {
        FieldSource::Text => Some(element_text(&el)),
        FieldSource::Attr(name) => el.value().attr(name).map(str::to_string),
    }
}

#[async_trait]
impl Page for HttpPage {
    async fn goto(&self, url: &str, options: GotoOptions) -> Result<()> {
        debug!("Fetching {} (timeout {:?})", url, options.timeout);
        let response = self
            .client
            .get(url)
            .timeout(options.timeout)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("{url} returned an error status"))?;

        let final_url = response.url().to_string();
        let html = response
            .text()
            .await
            .with_context(|| format!("failed to read body of {url}"))?;

        let mut guard = self
            .loaded
            .write()
            .map_err(|_| anyhow!("page state lock poisoned"))?;
        *guard = Some(Loaded {
            url: final_url,
            html,
        });
        Ok(())
    }

    async fn query_selector_all_text(&self, selector: &str) -> Result<Vec<String>> {
        let selector = parse_selector(selector)?;
        self.with_document(|doc| Ok(doc.select(&selector).map(|el| element_text(&el)).collect()))
    }

    async fn query_selector_attr(&self, selector: &str, attr: &str) -> Result<Option<String>> {
        let selector = parse_selector(selector)?;
        self.with_document(|doc| {
            Ok(doc
                .select(&selector)
                .next()
                .and_then(|el| el.value().attr(attr))
                .map(str::to_string))
        })
    }

    async fn query_items(&self, query: &ItemQuery) -> Result<Vec<ScrapedItem>> {
        let item_sel = parse_selector(&query.item)?;
        let title_sel = parse_selector(&query.title.selector)?;
        let url_sel = parse_selector(&query.url.selector)?;

        self.with_document(|doc| {
            Ok(doc
                .select(&item_sel)
                .map(|item| ScrapedItem {
                    title: read_field(&item, &title_sel, &query.title.source),
                    url: read_field(&item, &url_sel, &query.url.source),
                })
                .collect())
        })
    }

    async fn scroll_element_into_view(&self, selector: &str) -> Result<()> {
        if self.count(selector).await? == 0 {
            return Err(anyhow!("no element matches {:?}", selector));
        }
        Ok(())
    }

    async fn wait_for_removal(
        &self,
        selector: &str,
        _timeout: Duration,
        _poll: Duration,
    ) -> Result<bool> {
        Ok(self.count(selector).await? == 0)
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<bool> {
        Ok(self.count(selector).await? > 0)
    }

    async fn current_url(&self) -> Result<String> {
        let guard = self
            .loaded
            .read()
            .map_err(|_| anyhow!("page state lock poisoned"))?;
        Ok(guard
            .as_ref()
            .map(|loaded| loaded.url.clone())
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn close(&self) -> Result<()> {
        let mut guard = self
            .loaded
            .write()
            .map_err(|_| anyhow!("page state lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}
