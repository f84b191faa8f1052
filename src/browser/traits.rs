use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// When a navigation counts as finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitCondition {
    Load,
    DomContentLoaded,
    /// No more than a couple of requests in flight
    NetworkIdle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GotoOptions {
    pub wait: WaitCondition,
    pub timeout: Duration,
}

impl GotoOptions {
    pub fn new(wait: WaitCondition, timeout: Duration) -> Self {
        Self { wait, timeout }
    }
}

/// Where a field's value is read from, relative to its element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    Text,
    Attr(String),
}

/// A value read from a descendant of each listed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub selector: String,
    pub source: FieldSource,
}

impl Field {
    pub fn text(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            source: FieldSource::Text,
        }
    }

    pub fn attr(selector: impl Into<String>, attr: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            source: FieldSource::Attr(attr.into()),
        }
    }
}

/// Per-item read of a title and a link: the batched form of the text and
/// attribute primitives, scoped to each element matching `item`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub item: String,
    pub title: Field,
    pub url: Field,
}

/// Raw values read for one item; either may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedItem {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Launches browser sessions
#[async_trait]
pub trait Browser: Send + Sync {
    /// Identifier used in logs (e.g. "http-static", "chromium")
    fn id(&self) -> &'static str;

    async fn launch(&self) -> Result<Box<dyn Session>>;
}

/// One running browser instance
#[async_trait]
pub trait Session: Send + Sync {
    async fn new_page(&self) -> Result<Box<dyn Page>>;

    async fn close(&self) -> Result<()>;
}

/// A single tab and the DOM reads the pipeline performs on it
#[async_trait]
pub trait Page: Send + Sync {
    async fn goto(&self, url: &str, options: GotoOptions) -> Result<()>;

    /// Text of every element matching `selector`, in document order
    async fn query_selector_all_text(&self, selector: &str) -> Result<Vec<String>>;

    /// Attribute of the first element matching `selector`
    async fn query_selector_attr(&self, selector: &str, attr: &str) -> Result<Option<String>>;

    /// Title and link of every element matching `query.item`
    async fn query_items(&self, query: &ItemQuery) -> Result<Vec<ScrapedItem>>;

    async fn scroll_element_into_view(&self, selector: &str) -> Result<()>;

    /// Poll until nothing matches `selector`. `Ok(false)` means the timeout
    /// elapsed with the element still present.
    async fn wait_for_removal(&self, selector: &str, timeout: Duration, poll: Duration)
        -> Result<bool>;

    /// Wait until something matches `selector`. `Ok(false)` on timeout.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<bool>;

    async fn current_url(&self) -> Result<String>;

    async fn close(&self) -> Result<()>;

    /// Number of elements matching `selector`
    async fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.query_selector_all_text(selector).await?.len())
    }

    /// First non-empty trimmed text among elements matching `selector`
    async fn first_text(&self, selector: &str) -> Result<Option<String>> {
        let texts = self.query_selector_all_text(selector).await?;
        Ok(texts
            .into_iter()
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty()))
    }
}
