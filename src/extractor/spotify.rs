//! Identity from Spotify's client-rendered pages

use crate::browser::{GotoOptions, Page, WaitCondition};
use crate::classifier::{ClassifiedLink, MediaType, Service};
use crate::extractor::models::IdentityRecord;
use crate::extractor::traits::IdentityExtractor;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const CREATOR_LINK: &str = r#"a[data-testid="creator-link"]"#;
const HEADING: &str = r#"section h1[data-encore-id="text"]"#;
const TRACK_TITLE: &str = r#"section span > h1[data-encore-id="text"]"#;
const TRACK_ALBUM: &str = r#"section span[data-encore-id="text"]:nth-child(3) > a"#;

pub struct SpotifyExtractor {
    timeout: Duration,
}

impl SpotifyExtractor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Curly apostrophes to plain ones
fn clean(text: Option<String>) -> Option<String> {
    text.map(|t| t.replace('\u{2019}', "'"))
}

#[async_trait]
impl IdentityExtractor for SpotifyExtractor {
    fn id(&self) -> &'static str {
        "spotify-rendered"
    }

    fn supports(&self, service: Service) -> bool {
        service == Service::Spotify
    }

    async fn try_extract(&self, link: &ClassifiedLink, page: &dyn Page) -> Result<IdentityRecord> {
        let anchor = match link.media_type {
            MediaType::Album | MediaType::Track => CREATOR_LINK,
            MediaType::Artist => HEADING,
            other => return Err(anyhow!("{} links are not supported", other)),
        };

        debug!("[spotify-rendered] Rendering {}", link.raw_url);
        page.goto(
            &link.raw_url,
            GotoOptions::new(WaitCondition::NetworkIdle, self.timeout),
        )
        .await?;

        if !page.wait_for_selector(anchor, self.timeout).await? {
            return Err(anyhow!("{anchor} never appeared on {}", link.raw_url));
        }

        let record = match link.media_type {
            MediaType::Album => IdentityRecord::from_fields(
                page.first_text(CREATOR_LINK).await?,
                clean(page.first_text(HEADING).await?),
                None,
            ),
            MediaType::Track => IdentityRecord::from_fields(
                page.first_text(CREATOR_LINK).await?,
                clean(page.first_text(TRACK_ALBUM).await?),
                clean(page.first_text(TRACK_TITLE).await?),
            ),
            _ => IdentityRecord::from_fields(clean(page.first_text(HEADING).await?), None, None),
        };

        debug!("[spotify-rendered] Extracted {:?}", record);
        Ok(record)
    }
}
