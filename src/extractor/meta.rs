//! Identity from document meta tags
//!
//! Most services put the release title in `og:title` and the artist in a
//! service-specific tag (or the first part of `og:description`), so a plain
//! fetch is enough.

use crate::browser::{GotoOptions, HttpPage, Page, WaitCondition};
use crate::classifier::{ClassifiedLink, MediaType, Service};
use crate::extractor::models::IdentityRecord;
use crate::extractor::traits::IdentityExtractor;
use crate::utils::error::ResolveError;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

const TITLE_SELECTOR: &str = r#"meta[property="og:title"]"#;
const DESCRIPTION_SELECTOR: &str = r#"meta[property="og:description"]"#;

/// Where a service publishes the artist name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArtistSource {
    /// `content` of this meta tag
    Tag(&'static str),
    /// `og:description` up to this delimiter
    DescriptionPrefix(&'static str),
}

const PROFILES: &[(Service, ArtistSource)] = &[
    (Service::AppleMusic, ArtistSource::Tag(r#"meta[name="apple:artist"]"#)),
    (Service::Soundcloud, ArtistSource::Tag(r#"meta[property="soundcloud:creator"]"#)),
    (Service::Amazon, ArtistSource::Tag(r#"meta[name="music:musician"]"#)),
    (Service::Tidal, ArtistSource::DescriptionPrefix(" · ")),
    (Service::Deezer, ArtistSource::Tag(r#"meta[property="music:musician"]"#)),
    (Service::Qobuz, ArtistSource::DescriptionPrefix(" - ")),
    (Service::Discogs, ArtistSource::Tag(r#"meta[name="twitter:audio:artist_name"]"#)),
];

fn profile_for(service: Service) -> Option<ArtistSource> {
    PROFILES
        .iter()
        .find(|(s, _)| *s == service)
        .map(|(_, source)| *source)
}

/// Raw title and artist read from a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaFields {
    pub title: String,
    pub artist: String,
}

pub struct MetaTagExtractor {
    client: reqwest::Client,
    timeout: Duration,
}

impl MetaTagExtractor {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, timeout })
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let page = HttpPage::new(self.client.clone());
        page.goto(url, GotoOptions::new(WaitCondition::Load, self.timeout))
            .await?;
        page.html()
    }
}

fn meta_content(document: &Html, selector: &str) -> Result<String> {
    let selector =
        Selector::parse(selector).map_err(|e| anyhow!("invalid selector {:?}: {:?}", selector, e))?;
    Ok(document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .trim()
        .to_string())
}

/// Read the title and the artist for `service` from a document. Absent tags
/// read as empty strings.
pub fn read_meta(html: &str, service: Service) -> Result<MetaFields> {
    let source =
        profile_for(service).ok_or_else(|| anyhow!("no meta tag profile for {}", service))?;
    let document = Html::parse_document(html);

    let title = meta_content(&document, TITLE_SELECTOR)?;
    let artist = match source {
        ArtistSource::Tag(selector) => meta_content(&document, selector)?,
        ArtistSource::DescriptionPrefix(delimiter) => meta_content(&document, DESCRIPTION_SELECTOR)?
            .split(delimiter)
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
    };

    Ok(MetaFields { title, artist })
}

/// Place the page title according to what the link points at
pub fn identity_from_meta(fields: MetaFields, media: MediaType) -> IdentityRecord {
    let MetaFields { title, artist } = fields;
    match media {
        MediaType::Album | MediaType::Playlist => {
            IdentityRecord::from_fields(Some(artist), Some(title), None)
        }
        MediaType::Track => IdentityRecord::from_fields(Some(artist), None, Some(title)),
        MediaType::Artist => {
            let artist = if artist.trim().is_empty() { title } else { artist };
            IdentityRecord::from_fields(Some(artist), None, None)
        }
        MediaType::Unknown | MediaType::Invalid => {
            IdentityRecord::from_fields(Some(artist), None, None)
        }
    }
}

#[async_trait]
impl IdentityExtractor for MetaTagExtractor {
    fn id(&self) -> &'static str {
        "meta-tags"
    }

    fn supports(&self, service: Service) -> bool {
        profile_for(service).is_some()
    }

    async fn try_extract(&self, link: &ClassifiedLink, _page: &dyn Page) -> Result<IdentityRecord> {
        let html = self.fetch(&link.raw_url).await?;
        let fields = read_meta(&html, link.service)?;
        debug!(
            "[meta-tags] {} title={:?} artist={:?}",
            link.service, fields.title, fields.artist
        );
        Ok(identity_from_meta(fields, link.media_type))
    }
}
