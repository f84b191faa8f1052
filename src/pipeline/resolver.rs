//! Resolution orchestrator
//!
//! search results -> channel -> releases -> playlist -> track. Each depth is
//! entered only when the previous one matched; a miss returns whatever was
//! resolved so far.

use super::models::ResolvedLink;
use super::passthrough::passthrough;
use crate::browser::{Browser, GotoOptions, Page, RenderContext, WaitCondition};
use crate::classifier::{classify, ClassifiedLink, MediaType, Service};
use crate::collector::{collect_all, CandidateItem, Listing};
use crate::extractor::{ExtractorRegistry, IdentityRecord};
use crate::matcher::match_best;
use crate::query::build_search_url;
use crate::utils::config::ResolverSettings;
use crate::utils::error::ResolveError;
use std::sync::Arc;
use tracing::{debug, info, warn};

const THUMBNAIL_SELECTOR: &str = "img#img";

pub struct Resolver {
    browser: Arc<dyn Browser>,
    extractors: Arc<ExtractorRegistry>,
    settings: ResolverSettings,
}

impl Resolver {
    pub fn new(
        browser: Arc<dyn Browser>,
        extractors: Arc<ExtractorRegistry>,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            browser,
            extractors,
            settings,
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn browser(&self) -> &Arc<dyn Browser> {
        &self.browser
    }

    /// Resolve a URL given its service and media type names
    pub async fn resolve(
        &self,
        url: &str,
        service: &str,
        media: &str,
    ) -> Result<Option<ResolvedLink>, ResolveError> {
        let service: Service = service.parse().map_err(ResolveError::InvalidUrl)?;
        let media_type: MediaType = media.parse().map_err(ResolveError::InvalidUrl)?;
        self.resolve_link(&ClassifiedLink::new(url, service, media_type))
            .await
    }

    /// Classify, then resolve
    pub async fn resolve_url(&self, url: &str) -> Result<Option<ResolvedLink>, ResolveError> {
        self.resolve_link(&classify(url)).await
    }

    /// Resolve a classified link
    ///
    /// `Ok(None)` when no usable identity could be extracted; `Err` when a
    /// page failed to load. The rendering context is closed on every path,
    /// including this future being dropped mid-flight.
    pub async fn resolve_link(
        &self,
        link: &ClassifiedLink,
    ) -> Result<Option<ResolvedLink>, ResolveError> {
        info!(
            "Resolving {} (service={}, media={})",
            link.raw_url, link.service, link.media_type
        );

        if !link.is_valid() {
            return Err(ResolveError::InvalidUrl(link.raw_url.clone()));
        }

        if link.service.is_video_platform() {
            debug!("{} is already on the destination platform", link.raw_url);
            return Ok(passthrough(link));
        }

        let ctx = RenderContext::open(self.browser.as_ref())
            .await
            .map_err(|e| ResolveError::Browser(format!("{e:#}")))?;
        let outcome = self.walk(link, ctx.page()).await;
        ctx.release().await;

        match &outcome {
            Ok(Some(resolved)) => info!("Resolved {}: {:?}", link.raw_url, resolved),
            Ok(None) => warn!("No identity found for {}", link.raw_url),
            Err(e) => warn!("Resolution of {} failed: {}", link.raw_url, e),
        }
        outcome
    }

    async fn walk(
        &self,
        link: &ClassifiedLink,
        page: &dyn Page,
    ) -> Result<Option<ResolvedLink>, ResolveError> {
        let Some(identity) = self.extractors.extract(link, page).await else {
            return Ok(None);
        };
        let IdentityRecord {
            artist,
            album,
            track,
        } = identity;

        let Some(artist) = artist else {
            warn!("Identity for {} has no artist; cannot search", link.raw_url);
            return Ok(None);
        };

        let mut resolved = ResolvedLink::default();

        let search_url = build_search_url(&artist);
        self.navigate(page, &search_url).await?;
        let channels = self.collect(page, &Listing::channels()).await?;
        let Some(channel) = match_best(&artist, &channels) else {
            info!("No channel matched artist {:?}", artist);
            return Ok(Some(resolved));
        };
        resolved.artist_url = Some(channel.url.clone());

        if !link.media_type.needs_album() {
            return Ok(Some(resolved));
        }
        let Some(album) = album else {
            debug!("No album name to look for");
            return Ok(Some(resolved));
        };

        let releases_url = format!("{}/releases", channel.url.trim_end_matches('/'));
        self.navigate(page, &releases_url).await?;
        let releases = self.collect(page, &Listing::releases()).await?;
        let Some(release) = match_best(&album, &releases) else {
            info!("No release matched album {:?}", album);
            return Ok(Some(resolved));
        };
        resolved.album_url = Some(release.url.clone());

        self.navigate(page, &release.url).await?;
        resolved.thumbnail_url = self.thumbnail(page).await;

        if !link.media_type.needs_track() {
            return Ok(Some(resolved));
        }
        let Some(track) = track else {
            debug!("No track name to look for");
            return Ok(Some(resolved));
        };

        let tracks = self.collect(page, &Listing::playlist_tracks()).await?;
        match match_best(&track, &tracks) {
            Some(found) => resolved.track_url = Some(found.url.clone()),
            None => info!("No playlist entry matched track {:?}", track),
        }

        Ok(Some(resolved))
    }

    async fn navigate(&self, page: &dyn Page, url: &str) -> Result<(), ResolveError> {
        info!("Navigating to {}", url);
        page.goto(
            url,
            GotoOptions::new(WaitCondition::NetworkIdle, self.settings.navigation_timeout()),
        )
        .await
        .map_err(|e| ResolveError::navigation(url, format!("{e:#}")))
    }

    async fn collect(
        &self,
        page: &dyn Page,
        listing: &Listing,
    ) -> Result<Vec<CandidateItem>, ResolveError> {
        match collect_all(page, listing, &self.settings.collect).await {
            Ok(items) => Ok(items),
            Err(e) => {
                let at = page
                    .current_url()
                    .await
                    .unwrap_or_else(|_| listing.name.to_string());
                Err(ResolveError::navigation(at, format!("{e:#}")))
            }
        }
    }

    async fn thumbnail(&self, page: &dyn Page) -> Option<String> {
        match page.query_selector_attr(THUMBNAIL_SELECTOR, "src").await {
            Ok(src) => src.filter(|s| !s.trim().is_empty()),
            Err(e) => {
                warn!("Failed to read album art: {:#}", e);
                None
            }
        }
    }
}
