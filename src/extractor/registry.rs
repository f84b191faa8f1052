use crate::browser::Page;
use crate::classifier::ClassifiedLink;
use crate::extractor::meta::MetaTagExtractor;
use crate::extractor::models::IdentityRecord;
use crate::extractor::spotify::SpotifyExtractor;
use crate::extractor::traits::IdentityExtractor;
use crate::utils::config::ResolverSettings;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes each classified link to the adapter for its service
pub struct ExtractorRegistry {
    extractors: Vec<Arc<dyn IdentityExtractor>>,
}

impl ExtractorRegistry {
    pub fn new(extractors: Vec<Arc<dyn IdentityExtractor>>) -> Self {
        Self { extractors }
    }

    /// Meta-tag adapter for the statically described services, rendered
    /// adapter for Spotify
    pub fn standard(settings: &ResolverSettings) -> Result<Self> {
        let meta = Arc::new(MetaTagExtractor::new(
            &settings.user_agent,
            settings.navigation_timeout(),
        )?);
        let spotify = Arc::new(SpotifyExtractor::new(settings.navigation_timeout()));
        Ok(Self::new(vec![spotify, meta]))
    }

    /// First registered adapter that handles the link's service
    pub fn find(&self, link: &ClassifiedLink) -> Option<&Arc<dyn IdentityExtractor>> {
        let found = self
            .extractors
            .iter()
            .find(|extractor| extractor.supports(link.service));
        if let Some(extractor) = found {
            debug!("Routing {} to extractor: {}", link.service, extractor.id());
        }
        found
    }

    /// Identity of `link`, or `None` for unsupported services and failures
    pub async fn extract(&self, link: &ClassifiedLink, page: &dyn Page) -> Option<IdentityRecord> {
        match self.find(link) {
            Some(extractor) => extractor.extract(link, page).await,
            None => {
                warn!("No identity extractor for service: {}", link.service);
                None
            }
        }
    }
}
