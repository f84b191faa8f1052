use serde::{Deserialize, Serialize};

/// Destination URLs found for a source link
///
/// Fields fill in depth by depth (artist, album and thumbnail, track); a
/// field stays `None` when its step failed or was not needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLink {
    pub artist_url: Option<String>,
    pub album_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub track_url: Option<String>,
}

impl ResolvedLink {
    /// Nothing was resolved at any depth
    pub fn is_empty(&self) -> bool {
        self.artist_url.is_none()
            && self.album_url.is_none()
            && self.thumbnail_url.is_none()
            && self.track_url.is_none()
    }

    /// Most specific URL available, used for one-line summaries
    pub fn best_url(&self) -> Option<&str> {
        self.track_url
            .as_deref()
            .or(self.album_url.as_deref())
            .or(self.artist_url.as_deref())
    }
}
