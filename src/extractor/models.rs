//! Data structures for extracted identity

use serde::{Deserialize, Serialize};

/// Descriptive facts about a source link, as the provider displays them
///
/// Normalization happens in the matcher, never here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track: Option<String>,
}

impl IdentityRecord {
    /// Build from raw provider strings; blank values become `None`
    pub fn from_fields(
        artist: Option<String>,
        album: Option<String>,
        track: Option<String>,
    ) -> Self {
        Self {
            artist: non_blank(artist),
            album: non_blank(album),
            track: non_blank(track),
        }
    }

    pub fn artist_only(artist: impl Into<String>) -> Self {
        Self::from_fields(Some(artist.into()), None, None)
    }

    /// True when no field carries anything
    pub fn is_empty(&self) -> bool {
        self.artist.is_none() && self.album.is_none() && self.track.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
