//! Data structures produced by the classifier

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source service of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Spotify,
    Youtube,
    YoutubeMusic,
    #[serde(rename = "applemusic")]
    AppleMusic,
    Soundcloud,
    Amazon,
    Tidal,
    Deezer,
    Qobuz,
    Discogs,
    Unknown,
    Invalid,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Spotify => "spotify",
            Service::Youtube => "youtube",
            Service::YoutubeMusic => "youtube_music",
            Service::AppleMusic => "applemusic",
            Service::Soundcloud => "soundcloud",
            Service::Amazon => "amazon",
            Service::Tidal => "tidal",
            Service::Deezer => "deezer",
            Service::Qobuz => "qobuz",
            Service::Discogs => "discogs",
            Service::Unknown => "unknown",
            Service::Invalid => "invalid",
        }
    }

    /// Links already hosted on the video platform
    pub fn is_video_platform(&self) -> bool {
        matches!(self, Service::Youtube | Service::YoutubeMusic)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let service = match s.trim().to_ascii_lowercase().as_str() {
            "spotify" => Service::Spotify,
            "youtube" => Service::Youtube,
            "youtube_music" => Service::YoutubeMusic,
            "applemusic" => Service::AppleMusic,
            "soundcloud" => Service::Soundcloud,
            "amazon" => Service::Amazon,
            "tidal" => Service::Tidal,
            "deezer" => Service::Deezer,
            "qobuz" => Service::Qobuz,
            "discogs" => Service::Discogs,
            "unknown" => Service::Unknown,
            "invalid" => Service::Invalid,
            other => return Err(format!("unrecognised service: {other}")),
        };
        Ok(service)
    }
}

/// Granularity of the content a link refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Track,
    Album,
    Artist,
    Playlist,
    Unknown,
    Invalid,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Track => "track",
            MediaType::Album => "album",
            MediaType::Artist => "artist",
            MediaType::Playlist => "playlist",
            MediaType::Unknown => "unknown",
            MediaType::Invalid => "invalid",
        }
    }

    /// Whether resolution has to descend into the artist's releases
    pub fn needs_album(&self) -> bool {
        matches!(self, MediaType::Album | MediaType::Track)
    }

    /// Whether resolution has to descend into the album's track listing
    pub fn needs_track(&self) -> bool {
        matches!(self, MediaType::Track)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let media = match s.trim().to_ascii_lowercase().as_str() {
            "track" => MediaType::Track,
            "album" => MediaType::Album,
            "artist" => MediaType::Artist,
            "playlist" => MediaType::Playlist,
            "unknown" => MediaType::Unknown,
            "invalid" => MediaType::Invalid,
            other => return Err(format!("unrecognised media type: {other}")),
        };
        Ok(media)
    }
}

/// A URL tagged with its service and media type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLink {
    pub raw_url: String,
    pub service: Service,
    pub media_type: MediaType,
}

impl ClassifiedLink {
    pub fn new(raw_url: impl Into<String>, service: Service, media_type: MediaType) -> Self {
        Self {
            raw_url: raw_url.into(),
            service,
            media_type,
        }
    }

    /// Both tags are usable for resolution
    pub fn is_valid(&self) -> bool {
        self.service != Service::Invalid && self.media_type != MediaType::Invalid
    }
}
