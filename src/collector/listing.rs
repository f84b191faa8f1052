//! The listings walked at each resolution depth

use crate::browser::{Field, ItemQuery};
use crate::query::{to_playlist_url, without_list};
use url::Url;

pub const CONTINUATION_SELECTOR: &str = "ytd-continuation-item-renderer";

/// Turns a raw link read from the page into the candidate's URL
pub type UrlResolver = fn(Option<&Url>, &str) -> Option<String>;

/// What to read from a listing page and how to key its items
#[derive(Clone)]
pub struct Listing {
    pub name: &'static str,
    pub query: ItemQuery,
    pub continuation: String,
    pub resolve_url: UrlResolver,
}

impl Listing {
    /// Channel results on a search page
    pub fn channels() -> Self {
        Self {
            name: "channels",
            query: ItemQuery {
                item: "ytd-channel-renderer".to_string(),
                title: Field::text("#text.ytd-channel-name"),
                url: Field::attr("a#main-link", "href"),
            },
            continuation: CONTINUATION_SELECTOR.to_string(),
            resolve_url: |base, raw| absolutize(base, raw).map(|url| url.to_string()),
        }
    }

    /// Albums and singles on a channel's releases tab, keyed by playlist
    pub fn releases() -> Self {
        Self {
            name: "releases",
            query: ItemQuery {
                item: "ytd-rich-item-renderer".to_string(),
                title: Field::attr("#video-title-link", "title"),
                url: Field::attr("#video-title-link", "href"),
            },
            continuation: CONTINUATION_SELECTOR.to_string(),
            resolve_url: |base, raw| absolutize(base, raw).and_then(|url| to_playlist_url(&url)),
        }
    }

    /// Videos of a playlist, keyed by their URL outside the playlist
    pub fn playlist_tracks() -> Self {
        Self {
            name: "playlist",
            query: ItemQuery {
                item: "ytd-playlist-video-renderer".to_string(),
                title: Field::attr("#video-title", "title"),
                url: Field::attr("#video-title", "href"),
            },
            continuation: CONTINUATION_SELECTOR.to_string(),
            resolve_url: |base, raw| absolutize(base, raw).map(|url| without_list(&url)),
        }
    }
}

/// Resolve `raw` against the page URL; empty links resolve to nothing
pub fn absolutize(base: Option<&Url>, raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match base {
        Some(base) => base.join(raw).ok(),
        None => Url::parse(raw).ok(),
    }
}
