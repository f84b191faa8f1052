//! Links that already live on the destination platform

use super::models::ResolvedLink;
use crate::classifier::{ClassifiedLink, MediaType};
use crate::query::to_playlist_url;
use url::Url;

/// Resolved URLs derived from the link itself, without any search
///
/// Playlists become canonical playlist pages, tracks and channels are
/// passed through. `None` when nothing can be derived.
pub fn passthrough(link: &ClassifiedLink) -> Option<ResolvedLink> {
    let url = Url::parse(link.raw_url.trim()).ok()?;
    let resolved = match link.media_type {
        MediaType::Album | MediaType::Playlist => ResolvedLink {
            album_url: Some(to_playlist_url(&url)?),
            ..Default::default()
        },
        MediaType::Track => ResolvedLink {
            track_url: Some(url.to_string()),
            ..Default::default()
        },
        MediaType::Artist => ResolvedLink {
            artist_url: Some(url.to_string()),
            ..Default::default()
        },
        MediaType::Unknown | MediaType::Invalid => return None,
    };
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    #[test]
    fn music_playlist_becomes_album() {
        let link = classify("https://music.youtube.com/playlist?list=OLAK5uy_abc");
        let resolved = passthrough(&link).unwrap();
        assert_eq!(
            resolved.album_url.as_deref(),
            Some("https://www.youtube.com/playlist?list=OLAK5uy_abc")
        );
        assert_eq!(resolved.track_url, None);
    }

    #[test]
    fn watch_link_is_the_track() {
        let link = classify("https://music.youtube.com/watch?v=abc");
        let resolved = passthrough(&link).unwrap();
        assert_eq!(resolved.track_url.as_deref(), Some("https://music.youtube.com/watch?v=abc"));
        assert_eq!(resolved.album_url, None);
    }

    #[test]
    fn channel_link_is_the_artist() {
        let link = classify("https://www.youtube.com/@thebeatles");
        assert_eq!(
            passthrough(&link).unwrap().artist_url.as_deref(),
            Some("https://www.youtube.com/@thebeatles")
        );
    }

    #[test]
    fn unknown_shape_derives_nothing() {
        let link = classify("https://www.youtube.com/feed/trending");
        assert!(passthrough(&link).is_none());
    }
}
