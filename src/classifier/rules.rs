//! Host and path heuristics for classification

use super::models::{ClassifiedLink, MediaType, Service};
use tracing::debug;
use url::Url;

/// Host fragments in priority order; more specific hosts come first
const HOST_TABLE: &[(&str, Service)] = &[
    ("spotify.com", Service::Spotify),
    ("music.youtube.com", Service::YoutubeMusic),
    ("youtube.com", Service::Youtube),
    ("youtu.be", Service::Youtube),
    ("apple.com", Service::AppleMusic),
    ("deezer.com", Service::Deezer),
    ("tidal.com", Service::Tidal),
    ("soundcloud.com", Service::Soundcloud),
    ("amazon.com", Service::Amazon),
    ("qobuz.com", Service::Qobuz),
    ("discogs.com", Service::Discogs),
];

/// Classify a raw URL. Pure: the same input always yields the same tags.
pub fn classify(raw: &str) -> ClassifiedLink {
    let parsed = match Url::parse(raw.trim()) {
        Ok(url) => url,
        Err(e) => {
            debug!("Could not parse {:?} as a URL: {}", raw, e);
            return ClassifiedLink::new(raw, Service::Invalid, MediaType::Invalid);
        }
    };

    let service = service_for_host(parsed.host_str().unwrap_or_default());
    let media_type = media_type_for(&parsed, service);
    ClassifiedLink::new(raw, service, media_type)
}

/// Map a hostname onto a service
pub fn service_for_host(host: &str) -> Service {
    let host = host.to_ascii_lowercase();
    HOST_TABLE
        .iter()
        .find(|(fragment, _)| host.contains(fragment))
        .map(|(_, service)| *service)
        .unwrap_or(Service::Unknown)
}

/// Service-specific media type rules over path segments and query parameters
pub fn media_type_for(url: &Url, service: Service) -> MediaType {
    let path = url.path().to_ascii_lowercase();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let has_param = |name: &str| url.query_pairs().any(|(key, _)| key == name);
    let has_segment = |name: &str| segments.contains(&name);

    match service {
        Service::Spotify => {
            if has_segment("album") {
                MediaType::Album
            } else if has_segment("track") {
                MediaType::Track
            } else if has_segment("playlist") {
                MediaType::Playlist
            } else if has_segment("artist") {
                MediaType::Artist
            } else {
                MediaType::Unknown
            }
        }
        Service::Youtube | Service::YoutubeMusic => {
            if has_param("list") {
                MediaType::Album
            } else if has_param("v") || path.starts_with("/watch") {
                MediaType::Track
            } else if path.starts_with("/channel/")
                || path.starts_with("/user/")
                || path.starts_with("/@")
            {
                MediaType::Artist
            } else {
                MediaType::Unknown
            }
        }
        Service::AppleMusic => {
            if path.contains("/artist/") {
                MediaType::Artist
            } else if path.contains("/album/") {
                // `?i=<id>` selects a single song on an album page
                if url.query().is_some_and(|q| !q.is_empty()) {
                    MediaType::Track
                } else {
                    MediaType::Album
                }
            } else {
                MediaType::Unknown
            }
        }
        Service::Deezer | Service::Tidal => {
            if has_segment("album") {
                MediaType::Album
            } else if has_segment("track") {
                MediaType::Track
            } else if has_segment("artist") {
                MediaType::Artist
            } else {
                MediaType::Unknown
            }
        }
        Service::Soundcloud => match segments.len() {
            1 => MediaType::Artist,
            2 => MediaType::Track,
            n if n >= 3 && segments[1] == "sets" => MediaType::Album,
            _ => MediaType::Unknown,
        },
        Service::Amazon => {
            if path.contains("/albums/") {
                if has_param("trackAsin") {
                    MediaType::Track
                } else {
                    MediaType::Album
                }
            } else if path.contains("/artists/") {
                MediaType::Artist
            } else {
                MediaType::Unknown
            }
        }
        Service::Qobuz => {
            if has_segment("album") {
                MediaType::Album
            } else if has_segment("track") {
                MediaType::Track
            } else {
                MediaType::Unknown
            }
        }
        Service::Discogs => {
            if has_segment("release") {
                MediaType::Track
            } else if has_segment("master") {
                MediaType::Album
            } else if has_segment("artist") {
                MediaType::Artist
            } else {
                MediaType::Unknown
            }
        }
        Service::Unknown | Service::Invalid => MediaType::Unknown,
    }
}
