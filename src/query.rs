//! Search and playlist URLs on the destination platform

use url::Url;

pub const PLATFORM_ORIGIN: &str = "https://www.youtube.com";

/// Search filter "Type: Channel" (percent-encoded protobuf)
pub const CHANNEL_FILTER: &str = "EgIQAg%3D%3D";

/// Search URL scoped to channel results for `artist`
///
/// The query is lower-cased and trimmed, percent-encoded with apostrophes
/// escaped, and spaces written as `+`.
pub fn build_search_url(artist: &str) -> String {
    let raw = artist.trim().to_lowercase();
    // urlencoding leaves only [A-Za-z0-9-._~] bare, so `'` becomes %27
    let encoded = urlencoding::encode(&raw).replace("%20", "+");
    format!("{PLATFORM_ORIGIN}/results?search_query={encoded}&sp={CHANNEL_FILTER}")
}

/// Canonical playlist page for a list id
pub fn playlist_url(list_id: &str) -> String {
    format!("{PLATFORM_ORIGIN}/playlist?list={list_id}")
}

/// Playlist page for a URL carrying a `list` parameter
pub fn to_playlist_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, value)| key == "list" && !value.is_empty())
        .map(|(_, value)| playlist_url(&value))
}

/// The same URL with its `list` parameter removed
pub fn without_list(url: &Url) -> String {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "list")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut stripped = url.clone();
    if kept.is_empty() {
        stripped.set_query(None);
    } else {
        stripped.query_pairs_mut().clear().extend_pairs(kept);
    }
    stripped.to_string()
}
