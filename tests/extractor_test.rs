//! Rendered-page identity extraction and adapter routing.

mod common;

use common::{FakeBrowser, FakeDoc, FixedIdentity};
use std::sync::Arc;
use std::time::Duration;
use tubelink::classifier::classify;
use tubelink::extractor::{IdentityExtractor, SpotifyExtractor};
use tubelink::{ExtractorRegistry, IdentityRecord};

const ALBUM: &str = "https://open.spotify.com/album/0ETFjACtuP2ADo6LFhL6HN";
const TRACK: &str = "https://open.spotify.com/track/6dGnYIeXmHdcikdzNNDMm2";
const ARTIST: &str = "https://open.spotify.com/artist/3WrFJ7ztbogyGnTHbHJFl2";

const CREATOR_LINK: &str = r#"a[data-testid="creator-link"]"#;
const HEADING: &str = r#"section h1[data-encore-id="text"]"#;
const TRACK_TITLE: &str = r#"section span > h1[data-encore-id="text"]"#;
const TRACK_ALBUM: &str = r#"section span[data-encore-id="text"]:nth-child(3) > a"#;

fn spotify() -> SpotifyExtractor {
    SpotifyExtractor::new(Duration::from_secs(5))
}

#[tokio::test]
async fn album_page_yields_artist_and_album() {
    let browser = FakeBrowser::new().with_doc(
        ALBUM,
        FakeDoc::default()
            .text(CREATOR_LINK, "The Beatles")
            .text(HEADING, "Sgt. Pepper\u{2019}s Lonely Hearts Club Band"),
    );
    let page = browser.page_at("about:blank");

    let record = spotify().try_extract(&classify(ALBUM), &page).await.unwrap();

    assert_eq!(record.artist.as_deref(), Some("The Beatles"));
    assert_eq!(
        record.album.as_deref(),
        Some("Sgt. Pepper's Lonely Hearts Club Band")
    );
    assert_eq!(record.track, None);
    assert_eq!(browser.gotos(), vec![ALBUM.to_string()]);
}

#[tokio::test]
async fn track_page_yields_all_three() {
    let browser = FakeBrowser::new().with_doc(
        TRACK,
        FakeDoc::default()
            .text(CREATOR_LINK, "The Beatles")
            .text(TRACK_ALBUM, "Abbey Road (Remastered)")
            .text(TRACK_TITLE, "Come Together - Remastered 2009"),
    );
    let page = browser.page_at("about:blank");

    let record = spotify().try_extract(&classify(TRACK), &page).await.unwrap();

    assert_eq!(record.artist.as_deref(), Some("The Beatles"));
    assert_eq!(record.album.as_deref(), Some("Abbey Road (Remastered)"));
    assert_eq!(record.track.as_deref(), Some("Come Together - Remastered 2009"));
}

#[tokio::test]
async fn artist_page_reads_the_heading() {
    let browser =
        FakeBrowser::new().with_doc(ARTIST, FakeDoc::default().text(HEADING, "Daft Punk"));
    let page = browser.page_at("about:blank");

    let record = spotify().try_extract(&classify(ARTIST), &page).await.unwrap();

    assert_eq!(record, IdentityRecord::artist_only("Daft Punk"));
}

#[tokio::test]
async fn missing_anchor_is_no_identity() {
    let browser = FakeBrowser::new().with_doc(ALBUM, FakeDoc::default());
    let page = browser.page_at("about:blank");
    let link = classify(ALBUM);

    assert!(spotify().try_extract(&link, &page).await.is_err());
    assert_eq!(spotify().extract(&link, &page).await, None);
}

#[tokio::test]
async fn playlists_are_not_supported() {
    let browser = FakeBrowser::new();
    let page = browser.page_at("about:blank");
    let link = classify("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M");

    assert!(spotify().try_extract(&link, &page).await.is_err());
    assert!(browser.gotos().is_empty());
}

#[tokio::test]
async fn registry_routes_to_first_supporting_adapter() {
    let first: Arc<dyn IdentityExtractor> = Arc::new(spotify());
    let fallback: Arc<dyn IdentityExtractor> =
        Arc::new(FixedIdentity(Some(IdentityRecord::artist_only("Fallback"))));
    let registry = ExtractorRegistry::new(vec![first, fallback]);

    let spotify_link = classify(ALBUM);
    let deezer_link = classify("https://www.deezer.com/album/302127");
    assert_eq!(registry.find(&spotify_link).unwrap().id(), "spotify-rendered");
    assert_eq!(registry.find(&deezer_link).unwrap().id(), "fixed");

    let browser = FakeBrowser::new();
    let page = browser.page_at("about:blank");
    assert_eq!(
        registry.extract(&deezer_link, &page).await,
        Some(IdentityRecord::artist_only("Fallback"))
    );
}

#[tokio::test]
async fn empty_registry_finds_nothing() {
    let registry = ExtractorRegistry::new(Vec::new());
    let browser = FakeBrowser::new();
    let page = browser.page_at("about:blank");

    assert_eq!(registry.extract(&classify(ALBUM), &page).await, None);
}
