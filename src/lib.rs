//! tubelink library
//!
//! Finds the destination-platform equivalent (channel, album playlist,
//! thumbnail, track) of a track, album or artist link from another music
//! service.

pub mod backend;
pub mod browser;
pub mod classifier;
pub mod collector;
pub mod extractor;
pub mod matcher;
pub mod pipeline;
pub mod query;
pub mod utils;

// Re-export main types for easier use
pub use backend::{spawn_resolver, ResolveCommand, ResolveEvent, ResolverActor};
pub use browser::{rendering_browser, Browser, HttpPage, Page, RenderContext, Session};
pub use classifier::{classify, ClassifiedLink, MediaType, Service};
pub use collector::{collect_all, CandidateItem, CollectOptions, Listing};
pub use extractor::{ExtractorRegistry, IdentityExtractor, IdentityRecord};
pub use matcher::{match_best, normalize};
pub use pipeline::{ResolvedLink, Resolver};
pub use query::build_search_url;
pub use utils::{ResolveError, ResolverSettings};
