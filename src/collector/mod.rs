//! Result collection from virtualized, infinitely scrolling listings

pub mod harness;
pub mod listing;
pub mod models;

pub use harness::collect_all;
pub use listing::Listing;
pub use models::{CandidateItem, CandidateSet, CollectOptions, ScrollState};
