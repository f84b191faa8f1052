//! Identity extraction: what a source link is, in artist/album/track terms

pub mod meta;
pub mod models;
pub mod registry;
pub mod spotify;
pub mod traits;

pub use meta::MetaTagExtractor;
pub use models::IdentityRecord;
pub use registry::ExtractorRegistry;
pub use spotify::SpotifyExtractor;
pub use traits::IdentityExtractor;
