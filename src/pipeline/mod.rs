//! End-to-end resolution of a source link to destination URLs

pub mod browse;
pub mod models;
pub mod passthrough;
pub mod resolver;

pub use browse::{expand_browse_url, is_browse_url};
pub use models::ResolvedLink;
pub use passthrough::passthrough;
pub use resolver::Resolver;
