//! Link classification: which service a URL belongs to and what it points at

pub mod clean;
pub mod models;
pub mod rules;

pub use clean::{clean_link, prepare};
pub use models::{ClassifiedLink, MediaType, Service};
pub use rules::{classify, media_type_for, service_for_host};
