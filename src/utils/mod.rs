//! Utility modules for error handling, configuration and logging

pub mod config;
pub mod error;
pub mod logging;

// Re-export for convenience
pub use config::ResolverSettings;
pub use error::ResolveError;
pub use logging::init_logging;
