pub mod actor;
pub mod messages;

pub use actor::{spawn_resolver, ResolverActor};
pub use messages::{ResolveCommand, ResolveEvent};
