pub mod normalizer;
pub mod resolver;

pub use normalizer::{CanonicalEvent, CanonicalVenue};
pub use resolver::add_external_event;
