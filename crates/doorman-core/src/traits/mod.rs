//! Capability traits implemented across Doorman crates.

pub mod session_backing;

pub use session_backing::{SessionBacking, SessionRecord};
