//! Durable session record entity.

pub mod model;

pub use model::UserSession;
