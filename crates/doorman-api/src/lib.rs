//! # doorman-api
//!
//! Thin HTTP route layer for Doorman: JSON handlers that parse input,
//! call the auth facade, and map domain errors to status codes. No
//! business logic lives here.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
