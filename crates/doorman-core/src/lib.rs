//! # doorman-core
//!
//! Core crate for Doorman. Contains configuration schemas, the
//! session-backing capability trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Doorman crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
