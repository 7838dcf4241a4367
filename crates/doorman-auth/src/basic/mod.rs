//! Stateless `Authorization: Basic` credential handling.

pub mod authenticator;
pub mod credentials;

pub use authenticator::BasicAuthenticator;
pub use credentials::{BasicCredentials, extract_credentials};
