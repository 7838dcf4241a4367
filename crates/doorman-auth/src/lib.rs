//! # doorman-auth
//!
//! Credential verification, session lifecycle, and password-reset flows
//! for the Doorman service.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and verification
//! - `session` — session registry plus the expiry and durable decorators
//! - `basic` — stateless `Authorization: Basic` credential handling
//! - `service` — the orchestrating [`AuthService`] facade

pub mod basic;
pub mod password;
pub mod service;
pub mod session;

pub use basic::{BasicAuthenticator, BasicCredentials, extract_credentials};
pub use password::PasswordHasher;
pub use service::AuthService;
pub use session::{DurableSessionStore, ExpiringSessionStore, MemorySessionRegistry};
