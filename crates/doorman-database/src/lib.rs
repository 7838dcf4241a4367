//! # doorman-database
//!
//! PostgreSQL connection management and the record store capabilities:
//! [`users::UserStore`] for credential records and
//! [`sessions::UserSessionStore`] for durable session records. Each trait
//! ships a Postgres implementation and an in-memory implementation; the
//! memory variants back the tests and single-process setups.

pub mod connection;
pub mod migration;
pub mod sessions;
pub mod users;

pub use connection::DatabasePool;
