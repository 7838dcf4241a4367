//! Session lifecycle: the in-memory registry and its decorators.
//!
//! Three layers satisfy the same [`SessionBacking`] contract:
//!
//! 1. [`MemorySessionRegistry`] — the raw id → record mapping, no policy
//! 2. [`ExpiringSessionStore`] — hides records past the configured lifetime
//! 3. [`DurableSessionStore`] — mirrors records into persistent storage and
//!    a JSON snapshot for crash recovery
//!
//! [`SessionBacking`]: doorman_core::traits::SessionBacking

pub mod durable;
pub mod expiry;
pub mod registry;
pub mod snapshot;

pub use durable::DurableSessionStore;
pub use expiry::{ExpiringSessionStore, session_expired};
pub use registry::MemorySessionRegistry;
pub use snapshot::SnapshotFile;
