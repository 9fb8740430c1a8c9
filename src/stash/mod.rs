//! Stash host integration.
//!
//! The pipeline only talks to the host through [`HostClient`]: one query for
//! the configured library roots and one mutation to trigger a metadata scan.

pub mod client;
pub mod types;

pub use client::{HostClient, StashClient, REQUEST_TIMEOUT};
pub use types::{ServerConnection, SessionCookie};
