//! Nullable infrastructure for deterministic testing.
//!
//! Every side effect the flows perform (local storage, page navigation,
//! alerts, device probing, backend calls) sits behind a trait. This crate
//! provides test-friendly implementations that:
//! - Return scripted values
//! - Record what was asked of them, for assertions
//! - Never touch the filesystem, the network or a real browser
//!
//! Usage: swap real implementations for nullables in tests.

pub mod api;
pub mod browser;
pub mod store;

pub use api::{NullApi, NullResponse};
pub use browser::{NullDevice, NullNavigator, NullNotifier};
pub use store::NullStore;
