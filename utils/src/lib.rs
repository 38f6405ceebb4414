//! Shared utilities for the Authmatech verification flow.

pub mod logging;

pub use logging::{init_tracing, LogFormat};
