//! Browser-side capabilities used by the verification flows.
//!
//! Page navigation, blocking alerts and device classification are side
//! effects a browser performs implicitly. Here each one is an explicit trait
//! injected into the flow controllers so tests can observe the chosen URL or
//! route without leaving the page.

pub mod device;
pub mod error;
pub mod location;
pub mod navigator;
pub mod notifier;

pub use device::{DeviceDetector, UserAgentDetector};
pub use error::BrowserError;
pub use location::{gateway_redirect_url, query_string, ReturnParams, SUCCESS_SENTINEL};
pub use navigator::{Navigation, Navigator, StdoutNavigator};
pub use notifier::{Notifier, StderrNotifier};
