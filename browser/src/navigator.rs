//! Page navigation as an explicit capability.

use authmatech_types::Route;
use std::fmt;
use std::io::Write;
use url::Url;

use crate::error::BrowserError;

/// Where a navigation sent the visitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Full-page navigation to another origin; the current page unloads.
    External(Url),
    /// Client-side route change.
    Internal(Route),
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External(url) => write!(f, "redirect {url}"),
            Self::Internal(route) => write!(f, "navigate {route}"),
        }
    }
}

pub trait Navigator {
    /// Leave the page for `url`. Nothing after this runs in a real browser.
    fn redirect_external(&self, url: &Url) -> Result<(), BrowserError>;

    fn navigate_internal(&self, route: Route) -> Result<(), BrowserError>;
}

/// Navigator for terminal use: writes each navigation as a line to stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutNavigator;

impl StdoutNavigator {
    fn emit(&self, navigation: Navigation) -> Result<(), BrowserError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{navigation}").map_err(|e| BrowserError::Navigation(e.to_string()))
    }
}

impl Navigator for StdoutNavigator {
    fn redirect_external(&self, url: &Url) -> Result<(), BrowserError> {
        tracing::info!(%url, "redirecting to external page");
        self.emit(Navigation::External(url.clone()))
    }

    fn navigate_internal(&self, route: Route) -> Result<(), BrowserError> {
        tracing::info!(%route, "navigating");
        self.emit(Navigation::Internal(route))
    }
}
