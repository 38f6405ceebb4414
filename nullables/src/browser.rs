//! Nullable browser capabilities: record navigations and alerts instead of
//! performing them.

use authmatech_browser::{BrowserError, DeviceDetector, Navigation, Navigator, Notifier};
use authmatech_types::{DeviceClass, Route};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use url::Url;

/// A navigator that records every navigation.
pub struct NullNavigator {
    history: Mutex<Vec<Navigation>>,
    failing: AtomicBool,
}

impl NullNavigator {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent navigation fail.
    pub fn make_failing(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// All navigations so far, oldest first.
    pub fn history(&self) -> Vec<Navigation> {
        self.history.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.history.lock().unwrap().last().cloned()
    }

    fn record(&self, navigation: Navigation) -> Result<(), BrowserError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BrowserError::Navigation("navigation blocked".into()));
        }
        self.history.lock().unwrap().push(navigation);
        Ok(())
    }
}

impl Default for NullNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for NullNavigator {
    fn redirect_external(&self, url: &Url) -> Result<(), BrowserError> {
        self.record(Navigation::External(url.clone()))
    }

    fn navigate_internal(&self, route: Route) -> Result<(), BrowserError> {
        self.record(Navigation::Internal(route))
    }
}

/// A notifier that records alert messages.
#[derive(Default)]
pub struct NullNotifier {
    alerts: Mutex<Vec<String>>,
}

impl NullNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for NullNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// A device detector with a fixed answer that counts how often it is asked.
pub struct NullDevice {
    class: DeviceClass,
    probes: AtomicUsize,
}

impl NullDevice {
    pub fn mobile() -> Self {
        Self::new(DeviceClass::Mobile)
    }

    pub fn desktop() -> Self {
        Self::new(DeviceClass::Desktop)
    }

    pub fn new(class: DeviceClass) -> Self {
        Self {
            class,
            probes: AtomicUsize::new(0),
        }
    }

    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl DeviceDetector for NullDevice {
    fn device_class(&self) -> DeviceClass {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.class
    }
}
