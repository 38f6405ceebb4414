//! Root flow: device gate, silent number detection, confirmation.
//!
//! ```text
//! Init ─┬─ desktop ──▶ Desktop (QR code, terminal)
//!       └─ mobile ───▶ DetectingNumber ──(settled)──▶ Confirming ──▶ Verified
//! ```
//!
//! The desktop branch cannot fail: a landing URL too long for a QR code is
//! shown as text alone.
//!
//! Enrichment failure is logged and swallowed: the flow moves on to
//! `Confirming` with an empty candidate so the loader never hangs.

use authmatech_browser::{DeviceDetector, Notifier};
use authmatech_client::{ConfirmationApi, EnrichmentApi};
use authmatech_types::PhoneCandidate;
use std::cell::{Cell, OnceCell};
use std::fmt;
use std::sync::Arc;

use crate::confirm::{ConfirmOutcome, PhoneConfirmation};
use crate::error::FlowError;
use crate::views::{QrImage, View};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowState {
    Init,
    Desktop,
    DetectingNumber,
    Confirming,
    Verified,
}

impl FlowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Desktop => "desktop",
            Self::DetectingNumber => "detecting-number",
            Self::Confirming => "confirming",
            Self::Verified => "verified",
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities the root flow needs.
pub struct RootDeps {
    pub device: Arc<dyn DeviceDetector + Send + Sync>,
    pub enrichment: Arc<dyn EnrichmentApi + Send + Sync>,
    pub confirmation: Arc<dyn ConfirmationApi + Send + Sync>,
    pub notifier: Arc<dyn Notifier + Send + Sync>,
}

pub struct RootFlow {
    landing_url: String,
    deps: RootDeps,
    state: Cell<FlowState>,
    qr: OnceCell<Option<QrImage>>,
    screen: OnceCell<PhoneConfirmation>,
}

impl RootFlow {
    pub fn new(landing_url: impl Into<String>, deps: RootDeps) -> Self {
        Self {
            landing_url: landing_url.into(),
            deps,
            state: Cell::new(FlowState::Init),
            qr: OnceCell::new(),
            screen: OnceCell::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state.get()
    }

    /// The confirmation screen, once the flow has reached it.
    pub fn confirmation(&self) -> Option<&PhoneConfirmation> {
        self.screen.get()
    }

    /// Mount: classify the device and, on mobile, detect the number.
    ///
    /// Runs once per controller; a reload means a new `RootFlow`.
    pub async fn start(&self) -> Result<FlowState, FlowError> {
        if self.state.get() != FlowState::Init {
            return Err(FlowError::InvalidState(self.state.get().as_str()));
        }

        let device = self.deps.device.device_class();
        tracing::debug!(%device, "classified device");

        if !device.is_mobile() {
            let qr = match QrImage::encode(&self.landing_url) {
                Ok(qr) => Some(qr),
                Err(e) => {
                    tracing::warn!(error = %e, "showing landing URL without a QR code");
                    None
                }
            };
            let _ = self.qr.set(qr);
            self.state.set(FlowState::Desktop);
            return Ok(FlowState::Desktop);
        }

        self.state.set(FlowState::DetectingNumber);
        let candidate = match self.deps.enrichment.fetch_candidate().await {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::warn!(error = %e, "error fetching mobile number");
                PhoneCandidate::empty()
            }
        };

        let screen = PhoneConfirmation::new(
            candidate,
            Arc::clone(&self.deps.confirmation),
            Arc::clone(&self.deps.notifier),
        );
        let _ = self.screen.set(screen);
        self.state.set(FlowState::Confirming);
        Ok(FlowState::Confirming)
    }

    /// User pressed "Yes, Continue".
    pub async fn confirm(&self) -> Result<ConfirmOutcome, FlowError> {
        let screen = match (self.state.get(), self.screen.get()) {
            (FlowState::Confirming, Some(screen)) => screen,
            (state, _) => return Err(FlowError::InvalidState(state.as_str())),
        };

        let outcome = screen.confirm().await?;
        if outcome == ConfirmOutcome::Confirmed {
            self.state.set(FlowState::Verified);
        }
        Ok(outcome)
    }

    pub fn view(&self) -> View {
        match (self.state.get(), self.qr.get(), self.screen.get()) {
            (FlowState::Desktop, Some(qr), _) => View::Desktop {
                url: self.landing_url.clone(),
                qr: qr.clone(),
            },
            (FlowState::Confirming, _, Some(screen)) => screen.view(),
            (FlowState::Verified, _, _) => View::Success,
            _ => View::Loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::MISMATCH_ALERT;
    use authmatech_nullables::{NullApi, NullDevice, NullNotifier, NullResponse};

    struct Harness {
        flow: RootFlow,
        api: Arc<NullApi>,
        device: Arc<NullDevice>,
        notifier: Arc<NullNotifier>,
    }

    fn harness(device: NullDevice, api: NullApi) -> Harness {
        let api = Arc::new(api);
        let device = Arc::new(device);
        let notifier = Arc::new(NullNotifier::new());
        let flow = RootFlow::new(
            "https://www.authmatech.com",
            RootDeps {
                device: device.clone(),
                enrichment: api.clone(),
                confirmation: api.clone(),
                notifier: notifier.clone(),
            },
        );
        Harness {
            flow,
            api,
            device,
            notifier,
        }
    }

    #[tokio::test]
    async fn desktop_shows_qr_without_network() {
        let h = harness(NullDevice::desktop(), NullApi::new());
        assert_eq!(h.flow.start().await.unwrap(), FlowState::Desktop);
        assert_eq!(h.api.enrichment_calls(), 0);
        assert_eq!(h.device.probes(), 1);
        match h.flow.view() {
            View::Desktop { url, qr: Some(qr) } => {
                assert_eq!(url, "https://www.authmatech.com");
                assert_eq!(qr.value, url);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[tokio::test]
    async fn desktop_without_encodable_url_still_reaches_desktop() {
        let landing = format!("https://www.authmatech.com/{}", "a".repeat(8000));
        let api = Arc::new(NullApi::new());
        let flow = RootFlow::new(
            landing.clone(),
            RootDeps {
                device: Arc::new(NullDevice::desktop()),
                enrichment: api.clone(),
                confirmation: api.clone(),
                notifier: Arc::new(NullNotifier::new()),
            },
        );

        assert_eq!(flow.start().await.unwrap(), FlowState::Desktop);
        assert_eq!(flow.view(), View::Desktop { url: landing, qr: None });
        assert_eq!(api.enrichment_calls(), 0);
    }

    #[tokio::test]
    async fn mobile_detects_then_confirms() {
        let api = NullApi::new()
            .with_candidate(NullResponse::Ok(PhoneCandidate::new("791234567", "+962")))
            .confirming(true);
        let h = harness(NullDevice::mobile(), api);

        assert_eq!(h.flow.view(), View::Loading);
        assert_eq!(h.flow.start().await.unwrap(), FlowState::Confirming);
        assert_eq!(
            h.flow.view(),
            View::Confirm {
                country_code: "+962".into(),
                mobile: "791234567".into()
            }
        );

        assert_eq!(h.flow.confirm().await.unwrap(), ConfirmOutcome::Confirmed);
        assert_eq!(h.flow.state(), FlowState::Verified);
        assert_eq!(h.flow.view(), View::Success);
    }

    #[tokio::test]
    async fn enrichment_failure_still_reaches_confirming() {
        let api = NullApi::new().with_candidate(NullResponse::Malformed("not json".into()));
        let h = harness(NullDevice::mobile(), api);

        assert_eq!(h.flow.start().await.unwrap(), FlowState::Confirming);
        assert_eq!(
            h.flow.confirmation().map(|s| s.candidate().clone()),
            Some(PhoneCandidate::empty())
        );
        assert_eq!(h.api.enrichment_calls(), 1);
    }

    #[tokio::test]
    async fn mismatch_keeps_confirming() {
        let api = NullApi::new()
            .with_candidate(NullResponse::Ok(PhoneCandidate::new("791", "+962")))
            .confirming(false);
        let h = harness(NullDevice::mobile(), api);
        h.flow.start().await.unwrap();

        assert_eq!(h.flow.confirm().await.unwrap(), ConfirmOutcome::Mismatch);
        assert_eq!(h.flow.state(), FlowState::Confirming);
        assert_eq!(h.notifier.alerts(), vec![MISMATCH_ALERT]);
    }

    #[tokio::test]
    async fn start_runs_once() {
        let h = harness(NullDevice::desktop(), NullApi::new());
        h.flow.start().await.unwrap();
        assert!(matches!(
            h.flow.start().await,
            Err(FlowError::InvalidState("desktop"))
        ));
        assert_eq!(h.device.probes(), 1);
    }

    #[tokio::test]
    async fn confirm_before_start_is_rejected() {
        let h = harness(NullDevice::mobile(), NullApi::new());
        assert!(matches!(
            h.flow.confirm().await,
            Err(FlowError::InvalidState("init"))
        ));
    }

    #[tokio::test]
    async fn verified_is_terminal() {
        let api = NullApi::new()
            .with_candidate(NullResponse::Ok(PhoneCandidate::new("791", "+962")))
            .confirming(true);
        let h = harness(NullDevice::mobile(), api);
        h.flow.start().await.unwrap();
        h.flow.confirm().await.unwrap();
        assert!(matches!(
            h.flow.confirm().await,
            Err(FlowError::InvalidState("verified"))
        ));
        assert_eq!(h.api.confirm_requests().len(), 1);
    }
}
