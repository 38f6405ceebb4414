//! Phone confirmation screen: "Is this your mobile?"

use authmatech_browser::Notifier;
use authmatech_client::{ConfirmRequest, ConfirmationApi};
use authmatech_types::PhoneCandidate;
use std::cell::Cell;
use std::sync::Arc;

use crate::error::FlowError;
use crate::flag::ClearOnDrop;
use crate::views::View;

/// Alert shown when the backend rejects the detected number.
pub const MISMATCH_ALERT: &str = "Mobile mismatch";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Backend accepted the number; the parent may complete.
    Confirmed,
    /// Backend rejected it. An alert was shown; the user may retry.
    Mismatch,
    /// A confirmation request is already in flight; nothing was sent.
    Busy,
}

pub struct PhoneConfirmation {
    candidate: PhoneCandidate,
    api: Arc<dyn ConfirmationApi + Send + Sync>,
    notifier: Arc<dyn Notifier + Send + Sync>,
    in_flight: Cell<bool>,
}

impl PhoneConfirmation {
    pub fn new(
        candidate: PhoneCandidate,
        api: Arc<dyn ConfirmationApi + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self {
            candidate,
            api,
            notifier,
            in_flight: Cell::new(false),
        }
    }

    pub fn candidate(&self) -> &PhoneCandidate {
        &self.candidate
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Send the displayed number for confirmation.
    ///
    /// Transport and parse failures are returned to the caller unhandled:
    /// no alert is shown and the screen stays as it was.
    pub async fn confirm(&self) -> Result<ConfirmOutcome, FlowError> {
        let Some(_guard) = ClearOnDrop::acquire(&self.in_flight) else {
            tracing::debug!("confirmation already in flight");
            return Ok(ConfirmOutcome::Busy);
        };

        let request = ConfirmRequest {
            mobile: self.candidate.mobile.clone(),
        };
        let response = self.api.confirm_mobile(&request).await?;

        if response.success {
            tracing::info!("mobile number confirmed");
            Ok(ConfirmOutcome::Confirmed)
        } else {
            tracing::info!("mobile number rejected");
            self.notifier.alert(MISMATCH_ALERT);
            Ok(ConfirmOutcome::Mismatch)
        }
    }

    pub fn view(&self) -> View {
        View::Confirm {
            country_code: self.candidate.country_code.clone(),
            mobile: self.candidate.mobile.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authmatech_client::{ClientError, ConfirmResponse};
    use authmatech_nullables::{NullApi, NullNotifier, NullResponse};

    fn screen(api: Arc<NullApi>, notifier: Arc<NullNotifier>) -> PhoneConfirmation {
        PhoneConfirmation::new(PhoneCandidate::new("0791234567", "+962"), api, notifier)
    }

    #[tokio::test]
    async fn success_confirms_without_alert() {
        let api = Arc::new(NullApi::new().confirming(true));
        let notifier = Arc::new(NullNotifier::new());
        let s = screen(api.clone(), notifier.clone());

        assert_eq!(s.confirm().await.unwrap(), ConfirmOutcome::Confirmed);
        assert_eq!(api.confirm_requests()[0].mobile, "0791234567");
        assert!(notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn rejection_alerts_and_allows_retry() {
        let api = Arc::new(NullApi::new().confirming(false));
        let notifier = Arc::new(NullNotifier::new());
        let s = screen(api.clone(), notifier.clone());

        assert_eq!(s.confirm().await.unwrap(), ConfirmOutcome::Mismatch);
        assert_eq!(s.confirm().await.unwrap(), ConfirmOutcome::Mismatch);
        assert_eq!(notifier.alerts(), vec![MISMATCH_ALERT, MISMATCH_ALERT]);
        assert_eq!(api.confirm_requests().len(), 2);
    }

    #[tokio::test]
    async fn null_success_from_backend_alerts_mismatch() {
        let response: ConfirmResponse = serde_json::from_str(r#"{"success":null}"#).unwrap();
        let api = Arc::new(NullApi::new().with_confirmation(NullResponse::Ok(response)));
        let notifier = Arc::new(NullNotifier::new());
        let s = screen(api, notifier.clone());

        assert_eq!(s.confirm().await.unwrap(), ConfirmOutcome::Mismatch);
        assert_eq!(notifier.alerts(), vec![MISMATCH_ALERT]);
    }

    #[tokio::test]
    async fn transport_failure_propagates_without_alert() {
        let api = Arc::new(
            NullApi::new().with_confirmation(NullResponse::Transport("offline".into())),
        );
        let notifier = Arc::new(NullNotifier::new());
        let s = screen(api, notifier.clone());

        let err = s.confirm().await.unwrap_err();
        assert!(matches!(err, FlowError::Client(ClientError::Transport(_))));
        assert!(notifier.alerts().is_empty());
        assert!(!s.is_in_flight());
    }

    #[tokio::test]
    async fn second_confirm_while_in_flight_is_ignored() {
        let api = Arc::new(NullApi::new().confirming(true));
        let s = screen(api.clone(), Arc::new(NullNotifier::new()));

        let (first, second) = tokio::join!(s.confirm(), s.confirm());
        assert_eq!(first.unwrap(), ConfirmOutcome::Confirmed);
        assert_eq!(second.unwrap(), ConfirmOutcome::Busy);
        assert_eq!(api.confirm_requests().len(), 1);
    }

    #[test]
    fn view_shows_candidate_fields() {
        let s = PhoneConfirmation::new(
            PhoneCandidate::empty(),
            Arc::new(NullApi::new()),
            Arc::new(NullNotifier::new()),
        );
        assert_eq!(
            s.view(),
            View::Confirm {
                country_code: String::new(),
                mobile: String::new()
            }
        );
    }
}
