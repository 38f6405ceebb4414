//! Country-code verification screen.
//!
//! Two halves share one screen:
//! - **Submit**: the visitor picks a country and types a local number. The
//!   normalized number is parked in local storage under
//!   [`PENDING_PHONE_KEY`] and the page leaves for the partner gateway.
//! - **Return**: the gateway sends the visitor back with `e` (encrypted
//!   number) and `ec` (error code). On `ec=0` the parked number and `e` go to
//!   the verification endpoint and the visitor lands on the success or
//!   failure route.
//!
//! Storage is cleared only after the endpoint answers. Any failure before
//! that leaves the pending number in place. Once the answer is in, the
//! number is spent: a later navigation failure does not restore it.

use authmatech_browser::{gateway_redirect_url, query_string, Navigator, ReturnParams};
use authmatech_client::{VerificationApi, VerifyRequest};
use authmatech_store::{KeyValueStore, PENDING_PHONE_KEY};
use authmatech_types::{filter_countries, Country, PendingPhoneNumber, Route};
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use url::Url;

use crate::config::FlowConfig;
use crate::error::FlowError;
use crate::flag::ClearOnDrop;
use crate::views::{FormView, View};

pub const VERIFY_ERROR: &str = "Failed to verify your number. Please try again.";
pub const REDIRECT_ERROR: &str = "Failed to redirect to verification service.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The pending number was stored and the page left for the gateway.
    Redirected(Url),
    /// A submission or return verification is already running.
    Busy,
    /// Nothing but whitespace was entered.
    EmptyInput,
    /// Storing or redirecting failed; the error message is set.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// No `ec` parameter: an ordinary visit.
    NotAReturn,
    /// This query string was already handled.
    AlreadyHandled,
    /// A return verification is still running.
    Busy,
    /// `ec` was not the success sentinel, or `e` was missing.
    GatewayError,
    /// Successful return but nothing was parked in storage.
    MissingPendingNumber,
    /// The endpoint or storage failed before an answer was recorded.
    Failed,
    /// The endpoint answered and the pending number was cleared, but the
    /// route change failed.
    NavigationFailed(Route),
    /// The endpoint answered and the visitor was routed.
    Routed(Route),
}

/// Capabilities the verification screen needs.
pub struct VerifyDeps {
    pub store: Arc<dyn KeyValueStore + Send + Sync>,
    pub navigator: Arc<dyn Navigator + Send + Sync>,
    pub api: Arc<dyn VerificationApi + Send + Sync>,
}

pub struct VerifyNumberScreen {
    config: FlowConfig,
    deps: VerifyDeps,
    selected: Cell<&'static Country>,
    query: RefCell<String>,
    phone_input: RefCell<String>,
    loading: Cell<bool>,
    focused: Cell<bool>,
    processing_return: Cell<bool>,
    error: RefCell<Option<String>>,
    last_search: RefCell<Option<String>>,
}

impl VerifyNumberScreen {
    pub fn new(config: FlowConfig, deps: VerifyDeps) -> Self {
        Self {
            config,
            deps,
            selected: Cell::new(Country::default_selection()),
            query: RefCell::new(String::new()),
            phone_input: RefCell::new(String::new()),
            loading: Cell::new(false),
            focused: Cell::new(false),
            processing_return: Cell::new(false),
            error: RefCell::new(None),
            last_search: RefCell::new(None),
        }
    }

    // ── Combobox ────────────────────────────────────────────────────────

    pub fn selected_country(&self) -> &'static Country {
        self.selected.get()
    }

    pub fn query(&self) -> String {
        self.query.borrow().clone()
    }

    pub fn set_query(&self, query: impl Into<String>) {
        *self.query.borrow_mut() = query.into();
    }

    pub fn focus(&self) {
        self.focused.set(true);
    }

    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    /// Choosing an option also closes the list.
    pub fn select_country(&self, country: &'static Country) {
        self.selected.set(country);
        self.focused.set(false);
    }

    /// The option list finished closing; the filter resets.
    pub fn close_options(&self) {
        self.focused.set(false);
        self.query.borrow_mut().clear();
    }

    pub fn options(&self) -> Vec<&'static Country> {
        filter_countries(&self.query.borrow())
    }

    pub fn nothing_found(&self) -> bool {
        !self.query.borrow().is_empty() && self.options().is_empty()
    }

    pub fn display_value(&self) -> String {
        self.selected.get().to_string()
    }

    // ── Phone input ─────────────────────────────────────────────────────

    pub fn phone_input(&self) -> String {
        self.phone_input.borrow().clone()
    }

    pub fn set_phone_input(&self, input: impl Into<String>) {
        *self.phone_input.borrow_mut() = input.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.loading.get() && !self.phone_input.borrow().trim().is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_processing_return(&self) -> bool {
        self.processing_return.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    fn set_error(&self, message: &str) {
        *self.error.borrow_mut() = Some(message.to_string());
    }

    // ── Submit ──────────────────────────────────────────────────────────

    /// Park the normalized number and leave for the partner gateway.
    ///
    /// On success `loading` stays set: the page is unloading and the form
    /// must not accept a second submission.
    pub fn submit(&self) -> SubmitOutcome {
        if self.loading.get() {
            tracing::debug!("submission ignored while loading");
            return SubmitOutcome::Busy;
        }
        if self.phone_input.borrow().trim().is_empty() {
            return SubmitOutcome::EmptyInput;
        }

        self.loading.set(true);
        let pending =
            PendingPhoneNumber::from_parts(self.selected.get(), &self.phone_input.borrow());

        match self.park_and_redirect(&pending) {
            Ok(url) => SubmitOutcome::Redirected(url),
            Err(e) => {
                tracing::error!(error = %e, "redirection error");
                self.set_error(REDIRECT_ERROR);
                self.loading.set(false);
                SubmitOutcome::Failed
            }
        }
    }

    fn park_and_redirect(&self, pending: &PendingPhoneNumber) -> Result<Url, FlowError> {
        self.deps.store.set(PENDING_PHONE_KEY, pending.as_str())?;
        let url = gateway_redirect_url(
            &self.config.gateway_url,
            &self.config.partner_id,
            &self.config.return_url,
        )?;
        self.deps.navigator.redirect_external(&url)?;
        tracing::info!(
            country = self.selected.get().country_code,
            "redirected to partner gateway"
        );
        Ok(url)
    }

    // ── Return ──────────────────────────────────────────────────────────

    /// React to the current location (full URL or query string).
    ///
    /// Runs once per distinct query string, like an effect keyed on
    /// `location.search`.
    pub async fn handle_location(&self, location: &str) -> ReturnOutcome {
        let search = query_string(location);
        if self.last_search.borrow().as_deref() == Some(search.as_str()) {
            return ReturnOutcome::AlreadyHandled;
        }
        if self.processing_return.get() {
            return ReturnOutcome::Busy;
        }
        *self.last_search.borrow_mut() = Some(search.clone());

        let params = ReturnParams::parse(&search);
        match params.encrypted.as_deref() {
            Some(encrypted) if params.is_success() => {
                self.verify_return(encrypted.to_string()).await
            }
            _ if params.is_return() => {
                tracing::warn!(ec = params.error_code.as_deref(), "gateway returned an error");
                self.set_error(VERIFY_ERROR);
                ReturnOutcome::GatewayError
            }
            _ => ReturnOutcome::NotAReturn,
        }
    }

    async fn verify_return(&self, encrypted: String) -> ReturnOutcome {
        let _processing = ClearOnDrop::adopt(&self.processing_return);
        let _loading = ClearOnDrop::adopt(&self.loading);

        let route = match self.run_verification(encrypted).await {
            Ok(route) => route,
            Err(e) => {
                tracing::error!(error = %e, "verification error");
                self.set_error(VERIFY_ERROR);
                return match e {
                    FlowError::MissingPendingNumber => ReturnOutcome::MissingPendingNumber,
                    _ => ReturnOutcome::Failed,
                };
            }
        };

        match self.deps.navigator.navigate_internal(route) {
            Ok(()) => ReturnOutcome::Routed(route),
            Err(e) => {
                tracing::error!(error = %e, %route, "navigation after verification failed");
                self.set_error(VERIFY_ERROR);
                ReturnOutcome::NavigationFailed(route)
            }
        }
    }

    /// Read the pending number, call the endpoint and clear storage.
    async fn run_verification(&self, encrypted: String) -> Result<Route, FlowError> {
        let pending = self
            .deps
            .store
            .get(PENDING_PHONE_KEY)?
            .filter(|v| !v.is_empty())
            .map(PendingPhoneNumber::from_stored)
            .ok_or(FlowError::MissingPendingNumber)?;

        let request = VerifyRequest {
            client_id: self.config.client_id.clone(),
            mobile_number: pending.into_inner(),
            encrypted_mobile_number: encrypted,
        };
        let response = self.deps.api.verify(&request).await?;

        self.deps.store.delete(PENDING_PHONE_KEY)?;

        let route = response.data.route();
        tracing::info!(valid_number = response.data.valid_number, %route, "verification finished");
        Ok(route)
    }

    // ── Render ──────────────────────────────────────────────────────────

    pub fn view(&self) -> View {
        if self.processing_return.get() {
            return View::VerifyingReturn;
        }
        let options = self.focused.get().then(|| self.options());
        View::VerifyForm(FormView {
            error: self.error(),
            country_label: self.display_value(),
            dial_code: self.selected.get().code,
            phone_input: self.phone_input(),
            options,
            nothing_found: self.nothing_found(),
            submit_enabled: self.can_submit(),
            loading: self.loading.get(),
        })
    }
}
