//! Mobile verification flows.
//!
//! Three screens, each a state holder driven by explicit event handlers:
//! - [`RootFlow`]: device gate, silent header-enrichment lookup and
//!   confirmation of the detected number
//! - [`PhoneConfirmation`]: "Is this your mobile?"
//! - [`VerifyNumberScreen`]: country + number form, partner gateway redirect,
//!   and verification on return
//!
//! Screens never reach for globals. Storage, navigation, alerts, device
//! classification and the backend are injected, so the same code runs
//! against the real implementations and the nullables.
//!
//! All handlers take `&self` and keep their state in cells: like UI event
//! callbacks, they may be invoked again while an earlier request is still in
//! flight, and the busy flags decide what happens then.

pub mod config;
pub mod confirm;
pub mod error;
mod flag;
pub mod root;
pub mod verify;
pub mod views;

pub use config::FlowConfig;
pub use confirm::{ConfirmOutcome, PhoneConfirmation, MISMATCH_ALERT};
pub use error::FlowError;
pub use root::{FlowState, RootDeps, RootFlow};
pub use verify::{
    ReturnOutcome, SubmitOutcome, VerifyDeps, VerifyNumberScreen, REDIRECT_ERROR, VERIFY_ERROR,
};
pub use views::{FormView, QrImage, View};
