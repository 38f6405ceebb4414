//! Domain types for the Authmatech mobile verification flow.
//!
//! Everything here is transient UI state or static reference data: the phone
//! candidate returned by header enrichment, the pending number carried across
//! the partner redirect, the country list, and the verification outcome.

pub mod country;
pub mod device;
pub mod error;
pub mod lenient;
pub mod outcome;
pub mod phone;

pub use country::{filter_countries, Country, COUNTRIES};
pub use device::DeviceClass;
pub use error::AuthError;
pub use outcome::{Route, VerificationOutcome};
pub use phone::{normalize_local_number, PendingPhoneNumber, PhoneCandidate};
