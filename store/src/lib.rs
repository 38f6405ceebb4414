//! Key-value storage abstraction for the verification flow.
//!
//! The browser's local storage is modeled as an injected collaborator so the
//! flows never touch a global. Backends (the JSON file store here, the
//! in-memory store in `authmatech-nullables`) implement [`KeyValueStore`];
//! the rest of the workspace depends only on the trait.

pub mod error;
pub mod file;

pub use error::StoreError;
pub use file::FileStore;

/// Key under which the pending phone number survives the partner redirect.
pub const PENDING_PHONE_KEY: &str = "pendingPhoneNumber";

/// String-to-string persistent storage with local-storage semantics.
///
/// `set` overwrites silently; `delete` of a missing key is not an error.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}
