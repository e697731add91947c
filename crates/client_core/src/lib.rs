//! Session and data-fetch core of the employee directory client.
//!
//! A login builds an [`AuthProof`] from the submitted credentials, fetches
//! the employee list with it exactly once, and only a successful fetch
//! leaves the session authenticated.

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod session;

pub use auth::{AuthProof, Credentials};
pub use config::{load_settings, ClientSettings};
pub use controller::{SessionController, SessionEvent};
pub use error::{ConfigError, FetchError, LoginRejected};
pub use fetcher::{HttpRecordFetcher, RecordFetcher};
pub use session::{SessionPhase, SessionSnapshot, SessionState};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
