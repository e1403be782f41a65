//! Credential and session-token components.
//!
//! `CredentialStore` owns account persistence and password verification;
//! `SessionTokenService` turns a verified account into a signed, self-contained
//! session token and validates tokens presented on later requests. Both are
//! constructed once at startup and injected through the application state.

pub mod credentials;
pub mod token;

pub use credentials::CredentialStore;
pub use token::{SessionClaims, SessionTokenService, TokenError};
