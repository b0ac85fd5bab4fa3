//! Authentication module for managing the user session and stored tokens.
//!
//! This module provides:
//! - `Session`: shared authentication state (tokens and identity)
//! - `SessionManager`: startup check, login, registration, logout
//! - `TokenBackend`: durable token storage (file, OS keychain, memory)

pub mod manager;
pub mod session;
pub mod store;

pub use manager::SessionManager;
pub use session::{Session, SessionState};
pub use store::{FileBackend, KeyringBackend, MemoryBackend, TokenBackend, TokenKey};
