//! Core library for the TalentBase job board client.
//!
//! - [`api`]: the authenticated request pipeline and typed gateway calls
//! - [`auth`]: session state, token storage, login/registration/logout
//! - [`models`]: records mirrored from the gateway and list filters
//! - [`config`]: gateway URL, timeout and token storage settings

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, ApiError, Navigator};
pub use auth::{Session, SessionManager, SessionState};
pub use config::Config;
