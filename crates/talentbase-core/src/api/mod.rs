//! REST client module for the TalentBase gateway.
//!
//! This module provides the `ApiClient` request pipeline, which attaches
//! the stored bearer token to every call and renews expired access tokens
//! with the stored refresh token, plus typed calls for the gateway's
//! resources.

pub mod client;
pub mod error;
pub mod navigator;
pub mod resources;
pub mod transport;

pub use client::{recovery_for, ApiClient, Attempt, Recovery, LOGIN_PATH, ME_PATH, REFRESH_PATH};
pub use error::ApiError;
pub use navigator::{Navigator, NoopNavigator, LOGIN_PAGE};
pub use transport::{HttpRequest, HttpResponse, RequestBody, ReqwestTransport, Transport};
