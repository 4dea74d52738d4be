#![warn(missing_docs)]

//! Backend services for storefront front ends => See `storefront` crate.
//!
//! Contains the HTTP client for the storefront backend, persisted sign-in
//! sessions and the application settings.

/// Contains the [ServiceError](error::ServiceError) type.
pub mod error;

/// Contains the [StorefrontConfig](config::StorefrontConfig) settings.
pub mod config;

/// Contains the request and response bodies of the backend.
pub mod models;

/// Contains the [ApiClient](api::ApiClient).
pub mod api;

/// Contains the persisted [Session](session::Session).
pub mod session;
