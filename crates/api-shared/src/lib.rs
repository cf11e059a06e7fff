//! # API Shared
//!
//! Shared utilities and definitions for medrec APIs.
//!
//! Contains:
//! - Shared services like `HealthService`
//! - Authentication utilities (`auth`)
//! - The JSON error envelope returned by every API surface (`envelope`)
//!
//! Used by `api-rest` and the `medrec-run` binary.

pub mod auth;
pub mod envelope;
pub mod health;

pub use auth::{validate_api_key, AuthError, API_KEY_HEADER};
pub use envelope::{ErrorBody, ErrorDetail};
pub use health::{HealthRes, HealthService};
