//! # Storefront Core
//!
//! The domain layer of the Storefront client.
//! Entities, ports and view state live here; HTTP and storage adapters live in
//! `storefront-infra`.

pub mod domain;
pub mod error;
pub mod ports;
pub mod view;

pub use error::{AccessDenied, ApiError, ApiErrorKind, ViewError};

#[cfg(test)]
mod test_support;
