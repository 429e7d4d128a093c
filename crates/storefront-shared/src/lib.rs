//! # Storefront Shared
//!
//! Wire types exchanged with the Storefront backend.

pub mod dto;
pub mod response;

pub use response::{Envelope, ErrorResponse};
