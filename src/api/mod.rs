//! API client module for communicating with the PharmaChain backend.
//!
//! All business logic (accounts, tag-id generation, blockchain-backed
//! logging) lives server-side; this module is the typed HTTP boundary.

mod client;
mod types;

pub use client::{qr_code_url, ApiClient, ApiError};
pub use types::*;
