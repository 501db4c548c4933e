//! PharmaChain TUI: terminal client for the PharmaChain verification service.
//!
//! Manufacturers register medicine batches and receive a tag id; pharmacy
//! owners verify tags at the counter; anyone can inspect and export the
//! per-tag event log.
//!
//! ## Architecture
//!
//! The crate is split the same way the screens are: `domain` owns all state
//! and key handling and never touches the network, `api` is a thin typed
//! client over the remote HTTPS service, `ui` renders immutable state, and
//! `export` writes the log table as a PDF. Key handling returns [`domain::Command`]
//! values which the binary's runtime turns into spawned requests, so every
//! state transition is testable without a server.

pub mod api;
pub mod domain;
pub mod export;
pub mod ui;

pub use api::{ApiClient, ApiError};
pub use domain::{App, ApiRequest, Command, Screen, Session, SessionStore};
