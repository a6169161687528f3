//! HTTP client for the bike parking API.
//!
//! The client itself is transport-agnostic: it builds URLs, issues a single
//! GET per call and normalizes every failure into [`ApiError`]. Transports:
//! - [`ReqwestTransport`] on native targets
//! - [`GlooTransport`] in the browser
//! - [`ScriptedTransport`] for tests and offline runs

pub mod api;
pub mod scripted;
pub mod transport;

#[cfg(target_arch = "wasm32")]
pub mod gloo_transport;
#[cfg(not(target_arch = "wasm32"))]
pub mod reqwest_transport;

pub use api::*;
pub use scripted::*;
pub use transport::*;

#[cfg(target_arch = "wasm32")]
pub use gloo_transport::*;
#[cfg(not(target_arch = "wasm32"))]
pub use reqwest_transport::*;

pub use protocol::ApiError;
