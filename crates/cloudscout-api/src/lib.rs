//! # cloudscout-api: Request Boundary
//!
//! What request handlers need to validate player payloads and report
//! failures. Routing, persistence and authentication live with the caller;
//! this crate provides the pieces they compose:
//!
//! - [`error`]: the [`ApiError`] taxonomy, [`to_response`] and the
//!   [`HandlerError`] fallback, all implementing `IntoResponse`.
//! - [`extractors`]: JSON body extraction and two-stage schema validation.
//! - [`state`]: [`AppState`] and environment-driven [`AppConfig`].
//! - [`telemetry`]: `tracing` subscriber setup.
//!
//! ## Crate Policy
//!
//! - Every caller-facing failure is exactly one `ApiError`, propagated with
//!   `?` up to the handler's return value; nothing re-wraps it.
//! - Error bodies are always `{"msg": ..., ...extra}`.
//! - Internal failure detail is logged, never returned.

pub mod error;
pub mod extractors;
pub mod state;
pub mod telemetry;

pub use error::{to_response, ApiError, ErrorKind, HandlerError};
pub use extractors::{
    extract_json, extract_player, validate_player, validate_players, ValidatedPlayer,
};
pub use state::{AppConfig, AppState, StateError};
pub use telemetry::{init_tracing, LogFormat};
