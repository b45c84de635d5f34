//! # Request Body Validation
//!
//! Helpers that turn a raw JSON body into a schema-checked player record.
//! Handlers accept `Result<Json<Value>, JsonRejection>` so that malformed
//! JSON is reported through the taxonomy instead of axum's default
//! plain-text rejection:
//!
//! ```ignore
//! async fn create_player(
//!     State(state): State<AppState>,
//!     body: Result<Json<Value>, JsonRejection>,
//! ) -> Result<StatusCode, HandlerError> {
//!     let player = extract_player(&state, body)?;
//!     // persist player.record ...
//! }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::Json;
use cloudscout_core::Sport;
use serde_json::Value;

use crate::error::{ApiError, HandlerError};
use crate::state::AppState;

/// A player record that passed skeleton and sport schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPlayer {
    /// Sport resolved from `meta.sport`.
    pub sport: Sport,
    /// The record, unchanged.
    pub record: Value,
}

/// Extract a JSON body, mapping deserialization errors to `InvalidJson`.
pub fn extract_json(result: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| ApiError::invalid_json(err.body_text()))
}

/// Validate one record against the composed schemas.
///
/// Fails with `InvalidJson` carrying the first violation's message.
pub fn validate_player(state: &AppState, record: Value) -> Result<ValidatedPlayer, HandlerError> {
    let sport = state.validator().validate(&record)?;
    Ok(ValidatedPlayer { sport, record })
}

/// Extract a JSON body and validate it as a player record.
pub fn extract_player(
    state: &AppState,
    result: Result<Json<Value>, JsonRejection>,
) -> Result<ValidatedPlayer, HandlerError> {
    let record = extract_json(result)?;
    validate_player(state, record)
}

/// Validate a batch body (a JSON array of records), stopping at the first
/// invalid record. The error carries the failing record's `index`.
pub fn validate_players(
    state: &AppState,
    body: Value,
) -> Result<Vec<ValidatedPlayer>, HandlerError> {
    let records = match body {
        Value::Array(records) => records,
        _ => return Err(ApiError::invalid_json("expected an array of player records").into()),
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            validate_player(state, record).map_err(|err| match err {
                HandlerError::Api(api) => HandlerError::Api(api.with_extra("index", index)),
                other => other,
            })
        })
        .collect()
}
