//! # API Error Taxonomy
//!
//! Every caller-facing failure in the service is one [`ApiError`]. Each
//! carries an [`ErrorKind`], an HTTP status and a response body that is
//! assembled once, at construction:
//!
//! 1. start from `{}`,
//! 2. set `msg` to the message,
//! 3. overlay caller-supplied extra fields, last write wins (an extra `msg`
//!    replaces the message in the body).
//!
//! [`to_response`] is the only path from an `ApiError` to wire data, so
//! every error body has the shape `{msg, ...extra}`.
//!
//! | kind                | status | message                                  |
//! |---------------------|--------|------------------------------------------|
//! | `DuplicateKey`      | 409    | duplicate entries                        |
//! | `ResourceNotFound`  | 404    | resource does not exist                  |
//! | `InvalidJson`       | 400    | validator detail, supplied by the caller |
//! | `UserNotRegistered` | 404    | email not registered                     |
//! | `InvalidLogin`      | 401    | incorrect username or password           |
//! | `Authorization`     | 401    | overridable status and message           |
//!
//! Failures that are not part of this taxonomy go through
//! [`HandlerError::Internal`], which returns a generic 500 and never exposes
//! its detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cloudscout_schema::SchemaValidationError;
use serde_json::{Map, Value};
use thiserror::Error;

/// Key of the message field in every error body.
pub const MSG_KEY: &str = "msg";

/// Message returned for internal failures in place of their detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Classification of a caller-facing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An insert would violate a uniqueness constraint.
    DuplicateKey,
    /// Lookup by primary key found nothing (players, users).
    ResourceNotFound,
    /// The payload failed schema validation.
    InvalidJson,
    /// Login with an email that has no account.
    UserNotRegistered,
    /// Credential mismatch. The message is the same whichever part was wrong.
    InvalidLogin,
    /// Missing or insufficient authorization.
    Authorization,
}

impl ErrorKind {
    /// All kinds, in table order.
    pub fn all() -> &'static [ErrorKind] {
        &[
            Self::DuplicateKey,
            Self::ResourceNotFound,
            Self::InvalidJson,
            Self::UserNotRegistered,
            Self::InvalidLogin,
            Self::Authorization,
        ]
    }

    /// Status used unless overridden at construction.
    pub fn default_status(&self) -> StatusCode {
        match self {
            Self::DuplicateKey => StatusCode::CONFLICT,
            Self::ResourceNotFound => StatusCode::NOT_FOUND,
            Self::InvalidJson => StatusCode::BAD_REQUEST,
            Self::UserNotRegistered => StatusCode::NOT_FOUND,
            Self::InvalidLogin => StatusCode::UNAUTHORIZED,
            Self::Authorization => StatusCode::UNAUTHORIZED,
        }
    }

    /// Fixed message for this kind. `None` for [`ErrorKind::InvalidJson`],
    /// whose message is always the validator's detail.
    pub fn default_message(&self) -> Option<&'static str> {
        match self {
            Self::DuplicateKey => Some(
                "Could not add players to database as doing so would cause duplicate entries",
            ),
            Self::ResourceNotFound => Some("Resource does not exist in the database"),
            Self::InvalidJson => None,
            Self::UserNotRegistered => Some("Email not registered"),
            Self::InvalidLogin => Some("Incorrect username or password"),
            Self::Authorization => Some("Unauthorized"),
        }
    }

    /// Machine-readable identifier, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateKey => "DUPLICATE_KEY",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::InvalidJson => "INVALID_JSON",
            Self::UserNotRegistered => "USER_NOT_REGISTERED",
            Self::InvalidLogin => "INVALID_LOGIN",
            Self::Authorization => "AUTHORIZATION",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified, caller-facing failure with its response already assembled.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    status: StatusCode,
    message: String,
    body: Map<String, Value>,
}

impl ApiError {
    fn assemble(kind: ErrorKind, status: StatusCode, message: String) -> Self {
        let mut body = Map::new();
        body.insert(MSG_KEY.to_string(), Value::String(message.clone()));
        Self {
            kind,
            status,
            message,
            body,
        }
    }

    fn fixed(kind: ErrorKind) -> Self {
        let message = kind.default_message().unwrap_or_default().to_string();
        Self::assemble(kind, kind.default_status(), message)
    }

    /// 409: an insert would create duplicate entries.
    pub fn duplicate_key() -> Self {
        Self::fixed(ErrorKind::DuplicateKey)
    }

    /// 404: no resource with the requested key.
    pub fn resource_not_found() -> Self {
        Self::fixed(ErrorKind::ResourceNotFound)
    }

    /// 400: the payload failed validation; `msg` is the validator's detail.
    pub fn invalid_json(msg: impl Into<String>) -> Self {
        Self::assemble(
            ErrorKind::InvalidJson,
            ErrorKind::InvalidJson.default_status(),
            msg.into(),
        )
    }

    /// 404: login with an unregistered email.
    pub fn user_not_registered() -> Self {
        Self::fixed(ErrorKind::UserNotRegistered)
    }

    /// 401: bad credentials.
    pub fn invalid_login() -> Self {
        Self::fixed(ErrorKind::InvalidLogin)
    }

    /// 401 `Unauthorized`.
    pub fn authorization() -> Self {
        Self::fixed(ErrorKind::Authorization)
    }

    /// Authorization failure with a caller-chosen status and message.
    pub fn authorization_with(status: StatusCode, message: impl Into<String>) -> Self {
        Self::assemble(ErrorKind::Authorization, status, message.into())
    }

    /// Overlay one extra body field. Replaces any existing value under `key`,
    /// including `msg`.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    /// Overlay several extra body fields, in iteration order.
    pub fn with_fields(mut self, extra: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.body.extend(extra);
        self
    }

    /// The failure classification.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The message the body was assembled from.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The assembled response body.
    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }
}

/// Translate an [`ApiError`] into its status and body.
///
/// Pure and total: the body is returned exactly as assembled.
pub fn to_response(error: &ApiError) -> (StatusCode, Map<String, Value>) {
    (error.status, error.body.clone())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = to_response(&self);
        tracing::debug!(
            kind = %self.kind,
            status = status.as_u16(),
            "request rejected"
        );
        (status, Json(Value::Object(body))).into_response()
    }
}

/// Error type returned by request handlers.
///
/// Wraps the taxonomy plus a generic fallback for failures that are not the
/// caller's fault.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// A caller-facing failure, surfaced verbatim.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            Self::Api(err) => err.into_response(),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
                let mut body = Map::new();
                body.insert(
                    MSG_KEY.to_string(),
                    Value::String(INTERNAL_ERROR_MESSAGE.to_string()),
                );
                (StatusCode::INTERNAL_SERVER_ERROR, Json(Value::Object(body))).into_response()
            }
        }
    }
}

/// Validation failures become `InvalidJson` carrying the first violation's
/// message; anything else is internal.
impl From<SchemaValidationError> for HandlerError {
    fn from(err: SchemaValidationError) -> Self {
        match err.first_violation() {
            Some(violation) => Self::Api(ApiError::invalid_json(violation.message.clone())),
            None => Self::Internal(err.to_string()),
        }
    }
}
