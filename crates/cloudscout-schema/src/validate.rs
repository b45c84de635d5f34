//! # Player Record Validation
//!
//! Runs incoming player payloads through the composed schemas using the
//! `jsonschema` crate (Draft 2020-12). This module only wires documents to
//! the external validator and collects its findings; it does not interpret
//! them beyond that.
//!
//! ## Two Stages
//!
//! 1. The [`player_skeleton`] checks the sport-agnostic shape and that
//!    `meta.sport` names a known sport.
//! 2. The sport's composed schema checks the full record.
//!
//! Validators are compiled once in [`PlayerValidator::new`]; validation
//! itself never compiles anything.

use std::collections::HashMap;
use std::fmt;

use cloudscout_core::{Sport, StatCatalog};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{ValidationError, Validator};
use serde_json::Value;
use thiserror::Error;

use crate::cache::SchemaCache;
use crate::compose::{player_skeleton, PlayerSchemaSpec};

const SKELETON_SCHEMA_NAME: &str = "player-skeleton";

/// Error during schema compilation or validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// A composed document could not be compiled into a validator.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

impl SchemaValidationError {
    /// The first violation, if this is a validation failure.
    pub fn first_violation(&self) -> Option<&Violation> {
        match self {
            Self::ValidationFailed { violations, .. } => violations.first(),
            Self::ValidatorBuildError { .. } => None,
        }
    }
}

/// One schema finding against a player payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the offending value; empty for the record root.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Message returned to the client as `msg`.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.instance_path.is_empty() {
            "(root)"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "{at}: {}", self.message)
    }
}

/// Violations from one validation stage, in the order the validator
/// reported them. Never empty.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// The violation reported to clients.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// All violations of the stage.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.violations.iter().map(|v| format!("  {v}")).collect();
        f.write_str(&lines.join("\n"))
    }
}

/// Client-facing text for a validator error. A missing property reads
/// `'pid' is a required property`; other kinds keep the validator's text.
fn violation_message(error: &ValidationError<'_>) -> String {
    match &error.kind {
        ValidationErrorKind::Required {
            property: Value::String(name),
        } => format!("'{name}' is a required property"),
        _ => error.to_string(),
    }
}

fn compile(schema_name: &str, document: &Value) -> Result<Validator, SchemaValidationError> {
    jsonschema::options()
        .with_draft(jsonschema::Draft::Draft202012)
        .build(document)
        .map_err(|e| SchemaValidationError::ValidatorBuildError {
            schema_name: schema_name.to_string(),
            reason: e.to_string(),
        })
}

fn check(
    validator: &Validator,
    schema_name: &str,
    instance: &Value,
) -> Result<(), SchemaValidationError> {
    let errors: Vec<Violation> = validator
        .iter_errors(instance)
        .map(|e| Violation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: violation_message(&e),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError::ValidationFailed {
            schema_name: schema_name.to_string(),
            violations: ValidationViolations { violations: errors },
        })
    }
}

/// Compiled skeleton and per-sport validators for a stat catalog.
///
/// `PlayerValidator` is `Send + Sync` and immutable after construction, so
/// one instance can be shared by every request handler.
pub struct PlayerValidator {
    skeleton: Validator,
    sports: HashMap<Sport, Validator>,
    cache: SchemaCache,
    catalog: StatCatalog,
}

impl fmt::Debug for PlayerValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerValidator")
            .field("sports", &self.sports.keys().collect::<Vec<_>>())
            .field("cached_documents", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl PlayerValidator {
    /// Compose and compile the skeleton and every sport's schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidatorBuildError` if a composed
    /// document is rejected by the validator compiler.
    pub fn new(catalog: StatCatalog) -> Result<Self, SchemaValidationError> {
        let skeleton = compile(SKELETON_SCHEMA_NAME, &player_skeleton().to_value())?;
        let cache = SchemaCache::new();

        let mut sports = HashMap::with_capacity(Sport::all().len());
        for sport in Sport::all() {
            let spec = PlayerSchemaSpec::from_catalog(&catalog, *sport);
            let document = cache.get_or_compose(&spec);
            sports.insert(*sport, compile(sport.as_str(), &document)?);
        }

        tracing::info!(sports = sports.len(), "compiled player schemas");
        Ok(Self {
            skeleton,
            sports,
            cache,
            catalog,
        })
    }

    /// The catalog the schemas were composed from.
    pub fn catalog(&self) -> &StatCatalog {
        &self.catalog
    }

    /// The composed document for `sport`.
    pub fn document(&self, sport: Sport) -> std::sync::Arc<Value> {
        self.cache
            .get_or_compose(&PlayerSchemaSpec::from_catalog(&self.catalog, sport))
    }

    /// Validate `payload` against the skeleton, resolve its sport, then
    /// validate against that sport's schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with the violations
    /// of whichever stage rejected the payload.
    pub fn validate(&self, payload: &Value) -> Result<Sport, SchemaValidationError> {
        check(&self.skeleton, SKELETON_SCHEMA_NAME, payload)?;

        let name = payload
            .pointer("/meta/sport")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let sport = Sport::from_name(name).ok_or_else(|| SchemaValidationError::ValidationFailed {
            schema_name: SKELETON_SCHEMA_NAME.to_string(),
            violations: ValidationViolations {
                violations: vec![Violation {
                    instance_path: "/meta/sport".to_string(),
                    schema_path: "/properties/meta/properties/sport/enum".to_string(),
                    message: format!("{name:?} is not a known sport"),
                }],
            },
        })?;

        self.validate_for(sport, payload)?;
        Ok(sport)
    }

    /// Validate `payload` against the schema of a sport already known to
    /// the caller.
    pub fn validate_for(&self, sport: Sport, payload: &Value) -> Result<(), SchemaValidationError> {
        match self.sports.get(&sport) {
            Some(validator) => check(validator, sport.as_str(), payload),
            None => {
                // Only reachable if construction skipped a sport.
                let document = self.document(sport);
                check(&compile(sport.as_str(), &document)?, sport.as_str(), payload)
            }
        }
    }
}
