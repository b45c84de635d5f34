//! # cloudscout-schema: Player Schema Composition
//!
//! Produces the JSON Schema documents that player records are validated
//! against, and hands them to the `jsonschema` crate for execution.
//!
//! ## Modules
//!
//! - [`node`]: closed set of typed schema nodes, serialized to the generic
//!   JSON tree only at the boundary.
//! - [`compose`]: stat group nodes, the sport-agnostic
//!   skeleton, and the full per-sport player schema.
//! - [`cache`]: memoized documents keyed by [`PlayerSchemaSpec`].
//! - [`validate`]: compiled validators and structured violations.
//!
//! ## Crate Policy
//!
//! - Depends only on `cloudscout-core` internally.
//! - Composition never fails; malformed stat configuration is rejected when
//!   the catalog is loaded.
//! - Every composed document sets `additionalProperties: false` wherever the
//!   key set is fixed.

pub mod cache;
pub mod compose;
pub mod node;
pub mod validate;

pub use cache::SchemaCache;
pub use compose::{
    build_player_schema, build_stat_group_schema, player_skeleton, PlayerSchemaSpec,
    StatGroupSchema,
};
pub use node::{
    EnumNode, EnumValues, JsonType, NumberNode, NumericType, ObjectNode, SchemaNode, StringNode,
};
pub use validate::{PlayerValidator, SchemaValidationError, ValidationViolations, Violation};
