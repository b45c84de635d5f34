//! # Catalog Errors
//!
//! Structured errors raised while loading stat group configuration. These
//! are startup failures: a catalog that loads successfully never produces
//! an error afterwards.

use std::path::PathBuf;

use thiserror::Error;

use crate::sport::Sport;

/// Errors raised while building or loading a [`StatCatalog`](crate::StatCatalog).
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A group or field name was the empty string.
    #[error("empty name in stat group \"{group}\" for {sport}")]
    EmptyName {
        /// Sport whose catalog entry is malformed.
        sport: Sport,
        /// Group containing the empty name (empty if the group name itself is empty).
        group: String,
    },

    /// A stat group declared no fields.
    #[error("stat group \"{group}\" for {sport} has no fields")]
    EmptyGroup {
        /// Sport whose catalog entry is malformed.
        sport: Sport,
        /// The offending group.
        group: String,
    },

    /// A field name appears more than once within one group.
    #[error("field \"{field}\" is repeated in stat group \"{group}\" for {sport}")]
    DuplicateField {
        /// Sport whose catalog entry is malformed.
        sport: Sport,
        /// The offending group.
        group: String,
        /// The repeated field name.
        field: String,
    },

    /// A group name appears more than once for one sport.
    #[error("stat group \"{group}\" is declared twice for {sport}")]
    DuplicateGroup {
        /// Sport whose catalog entry is malformed.
        sport: Sport,
        /// The repeated group name.
        group: String,
    },

    /// A sport has no stat groups at all.
    #[error("no stat groups declared for {0}")]
    NoGroups(Sport),

    /// A sport is absent from the catalog.
    #[error("catalog is missing sport {0}")]
    MissingSport(Sport),

    /// The catalog document could not be parsed.
    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The catalog file could not be read.
    #[error("cannot read catalog {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
