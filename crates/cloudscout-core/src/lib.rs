#![deny(missing_docs)]

//! # cloudscout-core: Foundational Types for CloudScout
//!
//! Process-wide, read-only configuration that the schema composer and the
//! request layer share. Nothing in this crate mutates after startup.
//!
//! ## Design Principles
//!
//! 1. **Single [`Sport`] enum.** One definition, exhaustive `match`
//!    everywhere. Positions and accepted names live next to the variant so a
//!    new sport cannot be added without both.
//!
//! 2. **[`StatGroup`] invariants are checked at load time.** A group with no
//!    fields or a repeated field name is rejected by [`StatGroup::new`] and by
//!    the catalog loader. Downstream schema composition is therefore
//!    infallible.
//!
//! 3. **Wire constants in one place.** Patterns and enumerations that must
//!    match deployed clients byte-for-byte are in [`wire`].

pub mod error;
pub mod sport;
pub mod stats;
pub mod wire;

pub use error::CatalogError;
pub use sport::{Sport, SportName, UnknownSport};
pub use stats::{StatCatalog, StatGroup};
