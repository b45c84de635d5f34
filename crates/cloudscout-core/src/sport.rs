//! # Sport: Single Source of Truth
//!
//! Defines the [`Sport`] enum together with each sport's accepted record
//! names and valid position codes. Every `match` on `Sport` is exhaustive,
//! so adding a sport forces its names and positions to be declared.
//!
//! ## Name Shapes
//!
//! Men's and women's programs of the same sport share one record shape. Such
//! sports carry a fixed alias set (`mens_soccer`, `womens_soccer`) instead of
//! a single canonical name. See [`SportName`].

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Accepted value(s) for `meta.sport` in a record of a given sport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SportName {
    /// Exactly one accepted name.
    Single(&'static str),
    /// A fixed set of interchangeable aliases.
    Aliases(&'static [&'static str]),
}

impl SportName {
    /// All accepted names, in declaration order.
    pub fn as_slice(&self) -> &[&'static str] {
        match self {
            Self::Single(name) => std::slice::from_ref(name),
            Self::Aliases(names) => *names,
        }
    }

    /// Whether `candidate` is one of the accepted names.
    pub fn accepts(&self, candidate: &str) -> bool {
        self.as_slice().iter().any(|n| *n == candidate)
    }
}

/// Every sport the service stores player records for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    /// American football.
    Football,
    /// Basketball.
    Basketball,
    /// Baseball.
    Baseball,
    /// Soccer (men's and women's).
    Soccer,
    /// Volleyball (men's and women's).
    Volleyball,
    /// Lacrosse (men's and women's).
    Lacrosse,
}

/// Returned when a string names no known sport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sport: {0:?}")]
pub struct UnknownSport(pub String);

impl Sport {
    /// All sports in canonical order.
    pub fn all() -> &'static [Sport] {
        &[
            Self::Football,
            Self::Basketball,
            Self::Baseball,
            Self::Soccer,
            Self::Volleyball,
            Self::Lacrosse,
        ]
    }

    /// The snake_case identifier used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Football => "football",
            Self::Basketball => "basketball",
            Self::Baseball => "baseball",
            Self::Soccer => "soccer",
            Self::Volleyball => "volleyball",
            Self::Lacrosse => "lacrosse",
        }
    }

    /// The value(s) a record of this sport may carry in `meta.sport`.
    pub fn name(&self) -> SportName {
        match self {
            Self::Football => SportName::Single("football"),
            Self::Basketball => SportName::Single("basketball"),
            Self::Baseball => SportName::Single("baseball"),
            Self::Soccer => SportName::Aliases(&["mens_soccer", "womens_soccer"]),
            Self::Volleyball => SportName::Aliases(&["mens_volleyball", "womens_volleyball"]),
            Self::Lacrosse => SportName::Aliases(&["mens_lacrosse", "womens_lacrosse"]),
        }
    }

    /// Valid position codes, in display order. Never empty.
    pub fn positions(&self) -> &'static [&'static str] {
        match self {
            Self::Football => &[
                "QB", "RB", "WR", "TE", "OL", "DL", "LB", "DB", "K", "P", "LS",
            ],
            Self::Basketball => &["G", "F", "C"],
            Self::Baseball => &[
                "P", "C", "1B", "2B", "3B", "SS", "LF", "CF", "RF", "DH",
            ],
            Self::Soccer => &["GK", "D", "M", "F"],
            Self::Volleyball => &["S", "OH", "MB", "OPP", "L", "DS"],
            Self::Lacrosse => &["A", "M", "D", "G"],
        }
    }

    /// Every record name accepted by any sport, in canonical sport order.
    pub fn all_names() -> Vec<&'static str> {
        Self::all()
            .iter()
            .flat_map(|s| s.name().as_slice().to_vec())
            .collect()
    }

    /// Resolve a `meta.sport` value (canonical name or alias) to its sport.
    pub fn from_name(name: &str) -> Option<Sport> {
        Self::all().iter().copied().find(|s| s.name().accepts(name))
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = UnknownSport;

    /// Parse a sport from its configuration identifier (see [`Sport::as_str`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|sport| sport.as_str() == s)
            .ok_or_else(|| UnknownSport(s.to_string()))
    }
}
