//! # Wire Constants
//!
//! Values embedded in every composed player schema. Clients and stored
//! records depend on these exact strings, so they are never derived.

/// Player identifiers are decimal digit strings.
pub const PID_PATTERN: &str = "^[0-9]+$";

/// A four-digit season year or an inclusive `YYYY-YYYY` range.
pub const YEAR_RANGE_PATTERN: &str = "^[0-9]{4}(-[0-9]{4})?$";

/// Accepted non-null values of `meta.class` (academic class standing).
pub const CLASS_VALUES: [u8; 5] = [1, 2, 3, 4, 5];

/// Accepted non-null values of `meta.division`.
pub const DIVISION_VALUES: [u8; 3] = [1, 2, 3];
