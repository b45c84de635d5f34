//! # Player Schema Composition
//!
//! Builds the JSON Schema documents that incoming player records are
//! validated against. One skeleton of `meta` fields is shared by every
//! sport; only two points vary per sport:
//!
//! - `meta.position` is restricted to `null` plus the sport's position codes.
//! - `meta.sport` is a `const` for single-name sports, or an `enum` of the
//!   alias set for sports with men's and women's variants.
//!
//! `stats` is assembled from pre-built stat group nodes, one required key per
//! group.
//!
//! All functions here are pure and infallible. Their inputs come from the
//! [`StatCatalog`], which has already enforced the group invariants.

use std::collections::HashSet;

use cloudscout_core::wire::{CLASS_VALUES, DIVISION_VALUES, PID_PATTERN, YEAR_RANGE_PATTERN};
use cloudscout_core::{Sport, SportName, StatCatalog, StatGroup};
use serde_json::Value;

use crate::node::{EnumNode, JsonType, ObjectNode, SchemaNode};

/// A stat group's schema node tagged with the group name it is keyed under.
#[derive(Debug, Clone, PartialEq)]
pub struct StatGroupSchema {
    name: String,
    node: SchemaNode,
}

impl StatGroupSchema {
    /// Build the node for a catalog group.
    pub fn from_group(group: &StatGroup) -> Self {
        build_stat_group_schema(group.name(), group.fields())
    }

    /// The key under `stats`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The group's object node.
    pub fn node(&self) -> &SchemaNode {
        &self.node
    }
}

/// Object schema for one stat group: every field is `number | null`, every
/// field is required, nothing else is allowed.
///
/// `field_names` must be non-empty and free of duplicates.
pub fn build_stat_group_schema<S: AsRef<str>>(
    group_name: &str,
    field_names: &[S],
) -> StatGroupSchema {
    debug_assert!(!field_names.is_empty(), "stat group {group_name} has no fields");
    debug_assert_eq!(
        field_names.iter().map(|f| f.as_ref()).collect::<HashSet<&str>>().len(),
        field_names.len(),
        "stat group {group_name} repeats a field"
    );

    let node = field_names
        .iter()
        .fold(ObjectNode::new(), |obj, field| {
            obj.property(field.as_ref(), SchemaNode::nullable_number())
        })
        .closed();

    StatGroupSchema {
        name: group_name.to_string(),
        node: node.into(),
    }
}

/// Sport-agnostic shape shared by all records: a numeric `pid` and a `meta`
/// object whose `sport` is one of the known record names.
///
/// Used to pre-validate a payload before its sport is known.
pub fn player_skeleton() -> SchemaNode {
    let meta = ObjectNode::new().property(
        "sport",
        EnumNode::one_of(JsonType::String, false, Sport::all_names()),
    );

    ObjectNode::new()
        .property("pid", SchemaNode::pattern(PID_PATTERN, false))
        .property("meta", meta)
        .into()
}

/// The `meta.sport` constraint for `sport`.
fn sport_constraint(sport: Sport) -> EnumNode {
    match sport.name() {
        SportName::Single(name) => EnumNode::constant(JsonType::String, true, name),
        SportName::Aliases(names) => {
            EnumNode::one_of(JsonType::String, true, names.iter().copied())
        }
    }
}

fn meta_schema(sport: Sport) -> ObjectNode {
    let class = EnumNode::one_of(
        JsonType::Integer,
        true,
        std::iter::once(Value::Null).chain(CLASS_VALUES.iter().map(|c| Value::from(*c))),
    );
    let division = EnumNode::one_of(
        JsonType::Integer,
        true,
        std::iter::once(Value::Null).chain(DIVISION_VALUES.iter().map(|d| Value::from(*d))),
    );
    let position = EnumNode::one_of(
        JsonType::String,
        true,
        std::iter::once(Value::Null).chain(sport.positions().iter().map(|p| Value::from(*p))),
    );

    ObjectNode::new()
        .property("class", class)
        .property("conference", SchemaNode::nullable_string())
        // Unix epoch seconds.
        .property("date", SchemaNode::nullable_integer())
        .property("division", division)
        .property("first", SchemaNode::nullable_string())
        .optional_property("institution", SchemaNode::nullable_string())
        .property("last", SchemaNode::nullable_string())
        .property("position", position)
        .property("sport", sport_constraint(sport))
        .property("year", SchemaNode::pattern(YEAR_RANGE_PATTERN, true))
        .closed()
}

/// Compose the full record schema for `sport` with the given stat groups.
///
/// The result requires exactly `pid`, `meta` and `stats`; `stats` requires
/// exactly the supplied group names in the supplied order.
pub fn build_player_schema(sport: Sport, stat_groups: &[StatGroupSchema]) -> SchemaNode {
    let stats = stat_groups
        .iter()
        .fold(ObjectNode::new(), |obj, group| {
            obj.property(group.name(), group.node().clone())
        })
        .closed();

    tracing::debug!(%sport, groups = stat_groups.len(), "composed player schema");

    ObjectNode::new()
        .property("pid", SchemaNode::pattern(PID_PATTERN, false))
        .property("meta", meta_schema(sport))
        .property("stats", stats)
        .closed()
        .into()
}

/// Composition unit: a sport plus its ordered stat groups.
///
/// Also the memoization key of [`SchemaCache`](crate::SchemaCache); two
/// specs with the same sport and the same groups in the same order compose
/// identical documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerSchemaSpec {
    sport: Sport,
    groups: Vec<StatGroup>,
}

impl PlayerSchemaSpec {
    /// Key for `sport` over an explicit, ordered group list.
    pub fn new(sport: Sport, groups: Vec<StatGroup>) -> Self {
        Self { sport, groups }
    }

    /// Key for `sport` using every group the catalog assigns it.
    pub fn from_catalog(catalog: &StatCatalog, sport: Sport) -> Self {
        Self::new(sport, catalog.groups(sport).to_vec())
    }

    /// The sport.
    pub fn sport(&self) -> Sport {
        self.sport
    }

    /// The stat groups, in order.
    pub fn groups(&self) -> &[StatGroup] {
        &self.groups
    }

    /// Compose the schema node.
    pub fn build(&self) -> SchemaNode {
        let group_schemas: Vec<StatGroupSchema> =
            self.groups.iter().map(StatGroupSchema::from_group).collect();
        build_player_schema(self.sport, &group_schemas)
    }
}
