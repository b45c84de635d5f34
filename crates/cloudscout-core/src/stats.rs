//! # Stat Groups & Catalog
//!
//! A [`StatGroup`] is a named, ordered set of numeric statistic fields
//! (e.g. `passing`, `general`). The [`StatCatalog`] assigns every sport its
//! ordered list of groups.
//!
//! The catalog is loaded once at startup, either from the compiled-in
//! defaults ([`StatCatalog::builtin`]) or from a YAML document:
//!
//! ```yaml
//! sports:
//!   basketball:
//!     - name: general
//!       fields: [games_played, points]
//! ```
//!
//! Every sport must be present. Loading enforces the group invariants
//! (non-empty names, at least one field, no repeated field or group names),
//! which is what lets schema composition treat its input as trusted.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::sport::Sport;

/// A named collection of statistic field names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatGroup {
    name: String,
    fields: Vec<String>,
}

impl StatGroup {
    /// Create a group, checking that it has at least one field and no
    /// repeated or empty names.
    pub fn new(
        sport: Sport,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();

        if name.is_empty() {
            return Err(CatalogError::EmptyName { sport, group: name });
        }
        if fields.is_empty() {
            return Err(CatalogError::EmptyGroup { sport, group: name });
        }
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.is_empty() {
                return Err(CatalogError::EmptyName { sport, group: name });
            }
            if !seen.insert(field.as_str()) {
                return Err(CatalogError::DuplicateField {
                    sport,
                    group: name,
                    field: field.clone(),
                });
            }
        }

        Ok(Self { name, fields })
    }

    /// Group name, used as the key under `stats`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    sports: BTreeMap<Sport, Vec<RawGroup>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGroup {
    name: String,
    fields: Vec<String>,
}

/// Ordered stat groups for every sport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCatalog {
    groups: BTreeMap<Sport, Vec<StatGroup>>,
}

impl StatCatalog {
    /// Build a catalog from already-constructed groups.
    ///
    /// # Errors
    ///
    /// Fails if a sport is missing, has no groups, or declares a group name twice.
    pub fn from_groups(groups: BTreeMap<Sport, Vec<StatGroup>>) -> Result<Self, CatalogError> {
        for sport in Sport::all() {
            let sport_groups = groups
                .get(sport)
                .ok_or(CatalogError::MissingSport(*sport))?;
            if sport_groups.is_empty() {
                return Err(CatalogError::NoGroups(*sport));
            }
            let mut seen = HashSet::new();
            for group in sport_groups {
                if !seen.insert(group.name()) {
                    return Err(CatalogError::DuplicateGroup {
                        sport: *sport,
                        group: group.name().to_string(),
                    });
                }
            }
        }
        Ok(Self { groups })
    }

    /// Parse a catalog from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_yaml::from_str(yaml)?;
        let mut groups = BTreeMap::new();
        for (sport, raw_groups) in raw.sports {
            let built = raw_groups
                .into_iter()
                .map(|g| StatGroup::new(sport, g.name, g.fields))
                .collect::<Result<Vec<_>, _>>()?;
            groups.insert(sport, built);
        }
        Self::from_groups(groups)
    }

    /// Load a catalog from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// The compiled-in default catalog.
    pub fn builtin() -> Self {
        let groups = Sport::all()
            .iter()
            .map(|sport| {
                let sport_groups = builtin_groups(*sport)
                    .iter()
                    .map(|(name, fields)| StatGroup {
                        name: (*name).to_string(),
                        fields: fields.iter().map(|f| (*f).to_string()).collect(),
                    })
                    .collect();
                (*sport, sport_groups)
            })
            .collect();
        Self { groups }
    }

    /// Stat groups for `sport`, in order.
    pub fn groups(&self, sport: Sport) -> &[StatGroup] {
        self.groups.get(&sport).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up one group of a sport by name.
    pub fn group(&self, sport: Sport, name: &str) -> Option<&StatGroup> {
        self.groups(sport).iter().find(|g| g.name() == name)
    }
}

impl Default for StatCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

type StaticGroup = (&'static str, &'static [&'static str]);

fn builtin_groups(sport: Sport) -> &'static [StaticGroup] {
    match sport {
        Sport::Football => &[
            ("general", &["games_played", "games_started"]),
            (
                "passing",
                &["completions", "attempts", "yards", "touchdowns", "interceptions"],
            ),
            ("rushing", &["attempts", "yards", "touchdowns", "fumbles"]),
            ("receiving", &["receptions", "yards", "touchdowns"]),
            (
                "defense",
                &["tackles", "sacks", "interceptions", "forced_fumbles"],
            ),
        ],
        Sport::Basketball => &[
            ("general", &["games_played", "games_started", "minutes"]),
            (
                "shooting",
                &[
                    "field_goals_made",
                    "field_goals_attempted",
                    "three_pointers_made",
                    "three_pointers_attempted",
                    "free_throws_made",
                    "free_throws_attempted",
                    "points",
                ],
            ),
            ("rebounding", &["offensive", "defensive", "total"]),
            ("playmaking", &["assists", "steals", "blocks", "turnovers"]),
        ],
        Sport::Baseball => &[
            ("general", &["games_played", "games_started"]),
            (
                "batting",
                &[
                    "at_bats",
                    "runs",
                    "hits",
                    "doubles",
                    "triples",
                    "home_runs",
                    "runs_batted_in",
                    "walks",
                    "strikeouts",
                    "stolen_bases",
                ],
            ),
            (
                "pitching",
                &[
                    "innings_pitched",
                    "wins",
                    "losses",
                    "saves",
                    "earned_runs",
                    "strikeouts",
                    "walks",
                ],
            ),
            ("fielding", &["putouts", "assists", "errors"]),
        ],
        Sport::Soccer => &[
            ("general", &["games_played", "games_started", "minutes"]),
            ("offense", &["goals", "assists", "shots", "shots_on_goal"]),
            ("goalkeeping", &["saves", "goals_against", "shutouts"]),
        ],
        Sport::Volleyball => &[
            ("general", &["matches_played", "sets_played"]),
            ("attack", &["kills", "attack_errors", "total_attacks"]),
            ("serve", &["aces", "service_errors"]),
            ("defense", &["digs", "block_solos", "block_assists"]),
        ],
        Sport::Lacrosse => &[
            ("general", &["games_played", "games_started"]),
            ("offense", &["goals", "assists", "shots", "ground_balls"]),
            ("defense", &["caused_turnovers", "ground_balls"]),
            ("goalkeeping", &["saves", "goals_against"]),
        ],
    }
}
