//! The id -> player-info catalog joined from the bootstrap collections.

use std::collections::HashMap;

use crate::types::BootstrapStatic;

/// Position code used when a player or position type cannot be resolved.
const UNKNOWN: &str = "UNK";

/// Denormalized player details for prompt formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInfo {
    /// Full name, `"<first> <second>"`.
    pub name: String,
    /// Club name, `"UNK"` when the team id is unknown.
    pub team: String,
    /// Short position code (`"GKP"`, `"DEF"`, ...), `"UNK"` when unknown.
    pub position: String,
    /// Recent form as a numeric string, `"N/A"` when absent.
    pub form: String,
    /// Current price formatted as `"£12.5m"`.
    pub cost: String,
}

/// Lookup table from player id to [`PlayerInfo`], built once per request
/// from the bootstrap catalog.
#[derive(Debug, Clone)]
pub struct PlayerCatalog {
    players: HashMap<i64, PlayerInfo>,
}

impl PlayerCatalog {
    /// Join the bootstrap collections (players, teams, position types) into
    /// the id -> [`PlayerInfo`] mapping.
    pub fn from_bootstrap(bootstrap: &BootstrapStatic) -> Self {
        let team_names: HashMap<i64, &str> = bootstrap
            .teams
            .iter()
            .map(|t| (t.id, t.name.as_str()))
            .collect();
        let position_names: HashMap<i64, &str> = bootstrap
            .element_types
            .iter()
            .map(|p| (p.id, p.singular_name_short.as_str()))
            .collect();

        let players = bootstrap
            .elements
            .iter()
            .map(|p| {
                let info = PlayerInfo {
                    name: format!("{} {}", p.first_name, p.second_name),
                    team: team_names
                        .get(&p.team)
                        .map_or(UNKNOWN, |n| n)
                        .to_string(),
                    position: position_names
                        .get(&p.element_type)
                        .map_or(UNKNOWN, |n| n)
                        .to_string(),
                    form: if p.form.is_empty() {
                        "N/A".to_string()
                    } else {
                        p.form.clone()
                    },
                    cost: format!("£{:.1}m", p.now_cost as f64 / 10.0),
                };
                (p.id, info)
            })
            .collect();

        Self { players }
    }

    /// Resolve a player id to its details.
    ///
    /// Unknown ids return a placeholder (`"ID <n>"`) so a stale or partial
    /// catalog can never fail context formatting.
    pub fn resolve(&self, id: i64) -> PlayerInfo {
        self.players.get(&id).cloned().unwrap_or(PlayerInfo {
            name: format!("ID {id}"),
            team: UNKNOWN.to_string(),
            position: UNKNOWN.to_string(),
            form: "N/A".to_string(),
            cost: "N/A".to_string(),
        })
    }

    /// Number of players in the catalog.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
