//! Wire types for the FPL API responses we consume.
//!
//! Only the fields this crate actually reads are declared; serde ignores
//! the rest of the (large) upstream payloads.

use serde::Deserialize;

/// Response from `GET /bootstrap-static/`: the static catalog of players,
/// clubs, and position types for the season.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapStatic {
    /// All players ("elements" in FPL terms).
    pub elements: Vec<Element>,
    pub teams: Vec<Team>,
    pub element_types: Vec<ElementType>,
}

/// One player from the bootstrap catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    pub id: i64,
    pub first_name: String,
    pub second_name: String,
    /// Club id, resolved against [`Team::id`].
    pub team: i64,
    /// Position-type id, resolved against [`ElementType::id`].
    pub element_type: i64,
    /// Recent-form figure as a numeric string (e.g. `"5.2"`).
    #[serde(default)]
    pub form: String,
    /// Current price in tenths of a million (e.g. `125` = £12.5m).
    #[serde(default)]
    pub now_cost: i64,
}

/// One club from the bootstrap catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

/// One position type (goalkeeper, defender, ...) from the bootstrap catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementType {
    pub id: i64,
    /// Short position code, e.g. `"GKP"`, `"DEF"`, `"MID"`, `"FWD"`.
    pub singular_name_short: String,
}

/// Response from `GET /entry/{manager_id}/`: one manager's team summary.
#[derive(Debug, Clone, Deserialize)]
pub struct ManagerEntry {
    /// Current gameweek number, absent between seasons.
    pub current_event: Option<i32>,
    /// Team name chosen by the manager.
    pub name: String,
    pub player_first_name: String,
    pub player_last_name: String,
    #[serde(default)]
    pub summary_event_points: Option<i64>,
    #[serde(default)]
    pub summary_overall_points: Option<i64>,
    #[serde(default)]
    pub event_transfers_left: Option<i32>,
    #[serde(default)]
    pub leagues: Leagues,
}

/// League memberships on a manager entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Leagues {
    #[serde(default)]
    pub classic: Vec<ClassicLeague>,
}

/// One classic-league standing for a manager.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassicLeague {
    pub name: String,
    pub entry_rank: Option<i64>,
}

/// Response from `GET /entry/{manager_id}/event/{gw}/picks/`.
#[derive(Debug, Clone, Deserialize)]
pub struct GameweekPicks {
    pub picks: Vec<Pick>,
    #[serde(default)]
    pub entry_history: Option<EntryHistory>,
}

/// One squad slot in a manager's gameweek picks.
///
/// `position` 1..=11 is the starting eleven; 12..=15 is the bench.
#[derive(Debug, Clone, Deserialize)]
pub struct Pick {
    /// Player id, resolved against the bootstrap catalog.
    pub element: i64,
    pub position: i32,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_vice_captain: bool,
}

/// Per-gameweek financials on a picks response.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryHistory {
    /// Money in the bank in tenths of a million.
    pub bank: i64,
}

/// Response from `GET /entry/{manager_id}/history/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ManagerHistory {
    /// One entry per finished or in-progress gameweek of the season.
    #[serde(default)]
    pub current: Vec<GameweekResult>,
}

/// One gameweek's score in a manager's season history.
#[derive(Debug, Clone, Deserialize)]
pub struct GameweekResult {
    /// Gameweek number.
    pub event: i32,
    pub points: i64,
}
