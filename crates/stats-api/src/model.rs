//! Wire projections of the statistics API responses.
//!
//! Only the fields the digest pipeline reads are modelled. Anything the
//! upstream service may leave out is optional or defaulted so that a sparse
//! response still decodes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Schedule {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScheduleDate {
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGame {
    pub game_pk: u64,
    #[serde(default)]
    pub games_in_series: Option<u32>,
    #[serde(default)]
    pub teams: MatchupTeams,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchupTeams {
    #[serde(default)]
    pub home: MatchupSide,
    #[serde(default)]
    pub away: MatchupSide,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchupSide {
    #[serde(default)]
    pub team: NamedRef,
}

impl Schedule {
    /// Flattens the per-date grouping into `(date, game)` pairs, keeping API order.
    pub fn flatten(&self) -> impl Iterator<Item = (&str, &ScheduleGame)> {
        self.dates.iter().flat_map(|date| {
            date.games
                .iter()
                .map(move |game| (date.date.as_str(), game))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameLog {
    #[serde(default)]
    pub stats: Vec<GameLogGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameLogGroup {
    #[serde(default)]
    pub splits: Vec<GameLogSplit>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameLogSplit {
    #[serde(default)]
    pub season: Option<String>,
    pub date: String,
    #[serde(default)]
    pub is_home: Option<bool>,
    #[serde(default)]
    pub team: NamedRef,
    #[serde(default)]
    pub opponent: NamedRef,
    pub game: GameLogGame,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameLogGame {
    pub game_pk: u64,
}

impl GameLog {
    /// Splits of the first stats group; the game log endpoint returns one group.
    pub fn splits(&self) -> &[GameLogSplit] {
        self.stats
            .first()
            .map(|group| group.splits.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<TeamDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TeamDetails {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub venue: NamedRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RosterResponse {
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RosterEntry {
    #[serde(default)]
    pub person: PersonRef,
    #[serde(default)]
    pub job: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl RosterResponse {
    /// Full name of the first coach listed with the `Manager` job title.
    pub fn manager(&self) -> Option<&str> {
        self.roster
            .iter()
            .find(|entry| entry.job.as_deref() == Some("Manager"))
            .and_then(|entry| entry.person.full_name.as_deref())
    }
}
