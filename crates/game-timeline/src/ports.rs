use crate::errors::{TlError, TlResult};
use crate::model::{RunDigest, TeamSummary, Timecode};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use stats_api::model::{GameLog, Schedule};

/// Read side of the statistics service, as the pipeline sees it.
#[async_trait]
pub trait StatsPort: Send + Sync {
    async fn schedule(&self, team_id: u64, season: &str) -> TlResult<Schedule>;
    async fn player_game_log(&self, person_id: u64, season: &str) -> TlResult<GameLog>;
    async fn timecodes(&self, game_pk: u64) -> TlResult<Vec<Timecode>>;
    async fn live_feed(&self, game_pk: u64, timecode: &Timecode) -> TlResult<JsonValue>;
    async fn game_content(&self, game_pk: u64) -> TlResult<JsonValue>;
    async fn team(&self, team_id: u64) -> TlResult<TeamSummary>;
}

pub trait EventsPort: Send + Sync {
    fn run_started(&self, digest: &RunDigest);
    fn snapshots_fetched(&self, game_pk: u64, count: usize);
    fn run_finished(&self, ok: bool, latency_ms: u128, err: Option<&TlError>);
}
