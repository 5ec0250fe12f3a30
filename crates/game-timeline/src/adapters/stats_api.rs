use crate::errors::{TlError, TlResult};
use crate::model::{TeamSummary, Timecode};
use crate::ports::StatsPort;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use stats_api::model::{GameLog, Schedule};
use stats_api::{StatsApiError, StatsClient};

impl From<StatsApiError> for TlError {
    fn from(err: StatsApiError) -> Self {
        match err {
            StatsApiError::InvalidArg(msg) => TlError::InvalidArg(msg),
            err @ StatsApiError::Decode { .. } => TlError::Malformed(err.to_string()),
            other => TlError::Upstream(other.to_string()),
        }
    }
}

pub struct StatsApiAdapter {
    client: StatsClient,
}

impl StatsApiAdapter {
    pub fn new(client: StatsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatsPort for StatsApiAdapter {
    async fn schedule(&self, team_id: u64, season: &str) -> TlResult<Schedule> {
        Ok(self.client.schedule(team_id, season).await?)
    }

    async fn player_game_log(&self, person_id: u64, season: &str) -> TlResult<GameLog> {
        Ok(self.client.player_game_log(person_id, Some(season)).await?)
    }

    async fn timecodes(&self, game_pk: u64) -> TlResult<Vec<Timecode>> {
        let codes = self.client.timecodes(game_pk).await?;
        Ok(codes.into_iter().map(Timecode).collect())
    }

    async fn live_feed(&self, game_pk: u64, timecode: &Timecode) -> TlResult<JsonValue> {
        Ok(self
            .client
            .live_feed(game_pk, Some(timecode.as_str()))
            .await?)
    }

    async fn game_content(&self, game_pk: u64) -> TlResult<JsonValue> {
        Ok(self.client.game_content(game_pk).await?)
    }

    async fn team(&self, team_id: u64) -> TlResult<TeamSummary> {
        let (teams, coaches) = tokio::try_join!(
            self.client.team(team_id),
            self.client.team_coaches(team_id)
        )?;
        let details = teams.teams.into_iter().next();
        Ok(TeamSummary {
            id: team_id,
            name: details.as_ref().and_then(|t| t.name.clone()),
            abbreviation: details.as_ref().and_then(|t| t.abbreviation.clone()),
            venue: details.and_then(|t| t.venue.name),
            manager: coaches.manager().map(str::to_string),
        })
    }
}
