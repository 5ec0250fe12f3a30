use crate::config::StatsApiConfig;
use crate::errors::{StatsApiError, StatsResult};
use crate::model::{GameLog, RosterResponse, Schedule, TeamsResponse};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

/// Read-only client for the statistics API. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct StatsClient {
    client: Client,
    base: Url,
    sport_id: u32,
}

impl StatsClient {
    pub fn new(config: &StatsApiConfig) -> StatsResult<Self> {
        let base = Url::parse(config.base_url.trim_end_matches('/')).map_err(|err| {
            StatsApiError::InvalidArg(format!("invalid base url {}: {err}", config.base_url))
        })?;

        // Accept-Encoding is left to reqwest so gzip bodies are decoded transparently.
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|err| {
                StatsApiError::InvalidArg(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self {
            client,
            base,
            sport_id: config.sport_id,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Season schedule for one team, hydrated with team names.
    pub async fn schedule(&self, team_id: u64, season: &str) -> StatsResult<Schedule> {
        let query = [
            ("sportId", self.sport_id.to_string()),
            ("teamId", team_id.to_string()),
            ("season", season.to_string()),
            ("hydrate", "team".to_string()),
        ];
        self.get("/v1/schedule", &query).await
    }

    /// Per-game log for a player, hydrated with the game reference.
    pub async fn player_game_log(
        &self,
        person_id: u64,
        season: Option<&str>,
    ) -> StatsResult<GameLog> {
        let mut query = vec![
            ("stats", "gameLog".to_string()),
            ("hydrate", "game".to_string()),
        ];
        if let Some(season) = season {
            query.push(("season", season.to_string()));
        }
        self.get(&format!("/v1/people/{person_id}/stats"), &query)
            .await
    }

    /// Ordered timecodes of every recorded state change, oldest first.
    pub async fn timecodes(&self, game_pk: u64) -> StatsResult<Vec<String>> {
        self.get(&format!("/v1.1/game/{game_pk}/feed/live/timestamps"), &[])
            .await
    }

    /// Full live-feed document, optionally pinned to a timecode.
    pub async fn live_feed(&self, game_pk: u64, timecode: Option<&str>) -> StatsResult<JsonValue> {
        let query: Vec<(&str, String)> = timecode
            .map(|tc| vec![("timecode", tc.to_string())])
            .unwrap_or_default();
        self.get(&format!("/v1.1/game/{game_pk}/feed/live"), &query)
            .await
    }

    pub async fn game_content(&self, game_pk: u64) -> StatsResult<JsonValue> {
        self.get(&format!("/v1/game/{game_pk}/content"), &[]).await
    }

    pub async fn team(&self, team_id: u64) -> StatsResult<TeamsResponse> {
        self.get(&format!("/v1/teams/{team_id}"), &[]).await
    }

    pub async fn team_coaches(&self, team_id: u64) -> StatsResult<RosterResponse> {
        self.get(&format!("/v1/teams/{team_id}/coaches"), &[]).await
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> StatsResult<Url> {
        let raw = format!("{}{}", self.base.as_str().trim_end_matches('/'), path);
        let mut url = Url::parse(&raw)
            .map_err(|err| StatsApiError::InvalidArg(format!("invalid endpoint {raw}: {err}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> StatsResult<T> {
        let url = self.endpoint(path, query)?;
        debug!(target: "stats_api", url = %url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| StatsApiError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response unavailable>".to_string());
            return Err(StatsApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| StatsApiError::Network {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| StatsApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
