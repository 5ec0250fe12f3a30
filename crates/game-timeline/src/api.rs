use crate::adapters::{StatsApiAdapter, TracingEventsPort};
use crate::errors::{TlError, TlResult};
use crate::export::jsonl::{build_lines, serialize_lines, write_lines};
use crate::locator::locate_latest_game;
use crate::model::{
    ExportResult, GameContext, GameReference, HighlightReport, RunDigest, Subject, Timeline,
};
use crate::policy::{TimelinePolicyHandle, TimelinePolicyView};
use crate::ports::{EventsPort, StatsPort};
use crate::reader::{build_plan, fetch_snapshots};
use crate::stitch::{
    build_context, extract_timeline, filter_significant, is_significant, select_notable_play,
};
use async_trait::async_trait;
use stats_api::StatsClient;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[async_trait]
pub trait GameTimeline: Send + Sync {
    /// Most recent game for `subject` in `season` (policy default when `None`).
    async fn locate(&self, subject: Subject, season: Option<&str>) -> TlResult<GameReference>;
    /// Full event timeline of one game, in timecode order.
    async fn reconstruct(&self, game_pk: u64) -> TlResult<Timeline>;
    /// Notable events for a player, from `game` or the player's latest game.
    async fn highlights(
        &self,
        player_id: u64,
        game: Option<GameReference>,
    ) -> TlResult<HighlightReport>;
    async fn game_context(
        &self,
        game: GameReference,
        team_id: Option<u64>,
    ) -> TlResult<GameContext>;
    /// Reconstructs a game and renders it as JSONL, to `path` when given.
    async fn export(
        &self,
        game_pk: u64,
        player_id: Option<u64>,
        path: Option<&Path>,
    ) -> TlResult<ExportResult>;
    fn policy_view(&self) -> TimelinePolicyView;
}

pub struct TimelineService {
    stats: Arc<dyn StatsPort>,
    policy: TimelinePolicyHandle,
    events: Arc<dyn EventsPort>,
}

impl TimelineService {
    pub fn new(
        stats: Arc<dyn StatsPort>,
        policy: TimelinePolicyHandle,
        events: Arc<dyn EventsPort>,
    ) -> Self {
        Self {
            stats,
            policy,
            events,
        }
    }

    pub fn with_client(client: StatsClient, policy: TimelinePolicyHandle) -> Self {
        Self::new(
            Arc::new(StatsApiAdapter::new(client)),
            policy,
            Arc::new(TracingEventsPort),
        )
    }

    fn started(
        &self,
        operation: &'static str,
        subject: Option<Subject>,
        game_pk: Option<u64>,
    ) -> Instant {
        self.events.run_started(&RunDigest {
            operation,
            subject,
            game_pk,
        });
        Instant::now()
    }

    fn finish<T>(&self, started_at: Instant, result: TlResult<T>) -> TlResult<T> {
        let latency_ms = started_at.elapsed().as_millis();
        match &result {
            Ok(_) => self.events.run_finished(true, latency_ms, None),
            Err(err) => self.events.run_finished(false, latency_ms, Some(err)),
        }
        result
    }

    async fn locate_game(
        &self,
        subject: Subject,
        season: Option<&str>,
        policy: &TimelinePolicyView,
    ) -> TlResult<GameReference> {
        let season = policy.resolve_season(season);
        locate_latest_game(self.stats.as_ref(), subject, &season)
            .await?
            .ok_or_else(|| TlError::NoGameFound(format!("{subject} in season {season}")))
    }

    async fn build_timeline(&self, game_pk: u64, policy: &TimelinePolicyView) -> TlResult<Timeline> {
        let plan = build_plan(game_pk, policy)?;
        let snapshots = fetch_snapshots(Arc::clone(&self.stats), &plan).await?;
        self.events.snapshots_fetched(game_pk, snapshots.len());
        Ok(extract_timeline(game_pk, &snapshots))
    }

    async fn build_highlights(
        &self,
        player_id: u64,
        game: Option<GameReference>,
        policy: &TimelinePolicyView,
    ) -> TlResult<HighlightReport> {
        let game = match game {
            Some(game) => game,
            None => {
                self.locate_game(Subject::Player(player_id), None, policy)
                    .await?
            }
        };
        let timeline = self.build_timeline(game.game_pk, policy).await?;
        let notable_events = filter_significant(&timeline, player_id);
        let selection = select_notable_play(&notable_events);
        Ok(HighlightReport {
            game,
            player_id,
            total_records: timeline.len(),
            notable_events,
            selection,
        })
    }

    async fn build_game_context(
        &self,
        game: GameReference,
        team_id: Option<u64>,
    ) -> TlResult<GameContext> {
        let content = self.stats.game_content(game.game_pk).await?;
        let team = match team_id {
            Some(team_id) => Some(self.stats.team(team_id).await?),
            None => None,
        };
        Ok(build_context(game, team, &content))
    }

    async fn build_export(
        &self,
        game_pk: u64,
        player_id: Option<u64>,
        path: Option<&Path>,
        policy: &TimelinePolicyView,
    ) -> TlResult<ExportResult> {
        let timeline = self.build_timeline(game_pk, policy).await?;
        let notable: HashSet<usize> = match player_id {
            Some(player_id) => timeline
                .iter()
                .enumerate()
                .filter(|(_, record)| is_significant(record, player_id))
                .map(|(index, _)| index)
                .collect(),
            None => HashSet::new(),
        };

        let serialized = serialize_lines(&build_lines(&timeline, &notable), policy.max_line_bytes)?;
        let mut result = ExportResult {
            path: None,
            lines: None,
            total_records: timeline.len(),
            notable_records: notable.len(),
        };
        match path {
            Some(path) => result.path = Some(write_lines(path, &serialized)?),
            None => result.lines = Some(serialized),
        }
        Ok(result)
    }
}

#[async_trait]
impl GameTimeline for TimelineService {
    async fn locate(&self, subject: Subject, season: Option<&str>) -> TlResult<GameReference> {
        let started_at = self.started("locate", Some(subject), None);
        let policy = self.policy.snapshot();
        let result = self.locate_game(subject, season, &policy).await;
        self.finish(started_at, result)
    }

    async fn reconstruct(&self, game_pk: u64) -> TlResult<Timeline> {
        let started_at = self.started("reconstruct", None, Some(game_pk));
        let policy = self.policy.snapshot();
        let result = self.build_timeline(game_pk, &policy).await;
        self.finish(started_at, result)
    }

    async fn highlights(
        &self,
        player_id: u64,
        game: Option<GameReference>,
    ) -> TlResult<HighlightReport> {
        let started_at = self.started(
            "highlights",
            Some(Subject::Player(player_id)),
            game.as_ref().map(|g| g.game_pk),
        );
        let policy = self.policy.snapshot();
        let result = self.build_highlights(player_id, game, &policy).await;
        self.finish(started_at, result)
    }

    async fn game_context(
        &self,
        game: GameReference,
        team_id: Option<u64>,
    ) -> TlResult<GameContext> {
        let started_at = self.started(
            "game_context",
            team_id.map(Subject::Team),
            Some(game.game_pk),
        );
        let result = self.build_game_context(game, team_id).await;
        self.finish(started_at, result)
    }

    async fn export(
        &self,
        game_pk: u64,
        player_id: Option<u64>,
        path: Option<&Path>,
    ) -> TlResult<ExportResult> {
        let started_at = self.started("export", player_id.map(Subject::Player), Some(game_pk));
        let policy = self.policy.snapshot();
        let result = self.build_export(game_pk, player_id, path, &policy).await;
        self.finish(started_at, result)
    }

    fn policy_view(&self) -> TimelinePolicyView {
        self.policy.snapshot()
    }
}
