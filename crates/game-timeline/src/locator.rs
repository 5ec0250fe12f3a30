//! Finds the most recent game for a team or a player.
//!
//! Dates are ISO `YYYY-MM-DD`, so plain string comparison orders them. When
//! several games share the latest date (a doubleheader) the first one in API
//! response order is returned.

use crate::errors::TlResult;
use crate::model::{GameReference, Subject};
use crate::ports::StatsPort;
use stats_api::model::{GameLog, Schedule};
use tracing::{debug, warn};

pub async fn locate_latest_game(
    stats: &dyn StatsPort,
    subject: Subject,
    season: &str,
) -> TlResult<Option<GameReference>> {
    let located = match subject {
        Subject::Team(team_id) => stats
            .schedule(team_id, season)
            .await
            .map(|schedule| latest_scheduled_game(&schedule)),
        Subject::Player(person_id) => stats
            .player_game_log(person_id, season)
            .await
            .map(|log| latest_logged_game(&log)),
    };

    match &located {
        Ok(Some(game)) => debug!(%subject, season, game_pk = game.game_pk, date = %game.date, "located latest game"),
        Ok(None) => debug!(%subject, season, "no games on record"),
        Err(err) => warn!(%subject, season, error = %err, "game lookup failed"),
    }
    located
}

pub fn latest_scheduled_game(schedule: &Schedule) -> Option<GameReference> {
    let mut latest: Option<(&str, &stats_api::model::ScheduleGame)> = None;
    for (date, game) in schedule.flatten() {
        if latest.map_or(true, |(best, _)| date > best) {
            latest = Some((date, game));
        }
    }

    latest.map(|(date, game)| GameReference {
        game_pk: game.game_pk,
        date: date.to_string(),
        home_team: game.teams.home.team.name.clone(),
        away_team: game.teams.away.team.name.clone(),
        game_in_series: game.games_in_series,
    })
}

pub fn latest_logged_game(log: &GameLog) -> Option<GameReference> {
    let mut latest: Option<&stats_api::model::GameLogSplit> = None;
    for split in log.splits() {
        if latest.map_or(true, |best| split.date.as_str() > best.date.as_str()) {
            latest = Some(split);
        }
    }

    latest.map(|split| {
        let (home_team, away_team) = match split.is_home {
            Some(true) => (split.team.name.clone(), split.opponent.name.clone()),
            Some(false) => (split.opponent.name.clone(), split.team.name.clone()),
            None => (None, None),
        };
        GameReference {
            game_pk: split.game.game_pk,
            date: split.date.clone(),
            home_team,
            away_team,
            game_in_series: None,
        }
    })
}
