use anyhow::{Context, Result};
use clap::Args;
use game_timeline::{GameReference, GameTimeline, Subject};

use super::context::CliContext;
use super::output::{emit, OutputFormat};

/// Exactly one of `--team` or `--player`.
#[derive(Args, Clone, Debug)]
#[group(required = true, multiple = false)]
pub struct SubjectArgs {
    /// Team identifier
    #[arg(long)]
    pub team: Option<u64>,

    /// Player identifier
    #[arg(long)]
    pub player: Option<u64>,
}

impl SubjectArgs {
    pub fn subject(&self) -> Result<Subject> {
        match (self.team, self.player) {
            (Some(team), None) => Ok(Subject::Team(team)),
            (None, Some(player)) => Ok(Subject::Player(player)),
            _ => anyhow::bail!("pass exactly one of --team or --player"),
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct LocateArgs {
    #[command(flatten)]
    pub subject: SubjectArgs,

    /// Season year; defaults to the configured or current season
    #[arg(long)]
    pub season: Option<String>,
}

pub async fn cmd_locate(args: LocateArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let subject = args.subject.subject()?;
    let game = ctx
        .timeline()
        .await?
        .locate(subject, args.season.as_deref())
        .await
        .with_context(|| format!("locating latest game for {subject}"))?;
    emit(output, &game, print_game)
}

pub(crate) fn print_game(game: &GameReference) {
    let away = game.away_team.as_deref().unwrap_or("?");
    let home = game.home_team.as_deref().unwrap_or("?");
    println!("game {} on {}: {away} at {home}", game.game_pk, game.date);
    if let Some(position) = game.game_in_series {
        println!("game {position} of the series");
    }
}
