use anyhow::{Context, Result};
use clap::Args;
use game_timeline::{GameTimeline, HighlightReport, NotablePlaySelection, Subject};

use super::context::CliContext;
use super::locate::print_game;
use super::output::{emit, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct HighlightsArgs {
    /// Player identifier
    #[arg(long)]
    pub player: u64,

    /// Season year; defaults to the configured or current season
    #[arg(long)]
    pub season: Option<String>,
}

pub async fn cmd_highlights(
    args: HighlightsArgs,
    ctx: &CliContext,
    output: OutputFormat,
) -> Result<()> {
    let service = ctx.timeline().await?;
    let game = match &args.season {
        Some(season) => Some(
            service
                .locate(Subject::Player(args.player), Some(season.as_str()))
                .await?,
        ),
        None => None,
    };
    let report = service
        .highlights(args.player, game)
        .await
        .with_context(|| format!("collecting highlights for player {}", args.player))?;
    emit(output, &report, print_report)
}

fn print_report(report: &HighlightReport) {
    print_game(&report.game);
    println!(
        "{} of {} records are notable for player {}",
        report.notable_events.len(),
        report.total_records,
        report.player_id
    );
    for event in &report.notable_events {
        println!("  {}", event.narrate());
    }
    match &report.selection {
        NotablePlaySelection::Play(id) => println!("highlight play: {id}"),
        NotablePlaySelection::NoNotablePlay => println!("no notable play"),
    }
}
