use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use game_timeline::GameTimeline;

use super::context::CliContext;
use super::output::{emit, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct TimelineArgs {
    /// Game identifier
    #[arg(long)]
    pub game_pk: u64,

    /// Mark records that are notable for this player
    #[arg(long)]
    pub player: Option<u64>,

    /// Write JSONL to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

pub async fn cmd_timeline(args: TimelineArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let result = ctx
        .timeline()
        .await?
        .export(args.game_pk, args.player, args.out.as_deref())
        .await
        .with_context(|| format!("reconstructing timeline for game {}", args.game_pk))?;

    match (&result.path, &result.lines) {
        (None, Some(lines)) => {
            for line in lines {
                println!("{line}");
            }
            Ok(())
        }
        _ => emit(output, &result, |result| {
            if let Some(path) = &result.path {
                println!(
                    "wrote {} records ({} notable) to {}",
                    result.total_records,
                    result.notable_records,
                    path.display()
                );
            }
        }),
    }
}
