use super::config::cmd_config;
use super::digest::cmd_digest;
use super::env::CliArgs;
use super::highlights::cmd_highlights;
use super::locate::cmd_locate;
use super::timeline::cmd_timeline;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Locate(args) => cmd_locate(args, ctx, cli.output).await,
        Commands::Timeline(args) => cmd_timeline(args, ctx, cli.output).await,
        Commands::Highlights(args) => cmd_highlights(args, ctx, cli.output).await,
        Commands::Digest(args) => cmd_digest(args, ctx, cli.output).await,
        Commands::Config(args) => cmd_config(args, ctx, cli.output),
    }
}
