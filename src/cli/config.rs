use anyhow::Result;
use clap::{Args, Subcommand};

use super::context::CliContext;
use super::output::{emit, OutputFormat};
use crate::config::validate_file;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Validate the configuration file
    Validate,
}

pub fn cmd_config(args: ConfigArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let path = ctx.config_path();
    match args.action {
        ConfigAction::Show => {
            let mut shown = ctx.config().clone();
            if shown.summary.api_key.is_some() {
                shown.summary.api_key = Some(REDACTED.to_string());
            }
            if shown.notify.bearer_token.is_some() {
                shown.notify.bearer_token = Some(REDACTED.to_string());
            }
            emit(output, &shown, |config| {
                println!("# effective configuration (file: {})", path.display());
                match serde_yaml::to_string(config) {
                    Ok(yaml) => print!("{yaml}"),
                    Err(err) => println!("# failed to render: {err}"),
                }
            })?;
        }
        ConfigAction::Validate => {
            if path.exists() {
                validate_file(path)?;
                println!("Configuration file {} is valid", path.display());
            } else {
                println!(
                    "No configuration file at {}; defaults are valid",
                    path.display()
                );
            }
        }
    }
    Ok(())
}

const REDACTED: &str = "<redacted>";
