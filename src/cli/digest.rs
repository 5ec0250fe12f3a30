use anyhow::{Context, Result};
use clap::Args;

use super::context::CliContext;
use super::locate::SubjectArgs;
use super::output::{emit, OutputFormat};
use crate::digest::{DigestOutcome, DigestRequest};

#[derive(Args, Clone, Debug)]
pub struct DigestArgs {
    #[command(flatten)]
    pub subject: SubjectArgs,

    /// Recipient address
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub family_name: String,

    /// Language the digest is written in
    #[arg(long, default_value = "English")]
    pub language: String,

    /// Team used for context when the subject is a player
    #[arg(long)]
    pub team_id: Option<u64>,

    #[arg(long)]
    pub season: Option<String>,

    /// Voice the summary is written in
    #[arg(long)]
    pub persona: Option<String>,

    /// Media reference attached instead of the recap image
    #[arg(long)]
    pub media_url: Option<String>,

    /// Build the payloads without delivering them
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn cmd_digest(args: DigestArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let request = DigestRequest {
        email: args.email,
        first_name: args.first_name,
        family_name: args.family_name,
        language: args.language,
        subject: args.subject.subject()?,
        team_id: args.team_id,
        season: args.season,
        persona: args.persona,
        media_url: args.media_url,
        dry_run: args.dry_run,
    };
    let subject = request.subject;
    let runner = ctx.digest_runner(request.dry_run).await?;
    let outcome = runner
        .run(request)
        .await
        .with_context(|| format!("generating digest for {subject}"))?;
    emit(output, &outcome, print_outcome)
}

fn print_outcome(outcome: &DigestOutcome) {
    println!("subject: {}", outcome.notification.subject);
    println!("to: {}", outcome.notification.receiver);
    if let Some(url) = &outcome.notification.highlight_url {
        println!("highlight: {url}");
    }
    match &outcome.receipt {
        Some(receipt) => println!("delivered (status {})", receipt.status),
        None => {
            println!();
            println!("{}", outcome.notification.body_header);
            println!("{}", outcome.notification.body_content);
        }
    }
}
