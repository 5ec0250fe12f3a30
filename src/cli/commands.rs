use clap::Subcommand;

use super::config::ConfigArgs;
use super::digest::DigestArgs;
use super::highlights::HighlightsArgs;
use super::locate::LocateArgs;
use super::timeline::TimelineArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Find the most recent game for a team or player
    Locate(LocateArgs),

    /// Reconstruct a game's event timeline from live-feed snapshots
    Timeline(TimelineArgs),

    /// List a player's notable events from their latest game
    Highlights(HighlightsArgs),

    /// Generate and deliver a personalized digest
    Digest(DigestArgs),

    /// Inspect diamond-digest configuration
    Config(ConfigArgs),
}
