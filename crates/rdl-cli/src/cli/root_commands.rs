use clap::Subcommand;

use crate::cli::subcommands::{ProjectCommands, ReviewCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Review status counts and recent uploads.
    Dashboard,
    /// Contract projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// AI checklist review.
    Review {
        #[command(subcommand)]
        action: ReviewCommands,
    },
}
