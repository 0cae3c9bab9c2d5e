use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Dashboard => commands::dashboard::handle(ctx, flags),
        Commands::Project { action } => commands::project::handle(action, ctx, flags),
        Commands::Review { action } => commands::review::handle(action, ctx, flags),
    }
}

/// Whether the command can change the registry or a session, so the state
/// file has to be written back afterwards.
#[must_use]
pub fn command_mutates_state(command: &Commands) -> bool {
    use crate::cli::subcommands::ProjectCommands;

    match command {
        Commands::Dashboard => false,
        Commands::Project { action } => matches!(
            action,
            ProjectCommands::Load { .. } | ProjectCommands::Attach { .. }
        ),
        // Even `show` opens a session and may start the project's review.
        Commands::Review { .. } => true,
    }
}
