use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdl dashboard`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let recent = effective_limit(None, flags.limit, ctx.config.general.dashboard_recent);
    let stats = ctx.engine.registry().dashboard(usize::try_from(recent)?);
    output(&stats, flags.format)
}
