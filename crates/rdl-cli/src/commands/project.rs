use anyhow::{Context, bail};
use rdl_core::enums::SearchField;
use rdl_review::ProjectRegistry;
use rdl_review::paging::paginate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rdl project`.
pub fn handle(
    action: &ProjectCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::List { page, per_page } => list(*page, *per_page, ctx, flags),
        ProjectCommands::Get { id } => {
            let project = ctx
                .engine
                .registry()
                .project(*id)
                .with_context(|| format!("project {id} not found"))?;
            output(project, flags.format)
        }
        ProjectCommands::Search {
            field,
            query,
            page,
            per_page,
        } => search(field, query, *page, *per_page, ctx, flags),
        ProjectCommands::Load { key } => {
            let project = ctx.engine.registry_mut().load_candidate(key)?;
            output(project, flags.format)
        }
        ProjectCommands::Attach { id, file_name } => {
            let project = ctx.engine.registry_mut().attach_file(*id, file_name)?;
            output(project, flags.format)
        }
    }
}

fn list(
    page: u32,
    per_page: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let per_page = effective_limit(per_page, flags.limit, ctx.config.general.page_size);
    let registry = ctx.engine.registry();
    let Some(listing) = registry.page(page, per_page) else {
        bail!(
            "page {page} is out of range ({} projects, {per_page} per page)",
            registry.projects().len()
        );
    };
    output(&listing, flags.format)
}

fn search(
    field: &str,
    query: &str,
    page: u32,
    per_page: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let field = parse_enum::<SearchField>(field, "field")?;
    let per_page = effective_limit(per_page, flags.limit, ctx.config.general.page_size);
    let hits = ctx.engine.registry().search_candidates(field, query)?;
    let Some(results) = paginate(&hits, page, per_page) else {
        bail!("page {page} is out of range ({} matches)", hits.len());
    };
    output(&results, flags.format)
}
