use rdl_core::enums::{ExportFormat, ReviewState};
use rdl_core::responses::{ReviewSummary, ReviewView};
use rdl_export::{FileSink, renderer_for};
use rdl_review::{IgnoreReason, KeySignal, Outcome};
use serde::Serialize;

use crate::cli::subcommands::ReviewCommands;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::parse::{parse_enum, position};
use crate::context::{AppContext, resolve_output_dir};
use crate::output::output;

/// Result of a review mutation: whether it applied, and the gate flags after.
#[derive(Debug, Serialize)]
struct MutationResponse {
    #[serde(flatten)]
    outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    suppress_default: Option<bool>,
    #[serde(flatten)]
    summary: ReviewSummary,
}

#[derive(Debug, Serialize)]
struct ExportResponse {
    #[serde(flatten)]
    outcome: Outcome,
    project_id: u32,
    format: ExportFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

/// Flat checklist for `--format table`.
#[derive(Debug, Serialize)]
struct ChecklistTable {
    project_id: u32,
    project_name: String,
    state: ReviewState,
    checked: String,
    rows: Vec<ChecklistRow>,
}

#[derive(Debug, Serialize)]
struct ChecklistRow {
    pos: String,
    category: String,
    item: String,
    result: String,
    confirmed: bool,
    comments: String,
    draft: String,
}

/// Handle `rdl review`.
pub fn handle(
    action: &ReviewCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReviewCommands::Show { project } => show(*project, ctx, flags),
        ReviewCommands::Check {
            project,
            category,
            item,
        } => {
            let (c, i) = (position(*category, "category")?, position(*item, "item")?);
            let outcome = ctx.engine.toggle_checked(*project, c, i)?;
            respond(ctx, *project, outcome, None, flags)
        }
        ReviewCommands::CheckAll { project, clear } => {
            let outcome = ctx.engine.set_all_checked(*project, !clear)?;
            respond(ctx, *project, outcome, None, flags)
        }
        ReviewCommands::Draft {
            project,
            category,
            item,
            text,
        } => {
            let (c, i) = (position(*category, "category")?, position(*item, "item")?);
            let outcome = ctx.engine.set_draft_comment(*project, c, i, text)?;
            respond(ctx, *project, outcome, None, flags)
        }
        ReviewCommands::Submit {
            project,
            category,
            item,
        } => {
            let (c, i) = (position(*category, "category")?, position(*item, "item")?);
            let response = ctx
                .engine
                .submit_draft_on_key(*project, c, i, KeySignal::Enter)?;
            respond(
                ctx,
                *project,
                response.outcome,
                Some(response.suppress_default),
                flags,
            )
        }
        ReviewCommands::Comment {
            project,
            category,
            item,
            text,
            author,
        } => {
            let (c, i) = (position(*category, "category")?, position(*item, "item")?);
            let outcome = match author {
                Some(author) => ctx.engine.add_comment_as(*project, c, i, text, author)?,
                None => ctx.engine.add_comment(*project, c, i, text)?,
            };
            respond(ctx, *project, outcome, None, flags)
        }
        ReviewCommands::Finalize { project } => {
            let outcome = ctx.engine.finalize(*project)?;
            respond(ctx, *project, outcome, None, flags)
        }
        ReviewCommands::Cancel { project } => {
            let outcome = ctx.engine.cancel_review(*project)?;
            respond(ctx, *project, outcome, None, flags)
        }
        ReviewCommands::Export {
            project,
            artifact,
            out,
        } => export(*project, artifact.as_deref(), out.as_deref(), ctx, flags),
    }
}

fn respond(
    ctx: &mut AppContext,
    project: u32,
    outcome: Outcome,
    suppress_default: Option<bool>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let Outcome::Ignored(reason) = outcome {
        if !flags.quiet {
            eprintln!("rdl: nothing changed ({})", ignore_message(reason));
        }
    }
    let response = MutationResponse {
        outcome,
        suppress_default,
        summary: ctx.engine.summary(project)?,
    };
    output(&response, flags.format)
}

const fn ignore_message(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::BlankComment => "comment is empty",
        IgnoreReason::ReviewComplete => "review is finalized; cancel it to make changes",
        IgnoreReason::NotAllChecked => "confirm every item before finalizing",
        IgnoreReason::AlreadyComplete => "review is already finalized",
        IgnoreReason::NotComplete => "review is not finalized",
        IgnoreReason::NotExportReady => "finalize the review before exporting",
        IgnoreReason::ExportInFlight => "an export of this project is still running",
        IgnoreReason::KeyNotHandled => "key does not submit drafts",
    }
}

fn show(project: Option<u32>, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let view = ctx.engine.view(project)?;
    if flags.format != OutputFormat::Table {
        return output(&view, flags.format);
    }
    match view {
        ReviewView::Selected {
            summary,
            categories,
        } => {
            let rows = categories
                .iter()
                .enumerate()
                .flat_map(|(c, category)| {
                    category
                        .items
                        .iter()
                        .enumerate()
                        .map(move |(i, item)| ChecklistRow {
                            pos: format!("{}.{}", c + 1, i + 1),
                            category: category.name.clone(),
                            item: item.name.clone(),
                            result: item.result.label().to_string(),
                            confirmed: item.is_checked,
                            comments: item
                                .comments
                                .iter()
                                .map(|comment| format!("{}: {}", comment.author, comment.text))
                                .collect::<Vec<_>>()
                                .join("\n"),
                            draft: item.draft_comment.clone(),
                        })
                })
                .collect();
            let table = ChecklistTable {
                project_id: summary.project_id,
                project_name: summary.project_name,
                state: summary.state,
                checked: format!("{}/{}", summary.checked_items, summary.total_items),
                rows,
            };
            output(&table, flags.format)
        }
        ReviewView::NoProjectSelected { message } => output(&message, flags.format),
    }
}

fn export(
    project: u32,
    format: Option<&str>,
    out: Option<&str>,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let format = match format {
        Some(raw) => parse_enum::<ExportFormat>(raw, "format")?,
        None => ctx.config.export.default_format,
    };
    let renderer = renderer_for(format);
    let sink = FileSink::new(resolve_output_dir(out, &ctx.config));

    let report = ctx.engine.export_artifact(project, renderer.as_ref(), &sink)?;
    if let Outcome::Ignored(reason) = report.outcome {
        if !flags.quiet {
            eprintln!("rdl: nothing exported ({})", ignore_message(reason));
        }
    }

    let response = ExportResponse {
        outcome: report.outcome,
        project_id: project,
        format,
        file_name: report.artifact.as_ref().map(|a| a.file_name.clone()),
        media_type: report.artifact.as_ref().map(|a| a.media_type.clone()),
        path: report.path.map(|p| p.display().to_string()),
    };
    output(&response, flags.format)
}
