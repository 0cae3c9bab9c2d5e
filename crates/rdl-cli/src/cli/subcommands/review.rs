use clap::Subcommand;

/// Checklist review commands.
///
/// Category and item positions are 1-based, as printed by `rdl review show`.
#[derive(Clone, Debug, Subcommand)]
pub enum ReviewCommands {
    /// Show a project's checklist, or the project prompt when no ID is given.
    Show { project: Option<u32> },
    /// Toggle one item's confirmation checkbox.
    Check {
        project: u32,
        category: usize,
        item: usize,
    },
    /// Confirm every item at once.
    CheckAll {
        project: u32,
        /// Clear every checkbox instead.
        #[arg(long)]
        clear: bool,
    },
    /// Replace an item's draft comment.
    Draft {
        project: u32,
        category: usize,
        item: usize,
        text: String,
    },
    /// Submit an item's draft comment (same as pressing Enter in the editor).
    Submit {
        project: u32,
        category: usize,
        item: usize,
    },
    /// Add a comment to an item.
    Comment {
        project: u32,
        category: usize,
        item: usize,
        text: String,
        /// Defaults to review.default_author.
        #[arg(long)]
        author: Option<String>,
    },
    /// Finish the review once every item is confirmed.
    Finalize { project: u32 },
    /// Re-open a finished review.
    Cancel { project: u32 },
    /// Export a finished review.
    Export {
        project: u32,
        /// pdf or spreadsheet (defaults to export.default_format).
        #[arg(long = "as", value_name = "FORMAT")]
        artifact: Option<String>,
        /// Output directory (defaults to export.output_dir).
        #[arg(long)]
        out: Option<String>,
    },
}
