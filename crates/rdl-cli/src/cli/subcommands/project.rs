use clap::Subcommand;

/// Contract project registry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// List projects, most recently uploaded first.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Rows per page (defaults to --limit, then general.page_size).
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Get a project by ID.
    Get { id: u32 },
    /// Search the new-project intake list.
    Search {
        /// code, name, manager, or company.
        #[arg(long, default_value = "code")]
        field: String,
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Load an intake candidate into the registry.
    Load { key: String },
    /// Record an uploaded contract file for a project.
    Attach { id: u32, file_name: String },
}
