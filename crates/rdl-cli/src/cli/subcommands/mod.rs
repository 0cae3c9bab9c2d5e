mod project;
mod review;

pub use project::ProjectCommands;
pub use review::ReviewCommands;
