use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the postboard binary.
#[derive(Debug, Parser)]
#[command(
    name = "postboard",
    version,
    about = "List, write, edit and delete posts on a postboard backend"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "POSTBOARD_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the API base URL, e.g. <http://127.0.0.1:8000/api/>.
    #[arg(
        long = "api-base-url",
        env = "POSTBOARD_API_BASE_URL",
        value_name = "URL",
        global = true
    )]
    pub api_base_url: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Load posts and print the view.
    List,
    /// Create a post.
    Create(CreateArgs),
    /// Replace the title and content of a post.
    Update(UpdateArgs),
    /// Delete a post.
    Delete(DeleteArgs),
    /// Interactive session over a single store.
    Shell,
}

#[derive(Debug, Args, Clone)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
}

#[derive(Debug, Args, Clone)]
pub struct UpdateArgs {
    #[arg(long)]
    pub id: i64,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
}

#[derive(Debug, Args, Clone)]
pub struct DeleteArgs {
    #[arg(long)]
    pub id: i64,
    /// Skip the confirmation prompt.
    #[arg(long, short = 'y', action = clap::ArgAction::SetTrue)]
    pub yes: bool,
}
