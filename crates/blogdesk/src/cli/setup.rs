use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "blogdesk", bin_name = "blogdesk", version)]
#[command(about = "Administer blog post metadata from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to blogdesk.toml in the user config directory)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Root URL of the blog API, overriding config and environment
    #[arg(long, global = true, value_name = "URL", help_heading = "Options")]
    pub base_url: Option<String>,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

/// Which slice of the listing a command operates on.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Page number (10 records per page)
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Filter by title or tags
    #[arg(short, long, default_value = "")]
    pub search: String,
}

/// Form fields. Omitted fields keep their current value when editing.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub title: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    #[arg(long)]
    pub summary: Option<String>,

    /// Publication date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub file_path: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to the management console
    #[command(display_order = 1)]
    Login {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short = 'P', long)]
        password: Option<String>,
    },

    /// Log out and forget the stored credential
    #[command(display_order = 2)]
    Logout,

    /// Show whether a session is active
    #[command(display_order = 3)]
    Status,

    /// List blogs
    #[command(alias = "ls", display_order = 10)]
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputMode::Text)]
        output: OutputMode,
    },

    /// Add a blog
    #[command(alias = "n", display_order = 11)]
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit a blog on the given page
    #[command(alias = "e", display_order = 12)]
    Edit {
        /// Id of the blog
        id: String,

        #[command(flatten)]
        view: ViewArgs,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a blog on the given page
    #[command(alias = "rm", display_order = 13)]
    Delete {
        /// Id of the blog
        id: String,

        #[command(flatten)]
        view: ViewArgs,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Interactive management console
    #[command(display_order = 20)]
    Shell,

    /// Show the resolved configuration
    #[command(display_order = 30)]
    Config,
}
