use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::platform::logging::LogDestination;

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Manage newsdesk content from the terminal")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (RON). Defaults to ./newsdesk.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, global = true, env = "NEWSDESK_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the stored session
    #[arg(long, global = true, env = "NEWSDESK_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true, env = "NEWSDESK_LOG")]
    pub log_level: Option<String>,

    /// Where log output goes
    #[arg(long, global = true, value_enum)]
    pub log_to: Option<LogDestination>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and store the session tokens
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "NEWSDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List one page of a resource
    List {
        resource: ResourceKind,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Show a single item
    Show { resource: ResourceKind, id: String },
    /// Create an item from a JSON object, optionally with media files
    Create {
        resource: ResourceKind,
        /// JSON object with the item's fields
        #[arg(long)]
        data: String,
        /// Media file as FIELD=PATH; switches the request to multipart
        #[arg(long = "file")]
        files: Vec<String>,
    },
    /// Update an item from a JSON object, optionally with media files
    Update {
        resource: ResourceKind,
        id: String,
        #[arg(long)]
        data: String,
        #[arg(long = "file")]
        files: Vec<String>,
    },
    /// Delete an item
    Delete { resource: ResourceKind, id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Articles,
    Advertisements,
    Categories,
    Locations,
    Videos,
    Epapers,
    States,
    Cities,
    Users,
}
