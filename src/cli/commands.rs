//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Group management from the command line
#[derive(Parser, Debug)]
#[command(name = "groupkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Group to operate on
    #[arg(short, long, global = true, env = "GROUPKIT_GROUP")]
    pub group: Option<u64>,

    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Security cookie for authorized calls
    #[arg(long, global = true, env = "ROBLOSECURITY", hide_env_values = true)]
    pub cookie: Option<String>,

    /// Override the groups API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the group snapshot
    Info,

    /// List roles ordered by rank
    Roles,

    /// Show a member's role
    MemberRole {
        /// Member user id
        user: u64,
    },

    /// Move a member one rank up
    Promote {
        /// Member user id
        user: u64,
    },

    /// Move a member one rank down
    Demote {
        /// Member user id
        user: u64,
    },

    /// Move a member by an arbitrary number of ranks
    ChangeRank {
        /// Member user id
        user: u64,

        /// Positions to move (negative moves down)
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },

    /// Assign a specific role to a member
    SetRank {
        /// Member user id
        user: u64,

        /// Role id to assign
        role: u64,
    },

    /// Remove a member from the group
    Exile {
        /// Member user id
        user: u64,
    },

    /// Show the current shout
    Shout,

    /// Replace the shout
    PostShout {
        /// New shout text
        message: String,
    },

    /// Stream pending join requests
    JoinRequests {
        /// Maximum pages to fetch (default: all)
        #[arg(long)]
        pages: Option<u32>,
    },

    /// Stream wall posts
    Posts {
        /// Maximum pages to fetch (default: all)
        #[arg(long)]
        pages: Option<u32>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}
