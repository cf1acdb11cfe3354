//! CLI module for storctl
//!
//! Subcommand surface:
//! - `storctl pool ls` - List storage pools
//! - `storctl pool inspect` - Show one pool as JSON
//! - `storctl node ls` - List cluster nodes
//! - `storctl node inspect` - Show one node as JSON
//! - `storctl node drain` - Drain the volumes from one or more nodes
//! - `storctl node leave` - Make one or more nodes leave the cluster
//! - `storctl context` - Manage cluster contexts

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

pub use commands::*;

#[derive(Parser, Debug)]
#[command(name = "storctl")]
#[command(about = "Administer a distributed storage cluster")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: ~/.storctl/config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Cluster API URL, overriding the active context
    #[arg(long, env = "STORCTL_HOST", global = true)]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage storage pools
    Pool(PoolArgs),

    /// Manage cluster nodes
    Node(NodeArgs),

    /// Manage cluster contexts
    Context(ContextArgs),
}

/// Arguments for the pool command
#[derive(Parser, Debug)]
pub struct PoolArgs {
    #[command(subcommand)]
    pub command: PoolCommand,
}

#[derive(Subcommand, Debug)]
pub enum PoolCommand {
    /// List storage pools
    #[command(name = "ls", visible_alias = "list")]
    Ls(ListArgs),

    /// Show one pool as JSON
    Inspect {
        /// Pool name or ID
        pool: String,
    },
}

/// Arguments for the node command
#[derive(Parser, Debug)]
pub struct NodeArgs {
    #[command(subcommand)]
    pub command: NodeCommand,
}

#[derive(Subcommand, Debug)]
pub enum NodeCommand {
    /// List cluster nodes
    #[command(name = "ls", visible_alias = "list")]
    Ls(ListArgs),

    /// Show one node as JSON
    Inspect {
        /// Node name or ID
        node: String,
    },

    /// Drain the volumes from one or more nodes
    Drain(TargetArgs),

    /// Make one or more nodes leave the cluster
    Leave(TargetArgs),
}

/// Output selection shared by the listing commands
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format: "table", "raw", "json", or a custom template
    #[arg(long, default_value = "table")]
    pub format: String,

    /// Only display names
    #[arg(short, long)]
    pub quiet: bool,
}

/// One or more target node names or IDs
#[derive(Parser, Debug)]
pub struct TargetArgs {
    #[arg(value_name = "NODE", required = true)]
    pub nodes: Vec<String>,
}

/// Arguments for the context command
#[derive(Parser, Debug)]
pub struct ContextArgs {
    #[command(subcommand)]
    pub action: ContextAction,
}

#[derive(Subcommand, Debug)]
pub enum ContextAction {
    /// List all contexts
    List,

    /// Show current context
    Current,

    /// Switch to a context
    Use {
        /// Context name
        name: String,
    },

    /// Add a new context
    Add {
        /// Context name
        name: String,

        /// Cluster API URL
        #[arg(long)]
        url: String,

        /// API key for authentication
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Delete a context
    Delete {
        /// Context name
        name: String,
    },
}
