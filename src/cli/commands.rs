//! Command implementations for the CLI
//!
//! Commands return Results and write to a caller-supplied sink; process
//! exit handling stays in main.

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use crate::client::{ApiError, NodeStore, PoolStore};
use crate::context::{self, Config, Context, ContextError};
use crate::format::{self, node_format, pool_format, Format, FormatError};
use crate::lifecycle;

use super::{ContextAction, ListArgs};

/// Errors that can occur during command execution
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to drain: {0}")]
    DrainFailed(String),

    #[error("Node failed to leave: {0}")]
    LeaveFailed(String),
}

/// Result type for commands
pub type CommandResult<T> = Result<T, CommandError>;

// ============================================================================
// Listing and inspection
// ============================================================================

/// List storage pools in the requested format
pub async fn pool_ls<S, W>(store: &S, args: &ListArgs, out: &mut W) -> CommandResult<()>
where
    S: PoolStore + ?Sized,
    W: Write,
{
    let pools = store.list_pools().await?;
    let format = pool_format(&args.format, args.quiet);
    format::render(&pools, &format, out)?;
    Ok(())
}

/// Show one pool as JSON
pub async fn pool_inspect<S, W>(store: &S, id: &str, out: &mut W) -> CommandResult<()>
where
    S: PoolStore + ?Sized,
    W: Write,
{
    let pool = store.pool(id).await?;
    format::render(&[pool], &Format::Json, out)?;
    Ok(())
}

/// List cluster nodes in the requested format
pub async fn node_ls<S, W>(store: &S, args: &ListArgs, out: &mut W) -> CommandResult<()>
where
    S: NodeStore + ?Sized,
    W: Write,
{
    let nodes = store.list_nodes().await?;
    let format = node_format(&args.format, args.quiet);
    format::render(&nodes, &format, out)?;
    Ok(())
}

/// Show one node as JSON
pub async fn node_inspect<S, W>(store: &S, id: &str, out: &mut W) -> CommandResult<()>
where
    S: NodeStore + ?Sized,
    W: Write,
{
    let node = store.node(id).await?;
    format::render(&[node], &Format::Json, out)?;
    Ok(())
}

// ============================================================================
// Node lifecycle
// ============================================================================

/// Drain one or more nodes. Successful targets are echoed one per line in
/// input order; any failures produce a single aggregate error.
pub async fn node_drain<S, W>(store: &S, targets: &[String], out: &mut W) -> CommandResult<()>
where
    S: NodeStore + ?Sized,
    W: Write,
{
    let outcome = lifecycle::drain(store, targets).await;
    for id in &outcome.succeeded {
        writeln!(out, "{}", id)?;
    }
    if !outcome.is_success() {
        return Err(CommandError::DrainFailed(outcome.failed_list()));
    }
    Ok(())
}

/// Make one or more nodes leave the cluster. Same reporting contract as
/// [`node_drain`].
pub async fn node_leave<S, W>(store: &S, targets: &[String], out: &mut W) -> CommandResult<()>
where
    S: NodeStore + ?Sized,
    W: Write,
{
    let outcome = lifecycle::leave(store, targets).await;
    for id in &outcome.succeeded {
        writeln!(out, "{}", id)?;
    }
    if !outcome.is_success() {
        return Err(CommandError::LeaveFailed(outcome.failed_list()));
    }
    Ok(())
}

// ============================================================================
// Context management
// ============================================================================

/// Info about a context for display
#[derive(Debug, Clone)]
pub struct ContextInfo {
    pub name: String,
    pub url: String,
    pub is_current: bool,
}

/// List all contexts, sorted by name
pub fn context_list(config: &Config) -> Vec<ContextInfo> {
    let current = config.current_context.as_deref();
    let mut contexts: Vec<_> = config
        .contexts
        .iter()
        .map(|(name, ctx)| ContextInfo {
            name: name.clone(),
            url: ctx.url.clone(),
            is_current: Some(name.as_str()) == current,
        })
        .collect();

    contexts.sort_by(|a, b| a.name.cmp(&b.name));
    contexts
}

fn write_context_list<W: Write>(contexts: &[ContextInfo], out: &mut W) -> CommandResult<()> {
    let width = contexts
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    writeln!(out, "  {:width$}   URL", "NAME", width = width)?;
    for ctx in contexts {
        let marker = if ctx.is_current { "*" } else { " " };
        writeln!(out, "{} {:width$}   {}", marker, ctx.name, ctx.url, width = width)?;
    }
    Ok(())
}

/// Run a context subcommand, persisting the config after mutations.
pub fn run_context<W: Write>(
    action: ContextAction,
    config: &mut Config,
    config_path: &PathBuf,
    out: &mut W,
) -> CommandResult<()> {
    match action {
        ContextAction::List => {
            write_context_list(&context_list(config), out)?;
        }
        ContextAction::Current => {
            let name = config.current_context.as_deref().unwrap_or("default");
            writeln!(out, "Current context: {} ({})", name, config.current_url()?)?;
        }
        ContextAction::Use { name } => {
            context::set_current_context(config, &name)?;
            context::save_config_to(config, config_path)?;
            writeln!(out, "Switched to context {}", name)?;
        }
        ContextAction::Add { name, url, api_key } => {
            let mut ctx = Context::new(name.as_str(), url);
            if let Some(key) = api_key {
                ctx = ctx.with_api_key(key);
            }
            context::add_context(config, ctx);
            context::save_config_to(config, config_path)?;
            writeln!(out, "Added context {}", name)?;
        }
        ContextAction::Delete { name } => {
            if context::remove_context(config, &name).is_none() {
                return Err(ContextError::ContextNotFound(name).into());
            }
            context::save_config_to(config, config_path)?;
            writeln!(out, "Deleted context {}", name)?;
        }
    }
    Ok(())
}
