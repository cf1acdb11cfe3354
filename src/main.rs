use std::io::{self, Write};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use storctl::cli::{self, Cli, CommandResult, Commands, NodeCommand, PoolCommand};
use storctl::client::ApiClient;
use storctl::context;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Initialize logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    if let Err(e) = run(args).await {
        eprintln!("{}", e);
        process::exit(1);
    }
}

async fn run(args: Cli) -> CommandResult<()> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(context::default_config_path);
    let mut config = context::load_config_from(&config_path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Commands::Pool(pool) => {
            let client = api_client(&config, args.host.as_deref())?;
            match pool.command {
                PoolCommand::Ls(ls) => cli::pool_ls(&client, &ls, &mut out).await?,
                PoolCommand::Inspect { pool } => {
                    cli::pool_inspect(&client, &pool, &mut out).await?
                }
            }
        }
        Commands::Node(node) => {
            let client = api_client(&config, args.host.as_deref())?;
            match node.command {
                NodeCommand::Ls(ls) => cli::node_ls(&client, &ls, &mut out).await?,
                NodeCommand::Inspect { node } => {
                    cli::node_inspect(&client, &node, &mut out).await?
                }
                NodeCommand::Drain(targets) => {
                    cli::node_drain(&client, &targets.nodes, &mut out).await?
                }
                NodeCommand::Leave(targets) => {
                    cli::node_leave(&client, &targets.nodes, &mut out).await?
                }
            }
        }
        Commands::Context(ctx) => {
            cli::run_context(ctx.action, &mut config, &config_path, &mut out)?
        }
    }

    out.flush()?;
    Ok(())
}

fn api_client(
    config: &context::Config,
    host: Option<&str>,
) -> Result<ApiClient, context::ContextError> {
    match host {
        Some(url) => Ok(ApiClient::new(url)),
        None => ApiClient::from_config(config),
    }
}
