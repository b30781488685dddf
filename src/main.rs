/*!
 * poolctl - Compacting Pool Driver
 *
 * Runs a pool script (see `compacting_pool::script`) against a fresh pool
 * and prints the outcome of every command.
 */

use anyhow::{bail, Context, Result};
use clap::Parser;
use compacting_pool::{init_tracing, parse_script, PoolConfig, Session};
use std::io::Read;
use std::path::PathBuf;
use tracing::{error, info};

/// Drive a compacting handle pool from a command script
#[derive(Parser)]
#[command(name = "poolctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Script file to run (reads stdin when omitted)
    script: Option<PathBuf>,

    /// Bytes per arena (overrides POOL_CAPACITY)
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Print the final pool snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    init_tracing(level);

    let mut config = PoolConfig::from_env().context("invalid pool configuration")?;
    if let Some(capacity) = cli.capacity {
        config = config.with_capacity(capacity);
        config.validate().context("invalid --capacity")?;
    }

    let source = match &cli.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read script from stdin")?;
            buf
        }
    };

    let commands =
        parse_script(&source).map_err(|e| anyhow::anyhow!("{:?}", miette::Report::new(e)))?;
    info!(commands = commands.len(), capacity = config.capacity, "Running pool script");

    let mut session = Session::new(&config);
    let mut violations = 0usize;
    for command in commands {
        match session.execute(command) {
            Ok(outcome) => println!("{}", outcome),
            Err(e) => {
                violations += 1;
                error!(?command, "contract violation");
                eprintln!("{:?}", miette::Report::new(e));
            }
        }
    }

    if cli.json {
        let snapshot = serde_json::to_string_pretty(&session.pool().snapshot())
            .context("failed to serialize pool snapshot")?;
        println!("{}", snapshot);
    }

    if violations > 0 {
        bail!("{} command(s) violated the pool contract", violations);
    }
    Ok(())
}
