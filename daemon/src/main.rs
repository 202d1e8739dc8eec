//! Curation daemon: applies calls to a persisted world, one per invocation,
//! or replays a whole call log.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use curate_curation::{Call, Receipt};
use curate_daemon::{ContentView, DaemonConfig, World};
use curate_ledger::Ledger;
use curate_types::{Amount, ContentId, Identity};

#[derive(Parser)]
#[command(name = "curate-daemon", about = "Content curation protocol executor")]
struct Cli {
    /// Snapshot file holding the world.
    #[arg(long, env = "CURATE_STATE_PATH")]
    state_path: Option<PathBuf>,

    /// Governance owner (only read by `init`).
    #[arg(long, env = "CURATE_OWNER")]
    owner: Option<String>,

    /// Escrow account (only read by `init`).
    #[arg(long, env = "CURATE_ESCROW_ACCOUNT")]
    escrow_account: Option<String>,

    /// Minimum stake at deployment (only read by `init`).
    #[arg(long, env = "CURATE_INITIAL_MIN_STAKE")]
    initial_min_stake: Option<u64>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CURATE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CURATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "CURATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Deploy a fresh world.
    Init {
        /// Overwrite an existing snapshot.
        #[arg(long)]
        force: bool,
    },
    /// Credit an account from outside the protocol.
    Fund { who: String, amount: u128 },
    /// Submit content, escrowing the current minimum stake.
    Submit {
        who: String,
        /// Hex-encoded content hash.
        content_hash: String,
    },
    /// Vote on content: "upvote" or "downvote".
    Vote {
        who: String,
        content_id: u64,
        direction: String,
    },
    /// Distribute the stake of voted content.
    Distribute { who: String, content_id: u64 },
    /// Change the minimum stake (owner only).
    SetMinStake { who: String, value: u128 },
    /// Print a content record.
    Content { content_id: u64 },
    /// Print a curator's stats.
    Curator { who: String },
    /// Print the current minimum stake.
    MinStake,
    /// Print an account balance.
    Balance { who: String },
    /// Apply a JSON-lines call log.
    Replay { log: PathBuf },
    /// Print the state root.
    StateRoot,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    curate_utils::init_logging(config.log_format()?, &config.log_level)?;

    match cli.command {
        Command::Init { force } => {
            let world = World::init(&config, force)?;
            println!("{}", world.engine().state_root()?);
        }
        Command::Fund { who, amount } => {
            let mut world = World::open(&config)?;
            let balance = world.fund(&Identity::new(who), Amount::new(amount))?;
            world.save()?;
            println!("{balance}");
        }
        Command::Submit { who, content_hash } => {
            return apply(
                &config,
                Call::SubmitContent {
                    sender: Identity::new(who),
                    content_hash,
                },
            );
        }
        Command::Vote {
            who,
            content_id,
            direction,
        } => {
            return apply(
                &config,
                Call::VoteOnContent {
                    sender: Identity::new(who),
                    content_id,
                    direction,
                },
            );
        }
        Command::Distribute { who, content_id } => {
            return apply(&config, Call::distribute(who, content_id));
        }
        Command::SetMinStake { who, value } => {
            return apply(&config, Call::set_min_stake(who, value));
        }
        Command::Content { content_id } => {
            let world = World::open(&config)?;
            let record = world.engine().get_content(ContentId::new(content_id));
            match record {
                Ok(record) => println!("{}", serde_json::to_string(&ContentView::from(record))?),
                Err(e) => {
                    println!("{}", serde_json::to_string(&Receipt::err(&e))?);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Curator { who } => {
            let world = World::open(&config)?;
            let stats = world.engine().get_curator_stats(&Identity::new(who));
            println!("{}", serde_json::to_string(&stats)?);
        }
        Command::MinStake => {
            let world = World::open(&config)?;
            println!("{}", world.engine().get_min_stake());
        }
        Command::Balance { who } => {
            let world = World::open(&config)?;
            println!("{}", world.engine().ledger().balance(&Identity::new(who)));
        }
        Command::Replay { log } => {
            let mut world = World::open(&config)?;
            let file = File::open(&log).with_context(|| format!("open {}", log.display()))?;
            let report = world.replay(BufReader::new(file))?;
            for receipt in &report.receipts {
                println!("{}", serde_json::to_string(receipt)?);
            }
            println!(
                "{}",
                serde_json::json!({
                    "stats": report.stats,
                    "state_root": report.state_root.to_string(),
                })
            );
        }
        Command::StateRoot => {
            let world = World::open(&config)?;
            println!("{}", world.engine().state_root()?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// File config (if any) as the base, CLI flags and env vars on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<DaemonConfig> {
    let mut config = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)?,
        None => DaemonConfig::default(),
    };
    if let Some(path) = &cli.state_path {
        config.state_path = path.clone();
    }
    if let Some(owner) = &cli.owner {
        config.owner = owner.clone();
    }
    if let Some(escrow) = &cli.escrow_account {
        config.escrow_account = escrow.clone();
    }
    if let Some(stake) = cli.initial_min_stake {
        config.initial_min_stake = stake;
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Apply one call, print its receipt, and exit non-zero if it was rejected.
fn apply(config: &DaemonConfig, call: Call) -> anyhow::Result<ExitCode> {
    let mut world = World::open(config)?;
    let receipt = world.apply_and_save(&call)?;
    println!("{}", serde_json::to_string(&receipt)?);
    Ok(if receipt.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "curate-daemon",
            "--owner",
            "council",
            "--initial-min-stake",
            "7",
            "vote",
            "alice",
            "1",
            "upvote",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.owner, "council");
        assert_eq!(config.initial_min_stake, 7);
        assert!(matches!(cli.command, Command::Vote { content_id: 1, .. }));
    }
}
