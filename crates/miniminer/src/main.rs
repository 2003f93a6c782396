use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use miniminer::{config, MinerConfig, Session};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Used when the operator enters an empty login.
const DEFAULT_LOGIN: &str = "lithander_2:foo@btcguild.com:8332";

/// Minimal getwork miner
#[derive(Parser)]
#[command(name = "miniminer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pool login as user:password@host:port (prompted for if absent)
    #[arg(short, long, env = "MINIMINER_POOL")]
    pool: Option<String>,

    /// Nonces searched between work refresh checks
    #[arg(long, default_value_t = config::DEFAULT_BATCH_SIZE)]
    batch_size: u32,

    /// Seconds before work is considered stale
    #[arg(long, default_value_t = config::DEFAULT_MAX_WORK_AGE.as_secs())]
    max_work_age: u64,

    /// Seconds before a pool request times out
    #[arg(long, default_value_t = config::DEFAULT_REQUEST_TIMEOUT.as_secs())]
    timeout: u64,

    /// Nonce to start searching from
    #[arg(long, default_value_t = 0)]
    start_nonce: u32,

    /// Restart after an error without waiting for Enter
    #[arg(long)]
    no_pause: bool,

    /// Seconds to wait before restarting when --no-pause is set
    #[arg(long, default_value_t = 5)]
    retry_delay: u64,

    /// Verbose mode (-v)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose > 0 { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = MinerConfig {
        batch_size: cli.batch_size,
        max_work_age: Duration::from_secs(cli.max_work_age),
        request_timeout: Duration::from_secs(cli.timeout),
    };

    banner();
    let mut session = Session::new(config, cli.start_nonce);

    loop {
        let login = match &cli.pool {
            Some(login) => login.clone(),
            None => select_pool()?,
        };

        let err = session.run(&login);
        error!("ERROR: {err}");

        if cli.no_pause {
            info!("Restarting in {}s", cli.retry_delay);
            thread::sleep(Duration::from_secs(cli.retry_delay));
        } else {
            prompt("Hit 'Enter' to try again...")?;
        }
    }
}

fn banner() {
    println!("*****************************");
    println!("*** Minimal Bitcoin Miner ***");
    println!("*****************************");
    println!();
}

/// Ask for a pool login, falling back to the default on an empty line.
fn select_pool() -> Result<String> {
    println!("Chose a Mining Pool 'user:password@url:port' or leave empty to skip.");
    let login = prompt("Select Pool: ")?;
    if login.is_empty() {
        Ok(DEFAULT_LOGIN.to_string())
    } else {
        Ok(login)
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        anyhow::bail!("stdin closed");
    }
    Ok(line.trim().to_string())
}
