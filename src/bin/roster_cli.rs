//! roster-cli: inspect the record file from the command line.
//!
//! Reads the same file the gateway serves, seeding it on first use, and
//! prints either every record or only the adults.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use roster_gateway::config::DEFAULT_DATA_FILE;
use roster_gateway::domain::{ADULT_AGE_THRESHOLD, EventBus, RecordCollection};
use roster_gateway::persistence::JsonFileStore;
use roster_gateway::service::RecordService;

/// Inspect the roster record file.
#[derive(Parser, Debug)]
#[command(name = "roster-cli")]
#[command(version)]
struct Cli {
    /// Path of the JSON record file
    #[arg(long, env = "DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Enable verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every stored record
    List,
    /// Print the records older than the adult threshold
    Adults,
    /// Create the record file with default records if it does not exist
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    let store = JsonFileStore::new(cli.data_file.clone());
    let service = RecordService::new(store, EventBus::new(1));

    match cli.command {
        Command::List => {
            let records = service
                .load_records()
                .await
                .with_context(|| format!("loading {}", cli.data_file.display()))?;
            println!("Records ({}):", records.len());
            print_records(&records);
        }
        Command::Adults => {
            let outcome = service
                .load_adults()
                .await
                .with_context(|| format!("loading {}", cli.data_file.display()))?;
            println!(
                "Adults (age > {ADULT_AGE_THRESHOLD}): {} of {}",
                outcome.adults.len(),
                outcome.examined
            );
            print_records(&outcome.adults);
        }
        Command::Seed => {
            let created = service
                .store()
                .ensure_seeded()
                .await
                .with_context(|| format!("seeding {}", cli.data_file.display()))?;
            if created {
                println!("Created {} with default records", cli.data_file.display());
            } else {
                println!("{} already exists; left unchanged", cli.data_file.display());
            }
        }
    }

    Ok(())
}

fn print_records(records: &RecordCollection) {
    for record in records {
        println!("- {} ({} years)", record.name(), record.age());
    }
}
