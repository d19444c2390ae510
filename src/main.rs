use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::{
    fs,
    fs::OpenOptions,
    path::{Path, PathBuf},
    process::ExitCode,
};

use siaview::api::{
    ContractsResponse, DownloadsResponse, FilesResponse, HostsResponse, ListEntry, TransferEntry,
};
use siaview::config::Config;
use siaview::logic::errors::{classify_error, format_error_message};
use siaview::logic::money::{format_siacoins, Money};
use siaview::logic::{directory, estimator, formatting, search, transfers};

/// Sia renter views from daemon snapshots
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to the temp-dir siaview-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one directory of a `/renter/files` snapshot
    Ls {
        files: PathBuf,
        #[arg(long, default_value = "")]
        path: String,
    },
    /// Search a `/renter/files` snapshot
    Search {
        files: PathBuf,
        text: String,
        #[arg(long, default_value = "")]
        path: String,
    },
    /// Show the upload queue from a `/renter/files` snapshot
    Uploads { files: PathBuf },
    /// Show the download queue from a `/renter/downloads` snapshot
    Downloads { downloads: PathBuf },
    /// Estimate storage purchasable with FUNDS (SC) from a `/hostdb/active` snapshot
    Estimate { hosts: PathBuf, funds: String },
    /// Total size of a `/renter/files` snapshot
    Usage { files: PathBuf },
    /// Amount spent out of ALLOWANCE (SC) given a `/renter/contracts` snapshot
    Spending { contracts: PathBuf, allowance: String },
}

fn debug_log_path() -> PathBuf {
    std::env::temp_dir().join("siaview-debug.log")
}

fn init_logging(debug: bool) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    if debug {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(debug_log_path())
            .context("Failed to open debug log")?;
        builder
            .filter_level(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(file)));
    } else {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.format_timestamp_millis().init();
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_entries(entries: &[ListEntry]) {
    for entry in entries {
        let marker = if entry.is_directory() { "d" } else { "-" };
        println!(
            "{} {:>8} {:>5.2}x {:>3}% {}",
            marker, entry.size, entry.redundancy, entry.uploadprogress, entry.name
        );
    }
}

fn print_transfers(entries: &[TransferEntry]) {
    for entry in entries {
        println!(
            "{:>3}% {:<20} {}",
            entry.progress,
            entry.status.as_str(),
            entry.siapath
        );
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let mode = config.path_match;

    match args.command {
        Command::Ls { files, path } => {
            let response: FilesResponse = read_json(&files)?;
            let entries = directory::ls_with(&response.files, &path, mode);
            if args.json {
                print_json(&entries)?;
            } else {
                print_entries(&entries);
            }
        }
        Command::Search { files, text, path } => {
            let response: FilesResponse = read_json(&files)?;
            let found = search::search_files_with(&response.files, &text, &path, mode);
            if args.json {
                print_json(&found)?;
            } else {
                for file in &found {
                    println!("{}", file.siapath);
                }
            }
        }
        Command::Uploads { files } => {
            let response: FilesResponse = read_json(&files)?;
            let entries = transfers::parse_uploads(&response.files);
            if args.json {
                print_json(&entries)?;
            } else {
                print_transfers(&entries);
            }
        }
        Command::Downloads { downloads } => {
            let response: DownloadsResponse = read_json(&downloads)?;
            let entries = transfers::parse_downloads(&response.downloads);
            if args.json {
                print_json(&entries)?;
            } else {
                print_transfers(&entries);
            }
        }
        Command::Estimate { hosts, funds } => {
            let response: HostsResponse = read_json(&hosts)?;
            let funds = Money::from_siacoins(&funds)?;
            let estimate = estimator::estimated_storage(&funds, &response.hosts, &config.economics)
                .context("Failed to estimate storage")?;
            if args.json {
                print_json(&estimate)?;
            } else {
                println!("{}", estimate);
            }
        }
        Command::Usage { files } => {
            let response: FilesResponse = read_json(&files)?;
            let usage = formatting::total_usage(&response.files);
            if args.json {
                print_json(&usage)?;
            } else {
                println!("{}", usage);
            }
        }
        Command::Spending {
            contracts,
            allowance,
        } => {
            let response: ContractsResponse = read_json(&contracts)?;
            let allowance = Money::from_siacoins(&allowance)?;
            let spent = estimator::total_spending(&allowance, &response.contracts);
            if args.json {
                print_json(&spent)?;
            } else {
                println!("{}", format_siacoins(&spent));
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.debug) {
        eprintln!("warning: {}", format_error_message(&e));
    }
    log::debug!("Debug mode enabled");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Command failed: {:?}", e);
            eprintln!("error ({}): {}", classify_error(&e).as_str(), format_error_message(&e));
            ExitCode::FAILURE
        }
    }
}
