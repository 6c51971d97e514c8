//! Carrel console binary.
//!
//! # Usage
//!
//! ```bash
//! # Use ./library_data.dat
//! carrel
//!
//! # Another snapshot file, with every floor locked at full size
//! carrel --data /var/lib/carrel/seats.dat --fixed-layout
//! ```

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use carrel_cli::{ReplConfig, run};
use carrel_core::{FileStorage, LibraryConfig, Runtime, SystemEnv};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Library seat reservation console
#[derive(Parser, Debug)]
#[command(name = "carrel")]
#[command(about = "Reserve library seats by floor, row, column and day")]
#[command(version)]
struct Args {
    /// Snapshot file to load at startup and save after every change
    #[arg(short, long, default_value = "library_data.dat")]
    data: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Keep every floor at full size and refuse resize requests
    #[arg(long)]
    fixed_layout: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    tracing::info!(data = %args.data.display(), "carrel starting");

    let config = LibraryConfig { resizable_floors: !args.fixed_layout };
    let mut runtime = Runtime::open(FileStorage::new(&args.data), SystemEnv::new(), config);

    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut stdout = io::stdout().lock();

    run(&mut runtime, stdin.lock(), &mut stdout, ReplConfig { prompt })?;

    Ok(())
}
