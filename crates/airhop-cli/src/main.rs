use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;
mod output;

use commands::{airport::handle_airport, route::handle_route, NetworkArgs};
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Airport lookups and air/ground route planning")]
struct Cli {
    /// Directory containing airports.dat and routes.dat.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Radius in kilometres for ground connections between nearby airports.
    #[arg(long, global = true)]
    proximity_km: Option<f64>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show an airport by its three- or four-letter code.
    Airport {
        /// Airport code (case-insensitive).
        code: String,
    },
    /// Compute the shortest route between two airport codes.
    Route {
        /// Departure airport code.
        from: String,
        /// Arrival airport code.
        to: String,
        /// Hop budget; the departure airport counts as one hop.
        #[arg(long, default_value_t = airhop_lib::DEFAULT_MAX_HOPS)]
        max_hops: usize,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let network = NetworkArgs {
        data_dir: cli.data_dir,
        proximity_km: cli.proximity_km,
    };

    match cli.command {
        Command::Airport { code } => handle_airport(&network, &code, cli.format),
        Command::Route { from, to, max_hops } => {
            handle_route(&network, &from, &to, max_hops, cli.format)
        }
    }
}

/// Log to stderr so stdout carries only command output.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
