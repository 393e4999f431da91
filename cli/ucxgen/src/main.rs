//! ucxgen CLI — generates native wrappers and managed bindings from
//! u-connectXpress C headers.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ucxgen", version, about = "u-connectXpress wrapper and binding generator")]
struct Cli {
    /// Manifest path (default: ./ucxgen.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Log warnings and errors only
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the native wrapper and managed binding sources
    Generate {
        /// Directory containing the per-module headers
        #[arg(long)]
        headers: PathBuf,
        /// Output directory for the native sources
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Output directory for the managed source (default: --out-dir)
        #[arg(long)]
        managed_dir: Option<PathBuf>,
        /// Also write the parsed model as JSON
        #[arg(long)]
        model_json: Option<PathBuf>,
    },
    /// Print the parsed model
    Inspect {
        /// Directory containing the per-module headers
        #[arg(long)]
        headers: PathBuf,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let (manifest, manifest_path) = manifest::resolve(cli.config.as_deref(), &cwd)?;
    match &manifest_path {
        Some(path) => debug!(path = %path.display(), "loaded manifest"),
        None => debug!("no manifest, using default conventions"),
    }

    match cli.command {
        Commands::Generate {
            headers,
            out_dir,
            managed_dir,
            model_json,
        } => {
            let args = commands::generate::GenerateArgs {
                headers: &headers,
                out_dir: &out_dir,
                managed_dir: managed_dir.as_deref(),
                model_json: model_json.as_deref(),
            };
            commands::generate::run(&args, &manifest)
        }

        Commands::Inspect { headers, format } => {
            commands::inspect::run(&headers, format.as_deref(), &manifest)
        }
    }
}
