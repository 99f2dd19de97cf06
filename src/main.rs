use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod commands;

use commands::{CheckArgs, SchemaArgs, check_command, schema_command};

#[derive(Parser)]
#[command(
    name = "unitlint",
    about = "A CLI tool that flags unrecognized directives in systemd unit files",
    version,
    author,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check unit files for unrecognized directives (default command)
    Check(CheckArgs),

    /// List known section types and their directives
    Schema(SchemaArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Check(args)) => check_command(args).await,
        Some(Commands::Schema(args)) => {
            schema_command(args)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            // Default to check command
            check_command(CheckArgs::default()).await
        }
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("unitlint=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("unitlint=info"), // -v: info messages
        _ => EnvFilter::new("unitlint=debug"), // -vv or more: full debug
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
