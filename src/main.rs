use ccle_db::cli::{Cli, Commands};
use ccle_db::CcleError;
use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // CCLE_DB_LOG wins over RUST_LOG; -v raises the fallback level
    let fallback = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = std::env::var("CCLE_DB_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CcleError>() {
        Some(CcleError::Config(_)) => 2,
        Some(CcleError::Io(_)) => 3,
        Some(CcleError::Source(_)) | Some(CcleError::Csv(_)) => 4,
        Some(CcleError::Database(_))
        | Some(CcleError::Optimize { .. })
        | Some(CcleError::Schema(_)) => 5,
        None => 1,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Build(args) => ccle_db::cli::commands::build::run(args),
        Commands::Info(args) => ccle_db::cli::commands::info::run(args),
        Commands::Config(args) => ccle_db::cli::commands::config::run(args),
    }
}
