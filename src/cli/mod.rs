pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ccle-db",
    version,
    about = "Build an optimized SQLite store from a somatic mutation extract",
    long_about = "ccle-db reads a comma separated somatic mutation extract, drops intronic \
                  records, loads the mutations and a gene lookup table into SQLite and \
                  finishes with statistics, compaction, indexes and lookup views."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build (or rebuild) the store from the mutation extract
    Build(commands::build::BuildArgs),

    /// Show what an existing store contains
    Info(commands::info::InfoArgs),

    /// Print or write the default configuration
    Config(commands::config::ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_flags() {
        let cli = Cli::try_parse_from([
            "ccle-db",
            "-vv",
            "build",
            "--source",
            "extract.csv",
            "--missing-effect",
            "drop",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.source.unwrap().to_str(), Some("extract.csv"));
                assert_eq!(
                    args.missing_effect,
                    Some(crate::processing::MissingEffectPolicy::Drop)
                );
                assert!(args.json);
                assert!(args.store.is_none());
            }
            _ => panic!("expected build command"),
        }
    }
}
