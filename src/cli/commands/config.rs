use crate::cli::output::success;
use crate::core::config::{default_config, save_config};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the configuration here instead of printing it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let config = default_config();

    match args.output {
        Some(path) => {
            save_config(&path, &config)?;
            success(&format!("Wrote default configuration to {}", path.display()));
        }
        None => print!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}
