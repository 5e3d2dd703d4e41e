use crate::cli::output::*;
use crate::core::config::{load_config, Config};
use crate::core::paths::describe_paths;
use crate::core::pipeline::{Pipeline, PipelineReport};
use crate::processing::filter::MissingEffectPolicy;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct BuildArgs {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mutation extract (CSV with header row)
    #[arg(short, long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// SQLite store to (re)build
    #[arg(short = 'o', long, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// How to treat rows with an empty effect: retain or drop
    #[arg(long, value_name = "POLICY")]
    pub missing_effect: Option<MissingEffectPolicy>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl BuildArgs {
    /// Resolve the effective configuration: file (or defaults), then flags.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(source) = &self.source {
            config.paths.source = source.clone();
        }
        if let Some(store) = &self.store {
            config.paths.store = store.clone();
        }
        if let Some(policy) = self.missing_effect {
            config.filter.missing_effect = policy;
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let config = args.resolve_config()?;
    let silent = args.quiet || args.json;

    if !silent {
        section_header_with_line("Building mutation store");
        for line in describe_paths(&config.paths.source, &config.paths.store).lines() {
            info(line.trim());
        }
        if config.filter.missing_effect == MissingEffectPolicy::Drop {
            warning("Rows without an effect will be dropped");
        }
    }

    let report = Pipeline::new(config).with_silent(silent).run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !args.quiet {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &PipelineReport) {
    success(&format!("Store written to {}", report.store.display()));

    let filter = &report.filter;
    print_stats_table(
        "Filter",
        vec![
            ("Source rows", format_number(filter.source_rows as u64)),
            ("Retained", format_number(filter.retained as u64)),
            ("Dropped (intronic)", format_number(filter.dropped_intronic as u64)),
            ("Dropped (no effect)", format_number(filter.dropped_missing_effect as u64)),
        ],
    );

    let summary = &report.summary;
    print_stats_table(
        "Store",
        vec![
            ("SomaticMutations rows", format_number(summary.mutation_rows)),
            ("Genes rows", format_number(summary.gene_rows)),
            ("Unique genes", format_number(summary.unique_genes)),
            ("Unique cell lines", format_number(summary.unique_models)),
        ],
    );

    section_header_with_line("Optimization");
    let last = report.steps.len().saturating_sub(1);
    for (i, step) in report.steps.iter().enumerate() {
        tree_item(i == last, &step.step, Some(&format!("{:.2?}", step.duration)));
    }
    println!();
    info(&format!("Finished in {} ms", report.elapsed_ms));
}
