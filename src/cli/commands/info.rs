use crate::cli::output::*;
use crate::core::paths::default_store_path;
use crate::storage::inspect::{open_read_only, summarize};
use crate::CcleError;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// SQLite store to inspect
    #[arg(short = 'o', long, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let path = args.store.unwrap_or_else(default_store_path);
    if !path.exists() {
        return Err(CcleError::Source(format!("no store at {}", path.display())).into());
    }

    let conn = open_read_only(&path)?;
    let summary = summarize(&conn)?;
    let size = std::fs::metadata(&path)?.len();

    if args.json {
        let value = serde_json::json!({
            "store": path.display().to_string(),
            "size_bytes": size,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    section_header_with_line(&format!("Store {}", path.display()));
    info(&format!(
        "Size on disk: {}",
        humansize::format_size(size, humansize::DECIMAL)
    ));

    print_stats_table(
        "Contents",
        vec![
            ("SomaticMutations rows", format_number(summary.mutation_rows)),
            ("Genes rows", format_number(summary.gene_rows)),
            ("Unique genes", format_number(summary.unique_genes)),
            ("Unique cell lines", format_number(summary.unique_models)),
        ],
    );

    section_header_with_line("Indexes");
    print_names(&summary.indexes, "No indexes");
    section_header_with_line("Views");
    print_names(&summary.views, "No views");

    Ok(())
}

fn print_names(names: &[String], none: &str) {
    if names.is_empty() {
        empty(none);
        return;
    }
    let last = names.len() - 1;
    for (i, name) in names.iter().enumerate() {
        tree_item(i == last, name, None);
    }
}
