//! End-to-end build of the mutation store

use crate::core::config::Config;
use crate::processing::filter::{FilterStats, MutationReader};
use crate::processing::lookup::derive_gene_lookup;
use crate::storage::inspect::StoreSummary;
use crate::storage::optimizer::StepOutcome;
use crate::storage::store::StagedStore;
use crate::{CcleError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub source: PathBuf,
    pub store: PathBuf,
    pub filter: FilterStats,
    pub summary: StoreSummary,
    pub steps: Vec<StepOutcome>,
    pub elapsed_ms: u128,
    pub finished_at: DateTime<Utc>,
}

pub struct Pipeline {
    config: Config,
    silent: bool,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            silent: true,
        }
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn run(&self) -> Result<PipelineReport> {
        let start = Instant::now();
        self.config.validate()?;
        let paths = &self.config.paths;

        // Step 1: filter and project. Nothing below runs if the source is bad.
        let filtered = MutationReader::new()
            .with_missing_effect(self.config.filter.missing_effect)
            .with_silent(self.silent)
            .read_path(&paths.source)?;

        // Step 2: gene lookup
        let genes = derive_gene_lookup(&filtered.records);

        // Step 3: load both tables into a fresh store
        let mut store = StagedStore::create(&paths.store)?;
        let (mutation_rows, gene_rows) = store.load(&filtered.records, &genes)?;
        if mutation_rows != gene_rows {
            return Err(CcleError::Schema(format!(
                "loaded {} mutations but {} gene rows",
                mutation_rows, gene_rows
            )));
        }

        // Step 4: optimize
        let steps = store.optimize(&self.config.store)?;
        let summary = store.summarize()?;

        // Step 5: publish
        let published = store.publish()?;

        let elapsed = start.elapsed();
        info!(
            "Built {} with {} mutations ({} unique genes, {} models) in {:.2?}",
            published.display(),
            summary.mutation_rows,
            summary.unique_genes,
            summary.unique_models,
            elapsed
        );

        Ok(PipelineReport {
            source: paths.source.clone(),
            store: published,
            filter: filtered.stats,
            summary,
            steps,
            elapsed_ms: elapsed.as_millis(),
            finished_at: Utc::now(),
        })
    }
}
