//! Post-load tuning of the store: pragmas, statistics, compaction,
//! indexes and convenience views.
use crate::storage::schema::{quote_ident, GENES, SOMATIC_MUTATIONS};
use crate::{CcleError, Result};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Single-column index created after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    pub name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
}

/// Distinct, sorted projection of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewDef {
    pub name: &'static str,
    pub table: &'static str,
    pub column: &'static str,
}

pub const GENE_INDEX: IndexDef = IndexDef {
    name: "ix_gt_gene",
    table: GENES.name,
    column: "Gene",
};

pub const MODEL_INDEX: IndexDef = IndexDef {
    name: "ix_mod_profile",
    table: SOMATIC_MUTATIONS.name,
    column: "model_name",
};

pub const UNIQUE_GENES_VIEW: ViewDef = ViewDef {
    name: "view_unique_genes",
    table: GENES.name,
    column: "Gene",
};

pub const UNIQUE_MODELS_VIEW: ViewDef = ViewDef {
    name: "view_unique_cellLines",
    table: SOMATIC_MUTATIONS.name,
    column: "model_name",
};

impl IndexDef {
    // No IF NOT EXISTS: a leftover index from an earlier run is an error.
    pub fn create_sql(&self) -> String {
        format!(
            "CREATE INDEX {} ON {}({})",
            quote_ident(self.name),
            quote_ident(self.table),
            quote_ident(self.column)
        )
    }
}

impl ViewDef {
    pub fn create_sql(&self) -> String {
        let column = quote_ident(self.column);
        format!(
            "CREATE VIEW {} AS SELECT DISTINCT {} FROM {} ORDER BY {}",
            quote_ident(self.name),
            column,
            quote_ident(self.table),
            column
        )
    }
}

/// Pragma values applied before the rest of the optimization sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub synchronous: String,
    pub journal_mode: String,
    pub temp_store: String,
}

const SYNCHRONOUS_MODES: &[&str] = &["OFF", "NORMAL", "FULL", "EXTRA"];
const JOURNAL_MODES: &[&str] = &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];
const TEMP_STORES: &[&str] = &["DEFAULT", "FILE", "MEMORY"];

impl Default for StoreSettings {
    fn default() -> Self {
        // The store is rebuilt from the extract on every run, so durability is traded for speed.
        Self {
            synchronous: "OFF".to_string(),
            journal_mode: "MEMORY".to_string(),
            temp_store: "MEMORY".to_string(),
        }
    }
}

impl StoreSettings {
    pub fn validate(&self) -> Result<()> {
        check_keyword("synchronous", &self.synchronous, SYNCHRONOUS_MODES)?;
        check_keyword("journal_mode", &self.journal_mode, JOURNAL_MODES)?;
        check_keyword("temp_store", &self.temp_store, TEMP_STORES)?;
        Ok(())
    }
}

fn check_keyword(pragma: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
        Ok(())
    } else {
        Err(CcleError::Config(format!(
            "invalid {} '{}', expected one of {}",
            pragma,
            value,
            allowed.join(", ")
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizationStep {
    TunePragmas,
    Analyze,
    Vacuum,
    CreateIndex(IndexDef),
    CreateView(ViewDef),
}

impl fmt::Display for OptimizationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationStep::TunePragmas => write!(f, "tune pragmas"),
            OptimizationStep::Analyze => write!(f, "analyze"),
            OptimizationStep::Vacuum => write!(f, "vacuum"),
            OptimizationStep::CreateIndex(index) => write!(f, "create index {}", index.name),
            OptimizationStep::CreateView(view) => write!(f, "create view {}", view.name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: String,
    pub duration: Duration,
}

/// Runs the fixed optimization sequence against an open store.
pub struct StoreOptimizer<'c> {
    conn: &'c Connection,
    settings: StoreSettings,
}

impl<'c> StoreOptimizer<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            settings: StoreSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: StoreSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The steps in execution order.
    pub fn steps() -> Vec<OptimizationStep> {
        vec![
            OptimizationStep::TunePragmas,
            OptimizationStep::Analyze,
            OptimizationStep::Vacuum,
            OptimizationStep::CreateIndex(GENE_INDEX),
            OptimizationStep::CreateIndex(MODEL_INDEX),
            OptimizationStep::CreateView(UNIQUE_GENES_VIEW),
            OptimizationStep::CreateView(UNIQUE_MODELS_VIEW),
        ]
    }

    /// Apply every step in order, stopping at the first failure.
    pub fn run(&self) -> Result<Vec<StepOutcome>> {
        self.settings.validate()?;

        let mut outcomes = Vec::new();
        for step in Self::steps() {
            let start = Instant::now();
            self.apply(&step).map_err(|source| CcleError::Optimize {
                step: step.to_string(),
                source,
            })?;
            let duration = start.elapsed();
            debug!("Optimization step '{}' finished in {:.2?}", step, duration);
            outcomes.push(StepOutcome {
                step: step.to_string(),
                duration,
            });
        }

        info!("Store optimization complete ({} steps)", outcomes.len());
        Ok(outcomes)
    }

    fn apply(&self, step: &OptimizationStep) -> rusqlite::Result<()> {
        match step {
            OptimizationStep::TunePragmas => {
                self.conn
                    .pragma_update(None, "synchronous", self.settings.synchronous.as_str())?;
                let mode: String = self.conn.pragma_update_and_check(
                    None,
                    "journal_mode",
                    self.settings.journal_mode.as_str(),
                    |row| row.get(0),
                )?;
                debug!("journal_mode is now {}", mode);
                self.conn
                    .pragma_update(None, "temp_store", self.settings.temp_store.as_str())
            }
            OptimizationStep::Analyze => self.conn.execute_batch("ANALYZE"),
            OptimizationStep::Vacuum => self.conn.execute_batch("VACUUM"),
            OptimizationStep::CreateIndex(index) => self.conn.execute_batch(&index.create_sql()),
            OptimizationStep::CreateView(view) => self.conn.execute_batch(&view.create_sql()),
        }
    }
}
