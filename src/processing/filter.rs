//! Filter and projection of the raw mutation extract
use crate::bio::mutation::{MutationRecord, Vaf};
use crate::{CcleError, Result};
use csv::StringRecord;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Effect classification that is excluded from the store.
pub const EXCLUDED_EFFECT: &str = "intronic";

/// Source columns kept by the projection, in output order.
pub const PROJECTED_COLUMNS: [&str; 10] = [
    "model_id",
    "gene_symbol",
    "ensembl_gene_id",
    "model_name",
    "cdna_mutation",
    "protein_mutation",
    "type",
    "effect",
    "vaf",
    "data_type",
];

const EFFECT: usize = 7;

/// What to do with rows whose `effect` cell is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingEffectPolicy {
    /// An absent effect is not "intronic", so the row is kept.
    #[default]
    Retain,
    /// Treat an absent effect like a null predicate and drop the row.
    Drop,
}

impl std::str::FromStr for MissingEffectPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "retain" | "keep" => Ok(MissingEffectPolicy::Retain),
            "drop" => Ok(MissingEffectPolicy::Drop),
            _ => Err(format!("Unknown missing-effect policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    pub source_rows: usize,
    pub retained: usize,
    pub dropped_intronic: usize,
    pub dropped_missing_effect: usize,
}

impl FilterStats {
    pub fn dropped(&self) -> usize {
        self.dropped_intronic + self.dropped_missing_effect
    }
}

#[derive(Debug, Clone)]
pub struct FilteredMutations {
    pub records: Vec<MutationRecord>,
    pub stats: FilterStats,
}

/// Outcome of filtering a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Retained(MutationRecord),
    Intronic,
    MissingEffect,
}

/// Resolves the projected columns against a header row and applies the
/// effect predicate to each record.
#[derive(Debug, Clone)]
pub struct MutationFilter {
    positions: [usize; 10],
    missing_effect: MissingEffectPolicy,
}

impl MutationFilter {
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = [0usize; 10];
        let mut missing = Vec::new();

        for (slot, column) in PROJECTED_COLUMNS.iter().enumerate() {
            match headers.iter().position(|h| h == *column) {
                Some(pos) => positions[slot] = pos,
                None => missing.push(*column),
            }
        }

        if !missing.is_empty() {
            return Err(CcleError::Source(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            positions,
            missing_effect: MissingEffectPolicy::default(),
        })
    }

    pub fn with_missing_effect(mut self, policy: MissingEffectPolicy) -> Self {
        self.missing_effect = policy;
        self
    }

    pub fn classify(&self, row: &StringRecord) -> Result<RowOutcome> {
        let effect = self.field(row, EFFECT)?;
        if effect == EXCLUDED_EFFECT {
            return Ok(RowOutcome::Intronic);
        }
        if effect.is_empty() && self.missing_effect == MissingEffectPolicy::Drop {
            return Ok(RowOutcome::MissingEffect);
        }

        let text = |slot: usize| -> Result<Option<String>> {
            let value = self.field(row, slot)?;
            Ok((!value.is_empty()).then(|| value.to_string()))
        };

        Ok(RowOutcome::Retained(MutationRecord {
            model_id: text(0)?,
            gene_symbol: text(1)?,
            ensembl_gene_id: text(2)?,
            model_name: text(3)?,
            cdna_mutation: text(4)?,
            protein_mutation: text(5)?,
            mutation_type: text(6)?,
            effect: text(EFFECT)?,
            vaf: Vaf::parse(self.field(row, 8)?),
            data_type: text(9)?,
        }))
    }

    /// Project a row, or `None` if the row is filtered out.
    pub fn project(&self, row: &StringRecord) -> Result<Option<MutationRecord>> {
        match self.classify(row)? {
            RowOutcome::Retained(record) => Ok(Some(record)),
            _ => Ok(None),
        }
    }

    fn field<'r>(&self, row: &'r StringRecord, slot: usize) -> Result<&'r str> {
        let pos = self.positions[slot];
        row.get(pos).ok_or_else(|| {
            CcleError::Source(format!(
                "record {} has no value for column '{}'",
                row.position().map(|p| p.line()).unwrap_or(0),
                PROJECTED_COLUMNS[slot]
            ))
        })
    }
}

/// Reads a comma separated extract with a header row.
pub struct MutationReader {
    missing_effect: MissingEffectPolicy,
    silent: bool,
}

impl MutationReader {
    pub fn new() -> Self {
        Self {
            missing_effect: MissingEffectPolicy::default(),
            silent: true,
        }
    }

    pub fn with_missing_effect(mut self, policy: MissingEffectPolicy) -> Self {
        self.missing_effect = policy;
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn read_path(&self, path: &Path) -> Result<FilteredMutations> {
        let file = File::open(path).map_err(|e| {
            CcleError::Source(format!("cannot open {}: {}", path.display(), e))
        })?;
        info!("Reading mutation extract from {}", path.display());
        self.read(file)
    }

    pub fn read<R: Read>(&self, reader: R) -> Result<FilteredMutations> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let filter = MutationFilter::from_headers(&headers)?.with_missing_effect(self.missing_effect);
        debug!("Resolved {} projected columns from {} header fields", PROJECTED_COLUMNS.len(), headers.len());

        let spinner = if self.silent {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };

        let mut records = Vec::new();
        let mut stats = FilterStats::default();

        for row in csv_reader.records() {
            let row = row?;
            stats.source_rows += 1;

            match filter.classify(&row)? {
                RowOutcome::Retained(record) => {
                    stats.retained += 1;
                    records.push(record);
                }
                RowOutcome::Intronic => stats.dropped_intronic += 1,
                RowOutcome::MissingEffect => stats.dropped_missing_effect += 1,
            }

            if stats.source_rows % 50_000 == 0 {
                spinner.set_message(format!("Filtered {} rows", stats.source_rows));
            }
        }

        spinner.finish_and_clear();
        info!(
            "Filtered {} rows: {} retained, {} intronic, {} without effect",
            stats.source_rows, stats.retained, stats.dropped_intronic, stats.dropped_missing_effect
        );

        Ok(FilteredMutations { records, stats })
    }
}

impl Default for MutationReader {
    fn default() -> Self {
        Self::new()
    }
}
