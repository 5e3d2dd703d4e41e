//! Gene lookup derivation
use crate::bio::mutation::{GeneLookupEntry, MutationRecord};

/// Build one lookup entry per record, in record order.
///
/// Duplicates and missing symbols are carried through unchanged; the
/// `view_unique_genes` view is what collapses them.
pub fn derive_gene_lookup(records: &[MutationRecord]) -> Vec<GeneLookupEntry> {
    records
        .iter()
        .map(|record| GeneLookupEntry {
            gene: record.gene_symbol.clone(),
        })
        .collect()
}
