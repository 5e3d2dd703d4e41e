use serde::{Deserialize, Serialize};

/// Variant allele fraction as read from the extract.
///
/// Values that don't parse as a number are kept verbatim so they reach the
/// store unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Vaf {
    Missing,
    Fraction(f64),
    Unparsed(String),
}

impl Vaf {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Vaf::Missing;
        }
        match raw.trim().parse::<f64>() {
            // SQLite turns NaN into NULL, so non-finite spellings stay text.
            Ok(value) if value.is_finite() => Vaf::Fraction(value),
            _ => Vaf::Unparsed(raw.to_string()),
        }
    }
}

/// One somatic mutation observation after filtering and projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRecord {
    pub model_id: Option<String>,
    pub gene_symbol: Option<String>,
    pub ensembl_gene_id: Option<String>,
    pub model_name: Option<String>,
    pub cdna_mutation: Option<String>,
    pub protein_mutation: Option<String>,
    pub mutation_type: Option<String>,
    pub effect: Option<String>,
    pub vaf: Vaf,
    pub data_type: Option<String>,
}

impl MutationRecord {
    /// Minimal record used by tests and benches; everything besides the
    /// identifying fields is left empty.
    pub fn new(gene_symbol: &str, model_name: &str, effect: &str) -> Self {
        Self {
            model_id: None,
            gene_symbol: Some(gene_symbol.to_string()),
            ensembl_gene_id: None,
            model_name: Some(model_name.to_string()),
            cdna_mutation: None,
            protein_mutation: None,
            mutation_type: None,
            effect: Some(effect.to_string()),
            vaf: Vaf::Missing,
            data_type: None,
        }
    }

    pub fn with_vaf(mut self, vaf: f64) -> Self {
        self.vaf = Vaf::Fraction(vaf);
        self
    }
}

/// Row of the gene lookup table. Duplicates are expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneLookupEntry {
    pub gene: Option<String>,
}
