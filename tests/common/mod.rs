//! Shared fixtures for ccle-db integration tests
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use ccle_db::core::config::Config;

pub const HEADER: &str = "model_id,gene_symbol,ensembl_gene_id,model_name,cdna_mutation,\
                          protein_mutation,type,effect,vaf,data_type,source,tumour_type";

/// One extract row with the identifying fields set and plausible filler elsewhere.
pub fn row(gene: &str, model: &str, effect: &str, vaf: &str) -> String {
    format!(
        "SIDM_{model},{gene},ENSG_{gene},{model},c.100A>G,p.K34E,substitution,{effect},{vaf},WES,Sanger,carcinoma",
        model = model,
        gene = gene,
        effect = effect,
        vaf = vaf
    )
}

/// Test environment that owns a scratch directory with an extract and a store path
pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub source: PathBuf,
    pub store: PathBuf,
}

impl TestEnvironment {
    pub fn with_rows(rows: &[String]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = temp_dir.path().join("mutations_all_latest.csv");
        let store = temp_dir.path().join("db").join("ccle.db");

        let mut content = String::from(HEADER);
        content.push('\n');
        for r in rows {
            content.push_str(r);
            content.push('\n');
        }
        fs::write(&source, content).expect("Failed to write extract");

        TestEnvironment {
            _temp_dir: temp_dir,
            source,
            store,
        }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.paths.source = self.source.clone();
        config.paths.store = self.store.clone();
        config
    }
}

/// The sample extract used by most pipeline tests
pub fn sample_rows() -> Vec<String> {
    vec![
        row("TP53", "HeLa", "missense", "0.45"),
        row("TP53", "A549", "nonsense", "0.91"),
        row("KRAS", "A549", "missense", "0.33"),
        row("EGFR", "HeLa", "intronic", "0.12"),
        row("BRAF", "A375", "missense", "0.52"),
        row("TP53", "MCF7", "intronic", "0.20"),
        row("PTEN", "MCF7", "frameshift", "1.0"),
    ]
}
