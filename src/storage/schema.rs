//! Declared table layouts for the store.
//!
//! Column types are fixed here rather than inferred from loaded values:
//!
//! | ColumnType | SQLite type |
//! |------------|-------------|
//! | `Text`     | `TEXT`      |
//! | `Real`     | `REAL`      |

use crate::bio::mutation::{GeneLookupEntry, MutationRecord, Vaf};
use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Real,
}

impl ColumnType {
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Real => "REAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub column_type: ColumnType,
}

const fn text(name: &'static str) -> Column {
    Column {
        name,
        column_type: ColumnType::Text,
    }
}

const fn real(name: &'static str) -> Column {
    Column {
        name,
        column_type: ColumnType::Real,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

pub const SOMATIC_MUTATIONS: TableSchema = TableSchema {
    name: "SomaticMutations",
    columns: &[
        text("model_id"),
        text("gene_symbol"),
        text("ensembl_gene_id"),
        text("model_name"),
        text("cdna_mutation"),
        text("protein_mutation"),
        text("type"),
        text("effect"),
        real("vaf"),
        text("data_type"),
    ],
};

pub const GENES: TableSchema = TableSchema {
    name: "Genes",
    columns: &[text("Gene")],
};

pub(crate) fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", quote_ident(self.name))
    }

    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_ident(c.name), c.column_type.sql_type()))
            .collect();
        format!("CREATE TABLE {} ({})", quote_ident(self.name), columns.join(", "))
    }

    pub fn insert_sql(&self) -> String {
        let names: Vec<String> = self.columns.iter().map(|c| quote_ident(c.name)).collect();
        let placeholders: Vec<String> = (1..=self.columns.len()).map(|i| format!("?{}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(self.name),
            names.join(", "),
            placeholders.join(", ")
        )
    }
}

/// A value that can be written as one row of a declared table.
pub trait TableRow {
    /// Bound values in schema column order.
    fn values(&self) -> Vec<&dyn ToSql>;
}

impl TableRow for MutationRecord {
    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.model_id,
            &self.gene_symbol,
            &self.ensembl_gene_id,
            &self.model_name,
            &self.cdna_mutation,
            &self.protein_mutation,
            &self.mutation_type,
            &self.effect,
            &self.vaf,
            &self.data_type,
        ]
    }
}

impl TableRow for GeneLookupEntry {
    fn values(&self) -> Vec<&dyn ToSql> {
        vec![&self.gene]
    }
}

impl ToSql for Vaf {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Vaf::Missing => ToSqlOutput::Owned(Value::Null),
            Vaf::Fraction(value) => ToSqlOutput::Owned(Value::Real(*value)),
            // REAL affinity keeps non-numeric text as TEXT
            Vaf::Unparsed(raw) => ToSqlOutput::Borrowed(ValueRef::Text(raw.as_bytes())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_somatic_mutations_layout() {
        let names: Vec<_> = SOMATIC_MUTATIONS.columns.iter().map(|c| c.name).collect();
        assert_eq!(names, crate::processing::PROJECTED_COLUMNS.to_vec());
        assert_eq!(SOMATIC_MUTATIONS.column("vaf").unwrap().column_type, ColumnType::Real);
        assert_eq!(SOMATIC_MUTATIONS.column("model_name").unwrap().column_type, ColumnType::Text);
    }

    #[test]
    fn test_generated_sql() {
        assert_eq!(GENES.drop_sql(), "DROP TABLE IF EXISTS \"Genes\"");
        assert_eq!(GENES.create_sql(), "CREATE TABLE \"Genes\" (\"Gene\" TEXT)");
        assert_eq!(GENES.insert_sql(), "INSERT INTO \"Genes\" (\"Gene\") VALUES (?1)");
        assert!(SOMATIC_MUTATIONS.create_sql().contains("\"vaf\" REAL"));
        assert!(SOMATIC_MUTATIONS.insert_sql().ends_with("?10)"));
    }

    #[test]
    fn test_row_arity_matches_schema() {
        let record = MutationRecord::new("TP53", "HeLa", "missense");
        assert_eq!(record.values().len(), SOMATIC_MUTATIONS.columns.len());

        let entry = GeneLookupEntry { gene: None };
        assert_eq!(entry.values().len(), GENES.columns.len());
    }

    #[test]
    fn test_quote_ident_escapes() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
