//! Read-side summary of a built store
use crate::storage::optimizer::{UNIQUE_GENES_VIEW, UNIQUE_MODELS_VIEW};
use crate::storage::schema::{quote_ident, GENES, SOMATIC_MUTATIONS};
use crate::Result;
use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub mutation_rows: u64,
    pub gene_rows: u64,
    pub unique_genes: u64,
    pub unique_models: u64,
    pub indexes: Vec<String>,
    pub views: Vec<String>,
}

fn count(conn: &Connection, relation: &str) -> Result<u64> {
    let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(relation));
    let n: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(n as u64)
}

fn object_names(conn: &Connection, kind: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = ?1 AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let names = stmt
        .query_map([kind], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

/// Count rows in both tables and both views and list user indexes/views.
pub fn summarize(conn: &Connection) -> Result<StoreSummary> {
    Ok(StoreSummary {
        mutation_rows: count(conn, SOMATIC_MUTATIONS.name)?,
        gene_rows: count(conn, GENES.name)?,
        unique_genes: count(conn, UNIQUE_GENES_VIEW.name)?,
        unique_models: count(conn, UNIQUE_MODELS_VIEW.name)?,
        indexes: object_names(conn, "index")?,
        views: object_names(conn, "view")?,
    })
}

pub fn open_read_only(path: &Path) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(conn)
}
