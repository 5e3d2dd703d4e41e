//! Replace-style table loading
use crate::storage::schema::{TableRow, TableSchema};
use crate::{CcleError, Result};
use rusqlite::{params_from_iter, Connection};
use std::time::Instant;
use tracing::{debug, info};

/// Writes declared tables through a borrowed connection.
///
/// The loader never opens a transaction itself; callers decide the
/// atomicity boundary (see [`replace_table`] for the single-table case).
pub struct TableLoader<'c> {
    conn: &'c Connection,
}

impl<'c> TableLoader<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Drop any existing table of the same name, recreate it and insert `rows`.
    pub fn replace<R: TableRow>(&self, schema: &TableSchema, rows: &[R]) -> Result<usize> {
        let start = Instant::now();

        self.conn.execute(&schema.drop_sql(), [])?;
        self.conn.execute(&schema.create_sql(), [])?;
        debug!("Recreated table {}", schema.name);

        let mut stmt = self.conn.prepare(&schema.insert_sql())?;
        let mut written = 0usize;
        for row in rows {
            let values = row.values();
            if values.len() != schema.columns.len() {
                return Err(CcleError::Schema(format!(
                    "row {} for table {} has {} values, expected {}",
                    written,
                    schema.name,
                    values.len(),
                    schema.columns.len()
                )));
            }
            written += stmt.execute(params_from_iter(values))?;
        }

        info!(
            "Loaded {} rows into {} in {:.2?}",
            written,
            schema.name,
            start.elapsed()
        );
        Ok(written)
    }
}

/// Replace a single table inside its own transaction.
///
/// Either the table is fully replaced or the previous contents survive.
pub fn replace_table<R: TableRow>(
    conn: &mut Connection,
    schema: &TableSchema,
    rows: &[R],
) -> Result<usize> {
    let tx = conn.transaction()?;
    let written = TableLoader::new(&tx).replace(schema, rows)?;
    tx.commit()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::mutation::{GeneLookupEntry, MutationRecord, Vaf};
    use crate::storage::schema::{GENES, SOMATIC_MUTATIONS};
    use pretty_assertions::assert_eq;
    use rusqlite::types::ToSql;

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM \"{}\"", table), [], |r| r.get(0))
            .unwrap()
    }

    fn genes(names: &[&str]) -> Vec<GeneLookupEntry> {
        names
            .iter()
            .map(|n| GeneLookupEntry {
                gene: Some(n.to_string()),
            })
            .collect()
    }

    #[test]
    fn test_replace_creates_and_fills() {
        let mut conn = Connection::open_in_memory().unwrap();
        let written = replace_table(&mut conn, &GENES, &genes(&["TP53", "TP53", "KRAS"])).unwrap();

        assert_eq!(written, 3);
        assert_eq!(count(&conn, "Genes"), 3);
    }

    #[test]
    fn test_replace_drops_previous_table() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE Genes (Gene TEXT, stale INTEGER); INSERT INTO Genes VALUES ('OLD', 1);")
            .unwrap();

        replace_table(&mut conn, &GENES, &genes(&["BRAF"])).unwrap();

        let values: Vec<String> = conn
            .prepare("SELECT Gene FROM Genes")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(values, vec!["BRAF".to_string()]);

        let column_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM pragma_table_info('Genes')", [], |r| r.get(0))
            .unwrap();
        assert_eq!(column_count, 1);
    }

    #[test]
    fn test_declared_column_types() {
        let mut conn = Connection::open_in_memory().unwrap();
        let records = vec![
            MutationRecord::new("TP53", "HeLa", "missense").with_vaf(0.5),
            MutationRecord {
                vaf: Vaf::Unparsed("high".to_string()),
                ..MutationRecord::new("KRAS", "A549", "missense")
            },
            MutationRecord::new("BRAF", "A375", "missense"),
        ];
        replace_table(&mut conn, &SOMATIC_MUTATIONS, &records).unwrap();

        let declared: String = conn
            .query_row(
                "SELECT type FROM pragma_table_info('SomaticMutations') WHERE name = 'vaf'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(declared, "REAL");

        let stored: Vec<String> = conn
            .prepare("SELECT typeof(vaf) FROM SomaticMutations ORDER BY rowid")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(stored, vec!["real", "text", "null"]);
    }

    struct Ragged;

    impl TableRow for Ragged {
        fn values(&self) -> Vec<&dyn ToSql> {
            vec![&1i64, &2i64]
        }
    }

    #[test]
    fn test_arity_mismatch_rolls_back() {
        let mut conn = Connection::open_in_memory().unwrap();
        replace_table(&mut conn, &GENES, &genes(&["KEEP"])).unwrap();

        let err = replace_table(&mut conn, &GENES, &[Ragged]).unwrap_err();
        assert!(matches!(err, CcleError::Schema(_)));

        // previous table survives the failed replace
        let kept: String = conn.query_row("SELECT Gene FROM Genes", [], |r| r.get(0)).unwrap();
        assert_eq!(kept, "KEEP");
    }
}
