//! Staged store: the single connection a pipeline run owns
use crate::bio::mutation::{GeneLookupEntry, MutationRecord};
use crate::storage::inspect::{summarize, StoreSummary};
use crate::storage::loader::TableLoader;
use crate::storage::optimizer::{StepOutcome, StoreOptimizer, StoreSettings};
use crate::storage::schema::{GENES, SOMATIC_MUTATIONS};
use crate::{CcleError, Result};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// A freshly created store file next to the publish target.
///
/// The store is only visible at `target` after [`StagedStore::publish`];
/// dropping it on any other path closes the connection and deletes the
/// staged file, leaving an existing store at `target` untouched.
pub struct StagedStore {
    // Declared before `file` so the connection closes first on drop.
    conn: Connection,
    file: NamedTempFile,
    target: PathBuf,
}

impl StagedStore {
    pub fn create(target: &Path) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut builder = tempfile::Builder::new();
        builder.prefix(".ccle-staging-").suffix(".db");
        // SQLite's own default file mode; the umask still applies.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o644));
        }
        let file = builder.tempfile_in(&dir)?;
        let conn = Connection::open(file.path())?;
        debug!("Staging store at {}", file.path().display());

        Ok(Self {
            conn,
            file,
            target: target.to_path_buf(),
        })
    }

    pub fn staging_path(&self) -> &Path {
        self.file.path()
    }

    /// Replace both tables in one transaction.
    pub fn load(
        &mut self,
        records: &[MutationRecord],
        genes: &[GeneLookupEntry],
    ) -> Result<(usize, usize)> {
        let tx = self.conn.transaction()?;
        let (mutation_rows, gene_rows) = {
            let loader = TableLoader::new(&tx);
            let mutation_rows = loader.replace(&SOMATIC_MUTATIONS, records)?;
            let gene_rows = loader.replace(&GENES, genes)?;
            (mutation_rows, gene_rows)
        };
        tx.commit()?;
        Ok((mutation_rows, gene_rows))
    }

    pub fn optimize(&self, settings: &StoreSettings) -> Result<Vec<StepOutcome>> {
        StoreOptimizer::new(&self.conn)
            .with_settings(settings.clone())
            .run()
    }

    pub fn summarize(&self) -> Result<StoreSummary> {
        summarize(&self.conn)
    }

    /// Close the connection and atomically move the staged file over the target.
    pub fn publish(self) -> Result<PathBuf> {
        let StagedStore { conn, file, target } = self;
        conn.close().map_err(|(_, e)| CcleError::Database(e))?;

        // A replaced store keeps its mode.
        if let Ok(existing) = fs::metadata(&target) {
            fs::set_permissions(file.path(), existing.permissions())?;
        }
        file.persist(&target).map_err(|e| CcleError::Io(e.error))?;
        info!("Published store to {}", target.display());
        Ok(target)
    }
}
