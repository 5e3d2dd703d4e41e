pub mod inspect;
pub mod loader;
pub mod optimizer;
pub mod schema;
pub mod store;

pub use inspect::{open_read_only, summarize, StoreSummary};
pub use loader::{replace_table, TableLoader};
pub use optimizer::{OptimizationStep, StepOutcome, StoreOptimizer, StoreSettings};
pub use schema::{Column, ColumnType, TableRow, TableSchema, GENES, SOMATIC_MUTATIONS};
pub use store::StagedStore;
