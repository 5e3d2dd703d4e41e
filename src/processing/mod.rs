// Processing stages that run before anything touches the store

pub mod filter;
pub mod lookup;

pub use filter::{
    FilterStats, FilteredMutations, MissingEffectPolicy, MutationFilter, MutationReader,
    RowOutcome, EXCLUDED_EFFECT, PROJECTED_COLUMNS,
};
pub use lookup::derive_gene_lookup;
