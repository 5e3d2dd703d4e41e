pub mod mutation;

pub use mutation::{GeneLookupEntry, MutationRecord, Vaf};
