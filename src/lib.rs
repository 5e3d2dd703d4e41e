pub mod bio;
pub mod cli;
pub mod core;
pub mod processing;
pub mod storage;

pub use crate::core::{config::Config, pipeline::Pipeline};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CcleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source error: {0}")]
    Source(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Optimization step '{step}' failed: {source}")]
    Optimize {
        step: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CcleError>;
