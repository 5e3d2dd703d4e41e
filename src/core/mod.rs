pub mod config;
pub mod paths;
pub mod pipeline;

pub use config::Config;
pub use pipeline::{Pipeline, PipelineReport};
