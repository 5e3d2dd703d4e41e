use std::path::{Path, PathBuf};

/// Extract location used when neither a config file nor a flag names one
pub const DEFAULT_SOURCE: &str = "db/mutations_all_latest.csv";

/// Store location used when neither a config file nor a flag names one
pub const DEFAULT_STORE: &str = "db/ccle.db";

pub fn default_source_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE)
}

pub fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE)
}

/// Get a human-readable description of the paths a run will use
pub fn describe_paths(source: &Path, store: &Path) -> String {
    format!(
        "Paths:\n  \
        Source: {}\n  \
        Store: {}\n  \
        Custom: {}",
        source.display(),
        store.display(),
        if source == Path::new(DEFAULT_SOURCE) && store == Path::new(DEFAULT_STORE) {
            "No (using defaults)"
        } else {
            "Yes"
        }
    )
}
