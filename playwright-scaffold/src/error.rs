use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Missing values for placeholders: {}", .0.join(", "))]
    MissingValues(Vec<String>),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse template values: {0}")]
    Toml(#[from] toml::de::Error),
}
