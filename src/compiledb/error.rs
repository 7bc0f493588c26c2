use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileDbError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize compilation database: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to stage compilation database in {dir}: {source}")]
    Stage { dir: PathBuf, source: std::io::Error },

    #[error("failed to replace {path}: {source}")]
    Replace {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not determine working directory: {0}")]
    WorkingDirectory(std::io::Error),
}
