use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IncsortError {
    #[error("Path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Not a C/C++ source or header: {path}")]
    UnsupportedFile { path: PathBuf },

    #[error("{count} file(s) have unsorted includes")]
    NotSorted { count: usize },

    #[error("{count} file(s) could not be processed")]
    FilesFailed { count: usize },

    #[error("{path}: {source}")]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid exclude pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, IncsortError>;

impl IncsortError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotSorted { .. } => 2,
            Self::PathNotFound { .. } => 3,
            Self::UnsupportedFile { .. } => 4,
            _ => 1,
        }
    }
}
