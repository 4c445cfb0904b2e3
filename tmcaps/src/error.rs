use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TmCapsError {
    #[error("Grammar directory not found: {}", .0.display())]
    GrammarDirNotFound(PathBuf),

    #[error("No .json grammar files found in {}", .0.display())]
    NoGrammarFiles(PathBuf),

    #[error("Glob error: {0}")]
    Glob(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, TmCapsError>;
