//! Error types for configuration injection.

use std::path::PathBuf;

/// Result type for confsplice operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, locating or injecting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// None of the recognized export shapes matched.
    #[error("Could not find a configuration object in {}", path.display())]
    ConfigurationNotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source text contains syntax errors.
    #[error("Failed to parse {} at line {line}, column {column}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("Failed to load grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported engine configuration format: {}", path.display())]
    UnsupportedConfigFormat { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach a file path to errors produced while working on in-memory text.
    pub fn with_path(self, path: &std::path::Path) -> Self {
        match self {
            Self::ConfigurationNotFound { .. } => Self::ConfigurationNotFound {
                path: path.to_path_buf(),
            },
            Self::Parse { line, column, .. } => Self::Parse {
                path: path.to_path_buf(),
                line,
                column,
            },
            other => other,
        }
    }
}
