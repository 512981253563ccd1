use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type used by the loader and the renderer.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the load → render pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line} (`{content}`): {kind}")]
    Parse {
        line: usize,
        content: String,
        kind: ParseErrorKind,
    },

    #[error("plot rendering failed: {0}")]
    Render(String),
}

impl Error {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Why a single data line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected 2 whitespace-separated values, found {found}")]
    TokenCount { found: usize },

    #[error("density '{token}' is not a finite number")]
    Density { token: String },

    #[error("generation '{token}' is not an integer")]
    Generation { token: String },
}
