use std::path::PathBuf;
use thiserror::Error as ThisError;

///
/// BuildError
///
/// Adapter failures. Per-type resolution problems are diagnostics, not
/// build errors, and never stop a run.
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("io error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid manifest '{}': {source}", .path.display())]
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid hint name '{0}'")]
    InvalidHintName(String),
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
