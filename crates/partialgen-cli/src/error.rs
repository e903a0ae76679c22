use partialgen_build::BuildError;
use partialgen_config::ConfigError;
use thiserror::Error as ThisError;

///
/// CliError
///

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{count} type(s) failed to generate")]
    Diagnostics { count: usize },

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error("type '{0}' does not request a partial")]
    NotPartial(String),

    #[error("type '{0}' not found in manifest")]
    TypeNotFound(String),
}
