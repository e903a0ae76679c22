//! `partialgen.toml` loading. Every key has a default, so an empty file (or
//! no file at all) is a valid configuration.

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "partialgen.toml";

pub const DEFAULT_OUTPUT_DIR: &str = "generated";
pub const DEFAULT_EXTENSION: &str = ".g.cs";
pub const DEFAULT_INDENT: usize = 4;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputConfig,
    pub render: RenderConfig,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.render.indent == 0 {
            return Err(ConfigError::Invalid(
                "render.indent must be at least 1".to_string(),
            ));
        }
        if self.output.extension.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "output.extension '{}' must not contain a path separator",
                self.output.extension
            )));
        }

        Ok(())
    }
}

///
/// OutputConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

///
/// RenderConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub indent: usize,

    /// Emit the auto-generated banner.
    pub header: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            header: true,
        }
    }
}

///
/// TESTS
///
