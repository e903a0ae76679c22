use crate::error::BuildError;
use partialgen_config::OutputConfig;
use partialgen_core::diagnostic::Diagnostic;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

///
/// WriteOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

///
/// Sink
///
/// Destination for generated text and diagnostics.
///

pub trait Sink {
    fn write(&mut self, hint_name: &str, text: &str) -> Result<WriteOutcome, BuildError>;

    fn report(&mut self, diagnostic: &Diagnostic);
}

///
/// MemorySink
///

#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<String, String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, hint_name: &str) -> Option<&str> {
        self.files.get(hint_name).map(String::as_str)
    }
}

impl Sink for MemorySink {
    fn write(&mut self, hint_name: &str, text: &str) -> Result<WriteOutcome, BuildError> {
        let previous = self.files.insert(hint_name.to_string(), text.to_string());

        Ok(match previous {
            Some(previous) if previous == text => WriteOutcome::Unchanged,
            _ => WriteOutcome::Written,
        })
    }

    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

///
/// DirSink
///
/// Writes `{hint_name}{extension}` under a directory. Files whose content
/// is already identical are left alone so regeneration does not touch
/// timestamps.
///

#[derive(Clone, Debug)]
pub struct DirSink {
    dir: PathBuf,
    extension: String,
    diagnostics: Vec<Diagnostic>,
}

impl DirSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.dir, &config.extension)
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Diagnostics reported so far, in report order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn file_path(&self, hint_name: &str) -> Result<PathBuf, BuildError> {
        let valid = !hint_name.is_empty()
            && !hint_name.starts_with('.')
            && !hint_name.contains(['/', '\\']);
        if !valid {
            return Err(BuildError::InvalidHintName(hint_name.to_string()));
        }

        Ok(self.dir.join(format!("{hint_name}{}", self.extension)))
    }
}

impl Sink for DirSink {
    fn write(&mut self, hint_name: &str, text: &str) -> Result<WriteOutcome, BuildError> {
        let path = self.file_path(hint_name)?;

        match fs::read_to_string(&path) {
            Ok(existing) if existing == text => return Ok(WriteOutcome::Unchanged),
            Ok(_) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(BuildError::io(path, err)),
        }

        fs::create_dir_all(&self.dir).map_err(|e| BuildError::io(&self.dir, e))?;
        fs::write(&path, text).map_err(|e| BuildError::io(&path, e))?;

        Ok(WriteOutcome::Written)
    }

    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

///
/// TESTS
///
