use crate::error::BuildError;
use partialgen_schema::node::TypeDescriptor;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

///
/// Scanner
///
/// Source of discovered types. Order is significant: the run reports and
/// writes in the order types are returned here.
///

pub trait Scanner {
    fn discover(&self) -> Result<Vec<TypeDescriptor>, BuildError>;
}

impl Scanner for Vec<TypeDescriptor> {
    fn discover(&self) -> Result<Vec<TypeDescriptor>, BuildError> {
        Ok(self.clone())
    }
}

///
/// Manifest
///

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    types: Vec<TypeDescriptor>,
}

///
/// ManifestScanner
///
/// Reads pre-parsed type descriptors from a JSON manifest of the form
/// `{"types": [...]}`.
///

#[derive(Clone, Debug)]
pub struct ManifestScanner {
    path: PathBuf,
}

impl ManifestScanner {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Scanner for ManifestScanner {
    fn discover(&self) -> Result<Vec<TypeDescriptor>, BuildError> {
        let text = fs::read_to_string(&self.path).map_err(|e| BuildError::io(&self.path, e))?;
        let manifest: Manifest =
            serde_json::from_str(&text).map_err(|source| BuildError::Manifest {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            types = manifest.types.len(),
            "manifest loaded"
        );

        Ok(manifest.types)
    }
}

///
/// TESTS
///
