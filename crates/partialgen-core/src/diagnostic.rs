use crate::error::ResolutionError;
use partialgen_schema::node::{SourceLocation, TypeDescriptor};
use std::fmt;

///
/// Diagnostic
///
/// User-facing report of one failed type. The location is the offending
/// member's when the scanner provided one, otherwise the type's.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
    pub type_path: String,
    pub member: Option<String>,
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    #[must_use]
    pub fn from_error(source: &TypeDescriptor, err: &ResolutionError) -> Self {
        let member = err.member().map(ToString::to_string);
        let location = member
            .as_deref()
            .and_then(|name| source.get_member(name))
            .and_then(|m| m.location.clone())
            .or_else(|| source.location.clone());

        Self {
            code: err.code(),
            message: err.to_string(),
            type_path: source.path(),
            member,
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)?;
        if let Some(location) = &self.location {
            write!(f, "\n  --> {location}")?;
        }

        Ok(())
    }
}
