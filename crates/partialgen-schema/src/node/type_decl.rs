use crate::prelude::*;
use std::ops::Not;

///
/// TypeDescriptor
///
/// A discovered source type. Immutable once built by the scanner.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TypeDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub usings: Vec<String>,

    #[serde(default)]
    pub kind: TypeKind,

    #[serde(default)]
    pub accessibility: Accessibility,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_abstract: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_params: Vec<GenericParam>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_types: Vec<TypeRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<ConfigurationMarker>,

    #[serde(default)]
    pub members: Vec<MemberDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl TypeDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            usings: Vec::new(),
            kind,
            accessibility: Accessibility::Public,
            is_abstract: false,
            generic_params: Vec::new(),
            base_types: Vec::new(),
            summary: None,
            markers: Vec::new(),
            members: Vec::new(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_partial(mut self, options: PartialOptions) -> Self {
        self.markers.push(ConfigurationMarker::Partial(options));
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Fully qualified name, used to key diagnostics and generated artifacts.
    #[must_use]
    pub fn path(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Iterate over the `Partial` markers attached to the type.
    pub fn partial_markers(&self) -> impl Iterator<Item = &PartialOptions> {
        self.markers.iter().filter_map(|m| match m {
            ConfigurationMarker::Partial(opts) => Some(opts),
            _ => None,
        })
    }

    #[must_use]
    pub fn get_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }
}

///
/// GenericParam
///
/// A type parameter with its constraint clauses kept verbatim.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct GenericParam {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Token>,
}

impl GenericParam {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(Token::new(constraint));
        self
    }
}
