use partialgen_schema::prelude::*;
use std::ops::Not;

///
/// OutputTypeDescriptor
///
/// The synthesized partial type. Marker-free and fully decided; the
/// renderer only formats it.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OutputTypeDescriptor {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub usings: Vec<String>,

    pub kind: TypeKind,
    pub accessibility: Accessibility,

    #[serde(skip_serializing_if = "Not::not")]
    pub is_abstract: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub generic_params: Vec<GenericParam>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<TypeRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    pub members: Vec<OutputMember>,
}

impl OutputTypeDescriptor {
    /// Fully qualified name; also the deterministic artifact name.
    #[must_use]
    pub fn path(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.clone(),
        }
    }

    #[must_use]
    pub fn get_member(&self, name: &str) -> Option<&OutputMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

///
/// OutputMember
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OutputMember {
    pub name: String,
    pub ty: TypeRef,
    pub accessibility: Accessibility,

    #[serde(skip_serializing_if = "Not::not")]
    pub required: bool,

    pub accessors: Accessors,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Token>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Token>,
}
