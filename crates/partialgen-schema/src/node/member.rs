use crate::prelude::*;
use std::ops::Not;

///
/// MemberDescriptor
///
/// One source member (a property) as handed over by the scanner.
/// `ty` is optional only so a scanner contract violation can be reported
/// instead of panicking.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemberDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,

    #[serde(default)]
    pub accessibility: Accessibility,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub required: bool,

    #[serde(default)]
    pub accessors: Accessors,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Token>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Token>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<ConfigurationMarker>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl MemberDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            accessibility: Accessibility::Public,
            required: false,
            accessors: Accessors::GetSet,
            initializer: None,
            attributes: Vec::new(),
            markers: Vec::new(),
            location: None,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(Token::new(initializer));
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(Token::new(attribute));
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: ConfigurationMarker) -> Self {
        self.markers.push(marker);
        self
    }

    #[must_use]
    pub fn has_marker(&self, kind: MarkerKind) -> bool {
        self.markers.iter().any(|m| m.kind() == kind)
    }
}
