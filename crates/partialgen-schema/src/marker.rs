use crate::prelude::*;
use derive_more::Display;
use std::ops::Not;

///
/// ConfigurationMarker
///
/// Closed set of configuration annotations read by the resolver.
/// Markers carry data only; every decision they drive lives in the engine.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "marker", rename_all = "snake_case")]
pub enum ConfigurationMarker {
    Partial(PartialOptions),
    IncludeInitializer,
    ExcludePartial,
    ForceNull,

    /// Swap `original` for `partial` wherever it occurs in the member type.
    /// Both the generic and the two-argument spelling land here.
    ReplaceType {
        original: TypeRef,
        partial: TypeRef,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// Use `replacement` as the member type outright.
    SubstituteType {
        replacement: TypeRef,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl ConfigurationMarker {
    #[must_use]
    pub const fn kind(&self) -> MarkerKind {
        match self {
            Self::Partial(_) => MarkerKind::Partial,
            Self::IncludeInitializer => MarkerKind::IncludeInitializer,
            Self::ExcludePartial => MarkerKind::ExcludePartial,
            Self::ForceNull => MarkerKind::ForceNull,
            Self::ReplaceType { .. } => MarkerKind::ReplaceType,
            Self::SubstituteType { .. } => MarkerKind::SubstituteType,
        }
    }

    #[must_use]
    pub const fn is_type_substitution(&self) -> bool {
        matches!(self, Self::ReplaceType { .. } | Self::SubstituteType { .. })
    }
}

///
/// PartialOptions
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct PartialOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Not::not")]
    pub include_required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_name: Option<String>,

    #[serde(skip_serializing_if = "Not::not")]
    pub include_extra_attributes: bool,

    #[serde(skip_serializing_if = "Not::not")]
    pub remove_abstract: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub derive_from: Option<TypeRef>,
}

///
/// MarkerKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum MarkerKind {
    ExcludePartial,
    ForceNull,
    IncludeInitializer,
    Partial,
    ReplaceType,
    SubstituteType,
}

impl MarkerKind {
    /// Where this marker may legally be attached.
    #[must_use]
    pub const fn placement(self) -> MarkerPlacement {
        match self {
            Self::Partial => MarkerPlacement::Type,
            _ => MarkerPlacement::Member,
        }
    }
}

///
/// MarkerPlacement
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum MarkerPlacement {
    #[display("type")]
    Type,

    #[display("member")]
    Member,
}
