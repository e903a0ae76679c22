use partialgen_schema::marker::MarkerKind;
use thiserror::Error as ThisError;

///
/// ResolutionError
///
/// Per-type failures raised while turning markers into a transform plan.
/// Each one names the type (and member, when there is one) it belongs to so
/// it can be surfaced as a single diagnostic. `DuplicateOutputName` is only
/// raised by the batch driver, which sees every type at once.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ResolutionError {
    #[error(
        "member '{type_name}.{member}' carries conflicting type markers: {}",
        join_kinds(.markers)
    )]
    ConflictingTypeMarkers {
        type_name: String,
        member: String,
        markers: Vec<MarkerKind>,
    },

    #[error("missing {what} on '{}'", at(.type_name, .member.as_deref()))]
    MissingRequiredTypeInfo {
        type_name: String,
        member: Option<String>,
        what: &'static str,
    },

    #[error(
        "marker '{marker}' belongs on a {}, found on '{}'",
        .marker.placement(),
        at(.type_name, .member.as_deref())
    )]
    MisplacedMarker {
        type_name: String,
        member: Option<String>,
        marker: MarkerKind,
    },

    #[error("type '{type_name}' carries {count} Partial markers, at most one is allowed")]
    DuplicatePartialMarker { type_name: String, count: usize },

    #[error("invalid identifier on '{}': {reason}", at(.type_name, .member.as_deref()))]
    InvalidIdentifier {
        type_name: String,
        member: Option<String>,
        reason: String,
    },

    #[error(
        "output member '{name}' on '{type_name}' is produced by both '{first}' and '{second}'"
    )]
    DuplicateMemberName {
        type_name: String,
        name: String,
        first: String,
        second: String,
    },

    #[error("output '{output}' of '{type_name}' is already produced by '{first}'")]
    DuplicateOutputName {
        type_name: String,
        output: String,
        first: String,
    },
}

impl ResolutionError {
    /// Stable diagnostic code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConflictingTypeMarkers { .. } => "PSG001",
            Self::MissingRequiredTypeInfo { .. } => "PSG002",
            Self::MisplacedMarker { .. } => "PSG003",
            Self::DuplicatePartialMarker { .. } => "PSG004",
            Self::InvalidIdentifier { .. } => "PSG005",
            Self::DuplicateMemberName { .. } => "PSG006",
            Self::DuplicateOutputName { .. } => "PSG007",
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::ConflictingTypeMarkers { type_name, .. }
            | Self::MissingRequiredTypeInfo { type_name, .. }
            | Self::MisplacedMarker { type_name, .. }
            | Self::DuplicatePartialMarker { type_name, .. }
            | Self::InvalidIdentifier { type_name, .. }
            | Self::DuplicateMemberName { type_name, .. }
            | Self::DuplicateOutputName { type_name, .. } => type_name,
        }
    }

    /// The source member the error is attributed to, if any.
    #[must_use]
    pub fn member(&self) -> Option<&str> {
        match self {
            Self::ConflictingTypeMarkers { member, .. } => Some(member),
            Self::MissingRequiredTypeInfo { member, .. }
            | Self::MisplacedMarker { member, .. }
            | Self::InvalidIdentifier { member, .. } => member.as_deref(),
            Self::DuplicateMemberName { second, .. } => Some(second),
            Self::DuplicatePartialMarker { .. } | Self::DuplicateOutputName { .. } => None,
        }
    }
}

fn at(type_name: &str, member: Option<&str>) -> String {
    match member {
        Some(member) => format!("{type_name}.{member}"),
        None => type_name.to_string(),
    }
}

fn join_kinds(kinds: &[MarkerKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
