//! Structural model of annotated source types: type descriptors, members,
//! type references and the configuration markers attached to them.

pub mod marker;
pub mod node;
pub mod type_ref;
pub mod types;
pub mod validate;

/// Prefix used when a `Partial` marker does not override the output name.
pub const DEFAULT_NAME_PREFIX: &str = "Partial";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        marker::{ConfigurationMarker, MarkerKind, MarkerPlacement, PartialOptions},
        node::*,
        type_ref::{TupleElement, TypeRef, TypeRefError, TypeShape},
        types::{Accessibility, Accessors, TypeKind},
    };
    pub use serde::{Deserialize, Serialize};
}
