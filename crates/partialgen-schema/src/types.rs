use crate::prelude::*;
use derive_more::Display;

///
/// TypeKind
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    #[display("class")]
    Class,

    #[display("struct")]
    Struct,
}

///
/// Accessibility
///
/// Declared accessibility of a type or member, rendered as its keyword form.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum Accessibility {
    #[display("internal")]
    Internal,

    #[display("private")]
    Private,

    #[display("private protected")]
    PrivateProtected,

    #[display("protected")]
    Protected,

    #[display("protected internal")]
    ProtectedInternal,

    #[default]
    #[display("public")]
    Public,
}

///
/// Accessors
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessors {
    #[display("get;")]
    Get,

    #[display("get; init;")]
    GetInit,

    #[default]
    #[display("get; set;")]
    GetSet,
}
