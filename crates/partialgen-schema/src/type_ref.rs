use crate::prelude::*;
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

/// Maximum nesting of generic arguments, tuple elements and array suffixes
/// accepted by the parser.
pub const MAX_TYPE_DEPTH: usize = 64;

///
/// TypeRefError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TypeRefError {
    #[error("type reference is empty")]
    Empty,

    #[error("unexpected '{found}' at offset {offset} in '{input}'")]
    Unexpected {
        input: String,
        offset: usize,
        found: char,
    },

    #[error("unexpected end of type reference '{input}'")]
    UnexpectedEnd { input: String },

    #[error("type reference '{input}' nests deeper than {MAX_TYPE_DEPTH} levels")]
    TooDeep { input: String },

    #[error("tuple type '{input}' needs at least two elements")]
    TupleArity { input: String },
}

///
/// TypeRef
///
/// A declared type, kept structurally so substitutions can reach into
/// generic arguments and array elements, and rendered back verbatim.
/// Serialized as its textual form, e.g. `List<Address?>[]?`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    pub shape: TypeShape,
    pub nullable: bool,
}

impl TypeRef {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::generic(name, Vec::new())
    }

    #[must_use]
    pub fn generic(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self {
            shape: TypeShape::Named {
                name: name.into(),
                args,
            },
            nullable: false,
        }
    }

    #[must_use]
    pub fn array(element: Self, rank: u8) -> Self {
        Self {
            shape: TypeShape::Array {
                element: Box::new(element),
                rank: rank.max(1),
            },
            nullable: false,
        }
    }

    #[must_use]
    pub fn tuple(elements: Vec<TupleElement>) -> Self {
        Self {
            shape: TypeShape::Tuple { elements },
            nullable: false,
        }
    }

    /// Return the nullable form of this reference.
    ///
    /// In the target syntax `T?` is both the "may be absent" annotation on
    /// reference types and the `Nullable<T>` wrapper on value types.
    #[must_use]
    pub fn into_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Replace every occurrence of `original` (compared by shape, ignoring
    /// nullability) with `replacement`. Occurrences keep their own `?`.
    /// Returns `None` when `original` does not occur at all.
    #[must_use]
    pub fn substitute(&self, original: &Self, replacement: &Self) -> Option<Self> {
        let mut hits = 0;
        let out = self.substitute_inner(original, replacement, &mut hits);

        (hits > 0).then_some(out)
    }

    fn substitute_inner(&self, original: &Self, replacement: &Self, hits: &mut usize) -> Self {
        if self.shape == original.shape {
            *hits += 1;

            return Self {
                shape: replacement.shape.clone(),
                nullable: self.nullable || replacement.nullable,
            };
        }

        let shape = match &self.shape {
            TypeShape::Named { name, args } => TypeShape::Named {
                name: name.clone(),
                args: args
                    .iter()
                    .map(|arg| arg.substitute_inner(original, replacement, hits))
                    .collect(),
            },
            TypeShape::Array { element, rank } => TypeShape::Array {
                element: Box::new(element.substitute_inner(original, replacement, hits)),
                rank: *rank,
            },
            TypeShape::Tuple { elements } => TypeShape::Tuple {
                elements: elements
                    .iter()
                    .map(|el| TupleElement {
                        ty: el.ty.substitute_inner(original, replacement, hits),
                        name: el.name.clone(),
                    })
                    .collect(),
            },
        };

        Self {
            shape,
            nullable: self.nullable,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            TypeShape::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
            }
            TypeShape::Array { element, rank } => {
                let commas = ",".repeat(usize::from(rank.saturating_sub(1)));
                write!(f, "{element}[{commas}]")?;
            }
            TypeShape::Tuple { elements } => {
                f.write_str("(")?;
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", el.ty)?;
                    if let Some(name) = &el.name {
                        write!(f, " {name}")?;
                    }
                }
                f.write_str(")")?;
            }
        }

        if self.nullable {
            f.write_str("?")?;
        }

        Ok(())
    }
}

impl FromStr for TypeRef {
    type Err = TypeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(TypeRefError::Empty);
        }

        let mut parser = Parser::new(s);
        let ty = parser.parse_type()?;
        parser.skip_ws();

        match parser.peek() {
            None => Ok(ty),
            Some(_) => Err(parser.unexpected()),
        }
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeRefError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.to_string()
    }
}

///
/// TypeShape
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeShape {
    Named { name: String, args: Vec<TypeRef> },
    Array { element: Box<TypeRef>, rank: u8 },
    Tuple { elements: Vec<TupleElement> },
}

///
/// TupleElement
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TupleElement {
    pub ty: TypeRef,
    pub name: Option<String>,
}

///
/// Parser
///
/// Recursive descent over the textual type grammar:
///   type    := primary '?'? ( '[' ','* ']' '?'? )*
///   primary := name ( '<' type ( ',' type )* '>' )?
///            | '(' element ( ',' element )+ ')'
///   element := type name?
///

struct Parser<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeRefError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn unexpected(&self) -> TypeRefError {
        match self.chars.get(self.pos) {
            Some((offset, found)) => TypeRefError::Unexpected {
                input: self.input.to_string(),
                offset: *offset,
                found: *found,
            },
            None => TypeRefError::UnexpectedEnd {
                input: self.input.to_string(),
            },
        }
    }

    fn too_deep(&self) -> TypeRefError {
        TypeRefError::TooDeep {
            input: self.input.to_string(),
        }
    }

    // depth is tracked here so every recursive path is bounded
    fn parse_type(&mut self) -> Result<TypeRef, TypeRefError> {
        self.depth += 1;
        if self.depth > MAX_TYPE_DEPTH {
            return Err(self.too_deep());
        }

        let ty = self.parse_type_inner();
        self.depth -= 1;

        ty
    }

    fn parse_type_inner(&mut self) -> Result<TypeRef, TypeRefError> {
        self.skip_ws();

        let mut ty = if self.eat('(') {
            self.parse_tuple()?
        } else {
            self.parse_named()?
        };

        ty.nullable = self.eat('?');

        // array suffixes wrap left to right, each one a level of nesting
        let mut arrays = 0;
        while self.eat('[') {
            arrays += 1;
            if self.depth + arrays > MAX_TYPE_DEPTH {
                return Err(self.too_deep());
            }

            let mut commas: usize = 0;
            while self.eat(',') {
                commas += 1;
            }
            let rank = u8::try_from(commas + 1).map_err(|_| self.unexpected())?;
            self.expect(']')?;

            ty = TypeRef {
                shape: TypeShape::Array {
                    element: Box::new(ty),
                    rank,
                },
                nullable: false,
            };
            ty.nullable = self.eat('?');
        }

        Ok(ty)
    }

    fn parse_named(&mut self) -> Result<TypeRef, TypeRefError> {
        let name = self.parse_name()?;
        let mut args = Vec::new();

        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                if !self.eat(',') {
                    break;
                }
            }
            self.expect('>')?;
        }

        Ok(TypeRef::generic(name, args))
    }

    fn parse_tuple(&mut self) -> Result<TypeRef, TypeRefError> {
        let mut elements = Vec::new();

        loop {
            let ty = self.parse_type()?;
            self.skip_ws();
            let name = if self.peek().is_some_and(is_name_start) {
                Some(self.parse_name()?)
            } else {
                None
            };
            elements.push(TupleElement { ty, name });

            if !self.eat(',') {
                break;
            }
        }
        self.expect(')')?;

        if elements.len() < 2 {
            return Err(TypeRefError::TupleArity {
                input: self.input.to_string(),
            });
        }

        Ok(TypeRef::tuple(elements))
    }

    // qualified names are opaque: segments joined by '.' or '::'
    fn parse_name(&mut self) -> Result<String, TypeRefError> {
        self.skip_ws();
        if !self.peek().is_some_and(is_name_start) {
            return Err(self.unexpected());
        }

        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_name_char(c) {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }

        Ok(name)
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '@'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '@' | '.' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> TypeRef {
        s.parse().expect("type reference should parse")
    }

    #[test]
    fn display_reproduces_canonical_spelling() {
        for src in [
            "string",
            "int?",
            "List<string?>",
            "Dictionary<string, List<int>>?",
            "int?[]",
            "int[]?",
            "byte[,]",
            "global::System.Guid",
            "(int, string name)?",
        ] {
            assert_eq!(parse(src).to_string(), src);
        }
    }

    #[test]
    fn whitespace_is_normalized() {
        assert_eq!(
            parse(" Dictionary < string ,List<int> > ? ").to_string(),
            "Dictionary<string, List<int>>?"
        );
    }

    #[test]
    fn array_suffix_binds_after_element_nullability() {
        let ty = parse("int?[]");

        assert!(!ty.nullable);
        match ty.shape {
            TypeShape::Array { element, rank } => {
                assert_eq!(rank, 1);
                assert!(element.nullable);
            }
            other => panic!("expected array shape, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<TypeRef>(), Err(TypeRefError::Empty));
        assert!(matches!(
            "List<int".parse::<TypeRef>(),
            Err(TypeRefError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            "int]".parse::<TypeRef>(),
            Err(TypeRefError::Unexpected { found: ']', .. })
        ));
        assert!(matches!(
            "(int)".parse::<TypeRef>(),
            Err(TypeRefError::TupleArity { .. })
        ));
    }

    #[test]
    fn deep_nesting_is_rejected_not_overflowed() {
        let generics = format!("{}int{}", "List<".repeat(200_000), ">".repeat(200_000));
        let tuples = format!("{}int, int{}", "(int, ".repeat(200_000), ")".repeat(200_000));
        let arrays = format!("int{}", "[]".repeat(200_000));

        for src in [generics, tuples, arrays] {
            assert!(matches!(
                src.parse::<TypeRef>(),
                Err(TypeRefError::TooDeep { .. })
            ));
        }
    }

    #[test]
    fn nesting_up_to_the_limit_parses() {
        let depth = MAX_TYPE_DEPTH - 1;
        let src = format!("{}int{}", "List<".repeat(depth), ">".repeat(depth));

        assert_eq!(parse(&src).to_string(), src);
    }

    #[test]
    fn substitute_reaches_into_generic_arguments() {
        let declared = parse("List<Address?>");
        let out = declared
            .substitute(&parse("Address"), &parse("PartialAddress"))
            .expect("Address occurs in the declared type");

        assert_eq!(out.to_string(), "List<PartialAddress?>");
    }

    #[test]
    fn substitute_keeps_outer_nullability() {
        let out = parse("Address?")
            .substitute(&parse("Address"), &parse("PartialAddress"))
            .expect("Address occurs in the declared type");

        assert_eq!(out.to_string(), "PartialAddress?");
    }

    #[test]
    fn substitute_reports_missing_occurrence() {
        assert!(
            parse("List<int>")
                .substitute(&parse("Address"), &parse("PartialAddress"))
                .is_none()
        );
    }

    #[test]
    fn serde_uses_text_form() {
        let ty: TypeRef =
            serde_json::from_str("\"List<int?>\"").expect("type reference should deserialize");
        assert_eq!(ty, TypeRef::generic("List", vec![TypeRef::named("int").into_nullable()]));

        let json = serde_json::to_string(&ty).expect("type reference should serialize");
        assert_eq!(json, "\"List<int?>\"");
    }
}
