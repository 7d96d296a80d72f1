//! Types and type qualifiers

use super::Expr;
use crate::parser::terminals::Terminal;
use crate::parser::token::Token;

/// Array suffix `[ ]` or `[ constant-expression ]`
#[derive(Debug, Clone, PartialEq)]
pub enum ArraySize {
    Unsized,
    Sized(Box<Expr>),
}

/// A type with optional qualifiers, as used by variables and return types
#[derive(Debug, Clone, PartialEq)]
pub struct FullySpecifiedType {
    pub qualifier: Option<TypeQualifier>,
    pub specifier: TypeSpecifier,
}

impl FullySpecifiedType {
    pub fn storage(&self) -> Option<Storage> {
        self.qualifier
            .as_ref()
            .and_then(|q| q.storage.as_ref())
            .map(|s| s.kind)
    }
}

/// Qualifiers in source order: layout, invariant, interpolation, storage
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeQualifier {
    pub layout: Option<LayoutQualifier>,
    pub invariant: Option<Token>,
    pub interpolation: Option<InterpolationQualifier>,
    pub storage: Option<StorageQualifier>,
}

/// `layout ( id, id = 3, ... )`
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutQualifier {
    pub ids: Vec<LayoutId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutId {
    pub name: Token,
    /// `INTCONSTANT` of `name = value`
    pub value: Option<Token>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpolation {
    Smooth,
    Flat,
    NoPerspective,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationQualifier {
    pub kind: Interpolation,
    pub token: Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Storage {
    Const,
    Attribute,
    Varying,
    CentroidVarying,
    In,
    Out,
    CentroidIn,
    CentroidOut,
    Uniform,
}

impl Storage {
    /// Storage of a single keyword, without `centroid`
    pub fn from_terminal(terminal: Terminal) -> Option<Self> {
        let storage = match terminal {
            Terminal::Const => Self::Const,
            Terminal::Attribute => Self::Attribute,
            Terminal::Varying => Self::Varying,
            Terminal::In => Self::In,
            Terminal::Out => Self::Out,
            Terminal::Uniform => Self::Uniform,
            _ => return None,
        };
        Some(storage)
    }

    /// The `centroid` variant of this storage, if there is one
    pub fn centroid(self) -> Option<Self> {
        match self {
            Self::Varying => Some(Self::CentroidVarying),
            Self::In => Some(Self::CentroidIn),
            Self::Out => Some(Self::CentroidOut),
            _ => None,
        }
    }

    pub fn is_input(self) -> bool {
        matches!(
            self,
            Self::In | Self::CentroidIn | Self::Attribute | Self::Varying | Self::CentroidVarying
        )
    }

    pub fn is_output(self) -> bool {
        matches!(self, Self::Out | Self::CentroidOut)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageQualifier {
    pub kind: Storage,
    pub centroid: Option<Token>,
    pub token: Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionQualifier {
    pub kind: Precision,
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpecifier {
    pub precision: Option<PrecisionQualifier>,
    pub ty: TypeSpecifierNonArray,
    pub array: Option<ArraySize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecifierNonArray {
    Void(Token),
    /// A native type keyword; the token keeps its concrete terminal.
    Native(Token),
    Struct(StructSpecifier),
    TypeName(Token),
}

impl TypeSpecifierNonArray {
    /// Concrete terminal of a native type
    pub fn native(&self) -> Option<Terminal> {
        match self {
            Self::Native(token) => Some(token.terminal),
            _ => None,
        }
    }

    /// Spelled name: the keyword, the type name or the struct name
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Void(token) | Self::Native(token) => Some(token.terminal.grammar_name()),
            Self::TypeName(token) => token.text(),
            Self::Struct(specifier) => specifier.name.as_ref().and_then(Token::text),
        }
    }
}

/// `struct name { members }`; the name is optional
#[derive(Debug, Clone, PartialEq)]
pub struct StructSpecifier {
    pub name: Option<Token>,
    pub members: Vec<StructDeclaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDeclaration {
    pub qualifier: Option<TypeQualifier>,
    pub ty: TypeSpecifier,
    pub declarators: Vec<StructDeclarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDeclarator {
    pub name: Token,
    pub array: Option<ArraySize>,
}
