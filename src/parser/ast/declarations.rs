//! Translation units, functions and declarations

use super::{
    ArraySize, CompoundStatement, Expr, FullySpecifiedType, PrecisionQualifier,
    StructDeclaration, TypeQualifier, TypeSpecifier,
};
use crate::parser::preprocessor::Directive;
use crate::parser::terminals::Terminal;
use crate::parser::token::Token;

/// Root of a successful parse
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranslationUnit {
    pub declarations: Vec<ExternalDeclaration>,
    /// `#version`, `#extension`, `#pragma` and `#line` directives of the
    /// active groups, in source order
    pub directives: Vec<Directive>,
}

impl TranslationUnit {
    /// Number of top-level declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.declarations.iter().filter_map(|d| match d {
            ExternalDeclaration::Function(function) => Some(function),
            ExternalDeclaration::Declaration(_) => None,
        })
    }

    /// Global declarations, function definitions excluded
    pub fn globals(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter_map(|d| match d {
            ExternalDeclaration::Declaration(declaration) => Some(declaration),
            ExternalDeclaration::Function(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExternalDeclaration {
    Function(FunctionDefinition),
    Declaration(Declaration),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub prototype: FunctionPrototype,
    pub body: CompoundStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionPrototype {
    pub return_type: FullySpecifiedType,
    pub name: Token,
    pub parameters: Vec<ParameterDeclaration>,
}

impl FunctionPrototype {
    pub fn name(&self) -> &str {
        self.name.text().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterDirection {
    In,
    Out,
    InOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterQualifier {
    pub direction: ParameterDirection,
    pub token: Token,
}

impl ParameterQualifier {
    pub fn from_token(token: Token) -> Option<Self> {
        let direction = match token.terminal {
            Terminal::In => ParameterDirection::In,
            Terminal::Out => ParameterDirection::Out,
            Terminal::InOut => ParameterDirection::InOut,
            _ => return None,
        };
        Some(Self { direction, token })
    }
}

/// A function parameter; the name is optional in prototypes
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclaration {
    pub constant: Option<Token>,
    pub qualifier: Option<ParameterQualifier>,
    pub ty: TypeSpecifier,
    pub name: Option<Token>,
    pub array: Option<ArraySize>,
}

/// A declaration with the annotations written around it
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub leading_annotation: Option<Token>,
    pub trailing_annotation: Option<Token>,
}

impl Declaration {
    pub fn new(kind: DeclarationKind) -> Self {
        Self {
            kind,
            leading_annotation: None,
            trailing_annotation: None,
        }
    }

    /// Annotation texts, leading first
    pub fn annotations(&self) -> impl Iterator<Item = &str> {
        self.leading_annotation
            .iter()
            .chain(&self.trailing_annotation)
            .filter_map(Token::text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationKind {
    /// `function-prototype ;`
    Prototype(FunctionPrototype),
    /// Variables sharing one type
    Variables(DeclarationList),
    /// `precision highp float ;`
    Precision {
        precision: PrecisionQualifier,
        ty: TypeSpecifier,
    },
    /// `uniform Block { ... } instance ;`
    Block(InterfaceBlock),
    /// A lone qualifier such as `invariant ;`; `name` is anonymous.
    Qualifier { qualifier: TypeQualifier, name: Token },
}

/// `fully-specified-type a, b[2] = ..., c`
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationList {
    pub ty: FullySpecifiedType,
    pub variables: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    /// Anonymous when the declaration names no variable (`struct S { ... };`)
    pub name: Token,
    pub array: Option<ArraySize>,
    pub initializer: Option<Expr>,
}

impl VariableDeclarator {
    pub fn name(&self) -> &str {
        self.name.text().unwrap_or_default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_anonymous()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceBlock {
    pub qualifier: TypeQualifier,
    pub name: Token,
    pub members: Vec<StructDeclaration>,
    pub instance: Option<BlockInstance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockInstance {
    pub name: Token,
    pub array: Option<ArraySize>,
}
