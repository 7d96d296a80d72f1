//! Abstract syntax tree of the shading language.
//!
//! The tree is strictly owned: every node exclusively owns its children.
//! [`Node`] is what the parser keeps on its symbol stack between
//! reductions; it has one variant per construction category and is never
//! part of a finished tree.

mod declarations;
mod expressions;
mod statements;
mod types;

pub use declarations::{
    BlockInstance, Declaration, DeclarationKind, DeclarationList, ExternalDeclaration,
    FunctionDefinition, FunctionPrototype, InterfaceBlock, ParameterDeclaration,
    ParameterDirection, ParameterQualifier, TranslationUnit, VariableDeclarator,
};
pub use expressions::{AssignOp, BinaryOp, Callee, Expr, FunctionCall, PostfixOp, UnaryOp};
pub use statements::{CaseLabel, CompoundStatement, Condition, ForRest, Jump, Statement};
pub use types::{
    ArraySize, FullySpecifiedType, Interpolation, InterpolationQualifier, LayoutId,
    LayoutQualifier, Precision, PrecisionQualifier, Storage, StorageQualifier, StructDeclaration,
    StructDeclarator, StructSpecifier, TypeQualifier, TypeSpecifier, TypeSpecifierNonArray,
};

use super::lr::{Extract, SymbolNode};

/// Generates [`Node`] together with its [`SymbolNode`] and [`Extract`]
/// implementations. Every payload type appears in exactly one variant.
macro_rules! node_payloads {
    ($($variant:ident($payload:ty) => $name:literal,)*) => {
        /// A reduced nonterminal on the parser's symbol stack
        #[derive(Debug, Clone, PartialEq)]
        pub enum Node {
            $($variant($payload),)*
        }

        impl SymbolNode for Node {
            fn kind_name(&self) -> &'static str {
                match self {
                    $(Node::$variant(_) => $name,)*
                }
            }
        }

        $(
            impl Extract<Node> for $payload {
                const EXPECTED: &'static str = $name;

                fn extract(node: Node) -> Result<Self, Node> {
                    match node {
                        Node::$variant(payload) => Ok(payload),
                        other => Err(other),
                    }
                }
            }

            impl From<$payload> for Node {
                fn from(payload: $payload) -> Self {
                    Node::$variant(payload)
                }
            }
        )*
    };
}

node_payloads! {
    // =========================================================================
    // DECLARATIONS
    // =========================================================================
    TranslationUnit(TranslationUnit) => "translation-unit",
    ExternalDeclaration(ExternalDeclaration) => "external-declaration",
    FunctionDefinition(FunctionDefinition) => "function-definition",
    FunctionPrototype(FunctionPrototype) => "function-prototype",
    ParameterDeclaration(ParameterDeclaration) => "parameter-declaration",
    ParameterQualifier(ParameterQualifier) => "parameter-qualifier",
    Declaration(Declaration) => "declaration",
    DeclarationList(DeclarationList) => "init-declarator-list",

    // =========================================================================
    // STATEMENTS
    // =========================================================================
    Statement(Statement) => "statement",
    CompoundStatement(CompoundStatement) => "compound-statement",
    StatementList(Vec<Statement>) => "statement-list",
    Condition(Condition) => "condition",
    ForRest(ForRest) => "for-rest-statement",

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================
    Expr(Expr) => "expression",
    FunctionCall(FunctionCall) => "function-call",

    // =========================================================================
    // TYPES
    // =========================================================================
    FullySpecifiedType(FullySpecifiedType) => "fully-specified-type",
    TypeQualifier(TypeQualifier) => "type-qualifier",
    StorageQualifier(StorageQualifier) => "storage-qualifier",
    InterpolationQualifier(InterpolationQualifier) => "interpolation-qualifier",
    LayoutQualifier(LayoutQualifier) => "layout-qualifier",
    LayoutIds(Vec<LayoutId>) => "layout-qualifier-id-list",
    PrecisionQualifier(PrecisionQualifier) => "precision-qualifier",
    TypeSpecifier(TypeSpecifier) => "type-specifier",
    TypeSpecifierNonArray(TypeSpecifierNonArray) => "type-specifier-nonarray",
    StructSpecifier(StructSpecifier) => "struct-specifier",
    StructDeclarations(Vec<StructDeclaration>) => "struct-declaration-list",
    StructDeclaration(StructDeclaration) => "struct-declaration",
    StructDeclarators(Vec<StructDeclarator>) => "struct-declarator-list",
    StructDeclarator(StructDeclarator) => "struct-declarator",
}

#[cfg(test)]
mod tests;
