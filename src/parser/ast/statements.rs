//! Statements

use super::{Declaration, Expr, FullySpecifiedType};
use crate::parser::token::Token;

/// `{ statements }`
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundStatement {
    pub statements: Vec<Statement>,
    /// False for function bodies and loop bodies, which share the scope of
    /// their header.
    pub new_scope: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Compound(CompoundStatement),
    Declaration(Declaration),
    /// `expression ;` or the empty statement `;`
    Expression(Option<Expr>),
    Selection {
        condition: Expr,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    Switch {
        selector: Expr,
        body: Vec<Statement>,
    },
    CaseLabel(CaseLabel),
    While {
        condition: Condition,
        body: Box<Statement>,
    },
    DoWhile {
        body: Box<Statement>,
        condition: Expr,
    },
    For {
        init: Box<Statement>,
        rest: ForRest,
        body: Box<Statement>,
    },
    Jump(Jump),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseLabel {
    Case(Expr),
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Jump {
    Continue,
    Break,
    Return(Option<Expr>),
    Discard,
}

/// Loop condition; may declare a variable
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Expr(Expr),
    Declaration {
        ty: FullySpecifiedType,
        name: Token,
        initializer: Expr,
    },
}

/// `condition ; iteration` part of a `for` header, both optional
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForRest {
    pub condition: Option<Condition>,
    pub iteration: Option<Expr>,
}
