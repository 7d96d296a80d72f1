//! Traversal of a parsed translation unit.
//!
//! [`Visitor`] has one method per node category. Every method defaults to
//! the matching `walk_*` function, which visits the children; an override
//! that still wants the children calls the walk function itself.

mod interface;

pub use interface::{InterfaceVariable, ShaderInterface};

use crate::parser::ast::{
    CaseLabel, CompoundStatement, Condition, Declaration, DeclarationKind, Expr,
    ExternalDeclaration, FunctionDefinition, FunctionPrototype, Jump, Statement, TranslationUnit,
};

pub trait Visitor {
    fn visit_translation_unit(&mut self, unit: &TranslationUnit) {
        walk_translation_unit(self, unit);
    }

    fn visit_function(&mut self, function: &FunctionDefinition) {
        walk_function(self, function);
    }

    fn visit_prototype(&mut self, _prototype: &FunctionPrototype) {}

    fn visit_declaration(&mut self, declaration: &Declaration) {
        walk_declaration(self, declaration);
    }

    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_translation_unit<V: Visitor + ?Sized>(visitor: &mut V, unit: &TranslationUnit) {
    for declaration in &unit.declarations {
        match declaration {
            ExternalDeclaration::Function(function) => visitor.visit_function(function),
            ExternalDeclaration::Declaration(declaration) => visitor.visit_declaration(declaration),
        }
    }
}

pub fn walk_function<V: Visitor + ?Sized>(visitor: &mut V, function: &FunctionDefinition) {
    visitor.visit_prototype(&function.prototype);
    walk_compound(visitor, &function.body);
}

fn walk_compound<V: Visitor + ?Sized>(visitor: &mut V, compound: &CompoundStatement) {
    for statement in &compound.statements {
        visitor.visit_statement(statement);
    }
}

pub fn walk_declaration<V: Visitor + ?Sized>(visitor: &mut V, declaration: &Declaration) {
    match &declaration.kind {
        DeclarationKind::Prototype(prototype) => visitor.visit_prototype(prototype),
        DeclarationKind::Variables(list) => {
            for variable in &list.variables {
                if let Some(initializer) = &variable.initializer {
                    visitor.visit_expr(initializer);
                }
            }
        }
        DeclarationKind::Precision { .. }
        | DeclarationKind::Block(_)
        | DeclarationKind::Qualifier { .. } => {}
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, statement: &Statement) {
    match statement {
        Statement::Compound(compound) => walk_compound(visitor, compound),
        Statement::Declaration(declaration) => visitor.visit_declaration(declaration),
        Statement::Expression(expr) => {
            if let Some(expr) = expr {
                visitor.visit_expr(expr);
            }
        }
        Statement::Selection {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_statement(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_statement(else_branch);
            }
        }
        Statement::Switch { selector, body } => {
            visitor.visit_expr(selector);
            for statement in body {
                visitor.visit_statement(statement);
            }
        }
        Statement::CaseLabel(CaseLabel::Case(value)) => visitor.visit_expr(value),
        Statement::CaseLabel(CaseLabel::Default) => {}
        Statement::While { condition, body } => {
            walk_condition(visitor, condition);
            visitor.visit_statement(body);
        }
        Statement::DoWhile { body, condition } => {
            visitor.visit_statement(body);
            visitor.visit_expr(condition);
        }
        Statement::For { init, rest, body } => {
            visitor.visit_statement(init);
            if let Some(condition) = &rest.condition {
                walk_condition(visitor, condition);
            }
            if let Some(iteration) = &rest.iteration {
                visitor.visit_expr(iteration);
            }
            visitor.visit_statement(body);
        }
        Statement::Jump(Jump::Return(Some(value))) => visitor.visit_expr(value),
        Statement::Jump(_) => {}
    }
}

fn walk_condition<V: Visitor + ?Sized>(visitor: &mut V, condition: &Condition) {
    match condition {
        Condition::Expr(expr) => visitor.visit_expr(expr),
        Condition::Declaration { initializer, .. } => visitor.visit_expr(initializer),
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Identifier(_)
        | Expr::IntConst(_)
        | Expr::UintConst(_)
        | Expr::FloatConst(_)
        | Expr::BoolConst(_) => {}
        Expr::Paren(inner) => visitor.visit_expr(inner),
        Expr::Index { base, index } => {
            visitor.visit_expr(base);
            visitor.visit_expr(index);
        }
        Expr::Field { base, .. } => visitor.visit_expr(base),
        Expr::Postfix { operand, .. } | Expr::Unary { operand, .. } => visitor.visit_expr(operand),
        Expr::Call(call) => {
            if let Some(receiver) = &call.receiver {
                visitor.visit_expr(receiver);
            }
            for argument in &call.arguments {
                visitor.visit_expr(argument);
            }
        }
        Expr::Binary { lhs, rhs, .. } | Expr::Assignment { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Conditional {
            condition,
            then_expr,
            else_expr,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_expr(then_expr);
            visitor.visit_expr(else_expr);
        }
        Expr::Sequence(items) => {
            for item in items {
                visitor.visit_expr(item);
            }
        }
    }
}

#[cfg(test)]
mod tests;
