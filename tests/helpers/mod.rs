#![allow(dead_code)]

pub mod source_fixtures;

use glslfront::parser::ast::{
    Declaration, DeclarationKind, Expr, FunctionDefinition, Statement, TranslationUnit,
};
use glslfront::parse_str;

/// Parse or fail the test with the rendered error.
pub fn parse_ok(source: &str) -> TranslationUnit {
    parse_str(source).unwrap_or_else(|e| {
        let index = glslfront::LineIndex::new(source);
        panic!("failed to parse {source:?}: {}", e.render(&index))
    })
}

/// The only function of a unit
pub fn single_function(unit: &TranslationUnit) -> &FunctionDefinition {
    let functions: Vec<_> = unit.functions().collect();
    assert_eq!(functions.len(), 1, "expected exactly one function");
    functions[0]
}

/// Statements of the body of `void main() { ... }`
pub fn main_body(source: &str) -> Vec<Statement> {
    let unit = parse_ok(&format!("void main() {{ {source} }}"));
    single_function(&unit).body.statements.clone()
}

/// Initializer of the first variable of the first global declaration
pub fn first_initializer(unit: &TranslationUnit) -> &Expr {
    let declaration: &Declaration = unit.globals().next().expect("no global declaration");
    match &declaration.kind {
        DeclarationKind::Variables(list) => list.variables[0]
            .initializer
            .as_ref()
            .expect("no initializer"),
        other => panic!("expected variables, got {other:?}"),
    }
}
