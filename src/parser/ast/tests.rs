use super::*;
use crate::parser::lr::{Extract, SymbolNode};
use crate::parser::parse_str;
use crate::parser::terminals::Terminal;
use crate::parser::token::Token;
use text_size::{TextRange, TextSize};

fn only_variables(unit: &TranslationUnit) -> &DeclarationList {
    match unit.globals().next().map(|d| &d.kind) {
        Some(DeclarationKind::Variables(list)) => list,
        other => panic!("expected a variable declaration, got {other:?}"),
    }
}

#[test]
fn test_binary_op_mapping() {
    assert_eq!(BinaryOp::from_terminal(Terminal::Star), Some(BinaryOp::Mul));
    assert_eq!(BinaryOp::from_terminal(Terminal::XorOp), Some(BinaryOp::Xor));
    assert_eq!(BinaryOp::from_terminal(Terminal::Caret), Some(BinaryOp::BitXor));
    assert_eq!(BinaryOp::from_terminal(Terminal::Equal), None);
    assert_eq!(BinaryOp::Shl.as_str(), "<<");
}

#[test]
fn test_compound_assignment_applies_binary_op() {
    assert_eq!(AssignOp::from_terminal(Terminal::AndAssign), Some(AssignOp::And));
    assert_eq!(AssignOp::And.binary(), Some(BinaryOp::BitAnd));
    assert_eq!(AssignOp::Assign.binary(), None);
}

#[test]
fn test_storage_centroid() {
    assert_eq!(Storage::In.centroid(), Some(Storage::CentroidIn));
    assert_eq!(Storage::Uniform.centroid(), None);
    assert!(Storage::Attribute.is_input());
    assert!(Storage::CentroidOut.is_output());
    assert!(!Storage::Uniform.is_input());
}

#[test]
fn test_node_kind_and_extract() {
    let node = Node::from(Expr::IntConst(3));
    assert_eq!(node.kind_name(), "expression");

    let back = Statement::extract(node.clone());
    assert_eq!(back, Err(node.clone()));
    assert_eq!(Expr::extract(node), Ok(Expr::IntConst(3)));
}

#[test]
fn test_anonymous_declarator() {
    let declarator = VariableDeclarator {
        name: Token::anonymous_identifier(TextSize::from(4)),
        array: None,
        initializer: None,
    };
    assert!(declarator.is_anonymous());
    assert_eq!(declarator.name(), "");

    let named = VariableDeclarator {
        name: Token::identifier("x", TextRange::new(0.into(), 1.into())),
        array: None,
        initializer: None,
    };
    assert!(!named.is_anonymous());
}

#[test]
fn test_init_declarator_list() {
    let unit = parse_str("float a, b[2], c = 1.0;").unwrap();
    let list = only_variables(&unit);
    let names: Vec<_> = list.variables.iter().map(VariableDeclarator::name).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert!(matches!(list.variables[1].array, Some(ArraySize::Sized(_))));
    assert_eq!(list.variables[2].initializer, Some(Expr::FloatConst(1.0)));
}

#[test]
fn test_struct_declaration_is_anonymous_variable() {
    let unit = parse_str("struct Light { vec3 color; float power; };").unwrap();
    let list = only_variables(&unit);
    assert_eq!(list.variables.len(), 1);
    assert!(list.variables[0].is_anonymous());
    match &list.ty.specifier.ty {
        TypeSpecifierNonArray::Struct(specifier) => {
            assert_eq!(specifier.members.len(), 2);
            assert_eq!(list.ty.specifier.ty.name(), Some("Light"));
        }
        other => panic!("expected struct, got {other:?}"),
    }
}

#[test]
fn test_native_type_keeps_concrete_keyword() {
    let unit = parse_str("uniform mat4 mvp;").unwrap();
    let list = only_variables(&unit);
    assert_eq!(list.ty.specifier.ty.native(), Some(Terminal::Mat4));
    assert_eq!(list.ty.storage(), Some(Storage::Uniform));
}

#[test]
fn test_function_prototype_parameters() {
    let unit = parse_str("void f(const in vec3 a, out float b[2], int);").unwrap();
    let prototype = match unit.globals().next().map(|d| &d.kind) {
        Some(DeclarationKind::Prototype(prototype)) => prototype,
        other => panic!("expected prototype, got {other:?}"),
    };
    assert_eq!(prototype.name(), "f");
    assert_eq!(prototype.parameters.len(), 3);

    let first = &prototype.parameters[0];
    assert!(first.constant.is_some());
    assert_eq!(
        first.qualifier.as_ref().map(|q| q.direction),
        Some(ParameterDirection::In)
    );

    let second = &prototype.parameters[1];
    assert_eq!(
        second.qualifier.as_ref().map(|q| q.direction),
        Some(ParameterDirection::Out)
    );
    assert!(second.array.is_some());

    let third = &prototype.parameters[2];
    assert!(third.name.is_none());
    assert_eq!(third.ty.ty.native(), Some(Terminal::Int));
}

#[test]
fn test_method_call_and_swizzle() {
    let unit = parse_str("void main() { float n = a.length() + v.xyz.x; }").unwrap();
    let function = unit.functions().next().unwrap();
    let Statement::Declaration(declaration) = &function.body.statements[0] else {
        panic!("expected declaration");
    };
    let DeclarationKind::Variables(list) = &declaration.kind else {
        panic!("expected variables");
    };
    let Some(Expr::Binary { lhs, rhs, .. }) = &list.variables[0].initializer else {
        panic!("expected binary initializer");
    };
    match lhs.as_ref() {
        Expr::Call(call) => {
            assert_eq!(call.callee.name(), Some("length"));
            assert_eq!(
                call.receiver.as_deref().and_then(Expr::identifier),
                Some("a")
            );
        }
        other => panic!("expected method call, got {other:?}"),
    }
    assert!(matches!(rhs.as_ref(), Expr::Field { .. }));
}

#[test]
fn test_interface_block_instance() {
    let unit = parse_str("uniform Lights { vec4 color[4]; } lights[2];").unwrap();
    match unit.globals().next().map(|d| &d.kind) {
        Some(DeclarationKind::Block(block)) => {
            assert_eq!(block.name.text(), Some("Lights"));
            assert_eq!(block.members.len(), 1);
            let instance = block.instance.as_ref().unwrap();
            assert_eq!(instance.name.text(), Some("lights"));
            assert!(matches!(instance.array, Some(ArraySize::Sized(_))));
        }
        other => panic!("expected block, got {other:?}"),
    }
}

#[test]
fn test_qualifier_only_declaration() {
    let source = "invariant;";
    let unit = parse_str(source).unwrap();
    match unit.globals().next().map(|d| &d.kind) {
        Some(DeclarationKind::Qualifier { qualifier, name }) => {
            assert!(qualifier.invariant.is_some());
            assert!(name.is_anonymous());
            assert_eq!(name.range.start(), TextSize::from(9));
        }
        other => panic!("expected qualifier declaration, got {other:?}"),
    }
}
