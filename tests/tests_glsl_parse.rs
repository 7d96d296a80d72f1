#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

mod helpers;

use glslfront::parser::ast::{
    ArraySize, BinaryOp, CaseLabel, DeclarationKind, Expr, ExternalDeclaration, Jump, Statement,
    TranslationUnit, TypeSpecifierNonArray,
};
use glslfront::parser::errors::{ErrorCode, ParseError};
use glslfront::parser::terminals::Terminal;
use glslfront::parser::{Directive, DirectiveKind};
use glslfront::{ParseOptions, TextRange, TextSize, parse_str, parse_str_with};
use helpers::source_fixtures::*;
use helpers::{first_initializer, main_body, parse_ok, single_function};
use rstest::rstest;

// ============================================================================
// TRANSLATION UNITS
// ============================================================================

#[rstest]
#[case(EMPTY_MAIN, 1)]
#[case(SINGLE_DECLARATION, 1)]
#[case(VERTEX_SHADER, 5)]
#[case(LIGHTING_SHADER, 11)]
#[case(LOOPS, 1)]
#[case("float a; float b; float c;", 3)]
#[case("void f(); void f() {}", 2)]
fn test_external_declaration_count(#[case] source: &str, #[case] expected: usize) {
    let unit = parse_ok(source);
    assert_eq!(unit.len(), expected);
}

#[test]
fn test_single_declaration_with_sum() {
    let unit = parse_ok("int x = 1 + 2;");
    assert_eq!(unit.len(), 1);
    let ExternalDeclaration::Declaration(declaration) = &unit.declarations[0] else {
        panic!("expected declaration");
    };
    let DeclarationKind::Variables(list) = &declaration.kind else {
        panic!("expected variables");
    };
    assert_eq!(list.variables.len(), 1);
    assert_eq!(list.variables[0].name(), "x");
    assert_eq!(list.ty.specifier.ty.native(), Some(Terminal::Int));

    match list.variables[0].initializer.as_ref().unwrap() {
        Expr::Binary { op, lhs, rhs, .. } => {
            assert_eq!(*op, BinaryOp::Add);
            assert_eq!(**lhs, Expr::IntConst(1));
            assert_eq!(**rhs, Expr::IntConst(2));
        }
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn test_parse_is_deterministic() {
    let first = parse_ok(LIGHTING_SHADER);
    let second = parse_ok(LIGHTING_SHADER);
    assert_eq!(first, second);
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

#[test]
fn test_comma_sequence_is_flat() {
    let body = main_body("a, b, c;");
    match &body[0] {
        Statement::Expression(Some(Expr::Sequence(items))) => {
            let names: Vec<_> = items.iter().filter_map(Expr::identifier).collect();
            assert_eq!(names, ["a", "b", "c"]);
        }
        other => panic!("expected sequence, got {other:?}"),
    }
}

#[rstest]
#[case("int x = 1 + 2 * 3;", BinaryOp::Add)]
#[case("int x = 1 * 2 + 3;", BinaryOp::Add)]
#[case("int x = 1 << 2 < 3;", BinaryOp::Lt)]
#[case("bool x = a || b && c;", BinaryOp::Or)]
#[case("bool x = a ^^ b || c;", BinaryOp::Or)]
#[case("int x = a & b | c ^ d;", BinaryOp::BitOr)]
#[case("bool x = a == b != c;", BinaryOp::Ne)]
fn test_operator_precedence(#[case] source: &str, #[case] root: BinaryOp) {
    let unit = parse_ok(source);
    match first_initializer(&unit) {
        Expr::Binary { op, .. } => assert_eq!(*op, root),
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn test_conditional_and_assignment_are_right_associative() {
    let body = main_body("a = b += c ? d : e;");
    let Statement::Expression(Some(Expr::Assignment { rhs, .. })) = &body[0] else {
        panic!("expected assignment");
    };
    let Expr::Assignment { rhs: inner, .. } = rhs.as_ref() else {
        panic!("expected nested assignment");
    };
    assert!(matches!(inner.as_ref(), Expr::Conditional { .. }));
}

#[test]
fn test_constructor_and_index() {
    let unit = parse_ok("vec4 c = vec4(v[0], 1.0);");
    match first_initializer(&unit) {
        Expr::Call(call) => {
            assert_eq!(call.callee.name(), Some("vec4"));
            assert_eq!(call.arguments.len(), 2);
            assert!(matches!(call.arguments[0], Expr::Index { .. }));
        }
        other => panic!("expected constructor call, got {other:?}"),
    }
}

#[test]
fn test_void_argument_list() {
    let unit = parse_ok("float x = f(void);");
    match first_initializer(&unit) {
        Expr::Call(call) => {
            assert!(call.void_argument);
            assert!(call.arguments.is_empty());
        }
        other => panic!("expected call, got {other:?}"),
    }
}

#[rstest]
#[case("uint x = 7u;", Expr::UintConst(7))]
#[case("int x = 0x1F;", Expr::IntConst(31))]
#[case("int x = 017;", Expr::IntConst(15))]
#[case("float x = 1.5e1;", Expr::FloatConst(15.0))]
#[case("bool x = true;", Expr::BoolConst(true))]
fn test_constants(#[case] source: &str, #[case] expected: Expr) {
    let unit = parse_ok(source);
    assert_eq!(first_initializer(&unit), &expected);
}

// ============================================================================
// STATEMENTS
// ============================================================================

#[test]
fn test_if_without_else() {
    let body = main_body("if (a) b();");
    match &body[0] {
        Statement::Selection { else_branch, .. } => assert!(else_branch.is_none()),
        other => panic!("expected selection, got {other:?}"),
    }
}

#[test]
fn test_if_with_else() {
    let body = main_body("if (a) b(); else c();");
    match &body[0] {
        Statement::Selection { else_branch, .. } => assert!(else_branch.is_some()),
        other => panic!("expected selection, got {other:?}"),
    }
}

#[test]
fn test_dangling_else_binds_to_inner_if() {
    let body = main_body("if (a) if (b) x(); else y();");
    let Statement::Selection {
        then_branch,
        else_branch,
        ..
    } = &body[0]
    else {
        panic!("expected selection");
    };
    assert!(else_branch.is_none());
    match then_branch.as_ref() {
        Statement::Selection { else_branch, .. } => assert!(else_branch.is_some()),
        other => panic!("expected inner selection, got {other:?}"),
    }
}

#[test]
fn test_switch_labels() {
    let body = main_body("switch (x) { case 1: y = 2; break; default: break; }");
    let Statement::Switch { body, .. } = &body[0] else {
        panic!("expected switch");
    };
    assert_eq!(body.len(), 5);
    assert!(matches!(body[0], Statement::CaseLabel(CaseLabel::Case(_))));
    assert!(matches!(body[2], Statement::Jump(Jump::Break)));
    assert!(matches!(body[3], Statement::CaseLabel(CaseLabel::Default)));
}

#[test]
fn test_loops() {
    let unit = parse_ok(LOOPS);
    let statements = &single_function(&unit).body.statements;
    assert!(matches!(statements[1], Statement::While { .. }));
    assert!(matches!(statements[2], Statement::DoWhile { .. }));
    assert!(matches!(statements[3], Statement::While { .. }));
    match &statements[4] {
        Statement::For { rest, .. } => {
            assert!(rest.condition.is_none());
            assert!(rest.iteration.is_none());
        }
        other => panic!("expected for, got {other:?}"),
    }
}

#[test]
fn test_function_body_shares_scope() {
    let unit = parse_ok("void main() { { int x; } }");
    let function = single_function(&unit);
    assert!(!function.body.new_scope);
    match &function.body.statements[0] {
        Statement::Compound(inner) => assert!(inner.new_scope),
        other => panic!("expected compound, got {other:?}"),
    }
}

// ============================================================================
// TYPES AND DECLARATIONS
// ============================================================================

#[test]
fn test_struct_name_becomes_type_name() {
    let unit = parse_ok("struct S { float f; }; S value;");
    let second = unit.globals().nth(1).unwrap();
    let DeclarationKind::Variables(list) = &second.kind else {
        panic!("expected variables");
    };
    assert!(matches!(
        list.ty.specifier.ty,
        TypeSpecifierNonArray::TypeName(_)
    ));
}

#[test]
fn test_predefined_struct_names() {
    assert!(parse_str("gl_LightSourceParameters light;").is_ok());

    let options = ParseOptions::new().with_predefined_structs(false);
    assert!(parse_str_with("gl_LightSourceParameters light;", &options).is_err());

    let options = ParseOptions::new().with_type_name("Custom");
    assert!(parse_str_with("Custom c;", &options).is_ok());
}

#[test]
fn test_layout_and_precision_declarations() {
    let unit = parse_ok(
        "precision highp float;\n\
         layout(location = 0, std140) out vec4 color;\n\
         flat in int id;\n\
         invariant varying vec3 normal;",
    );
    let kinds: Vec<_> = unit.globals().map(|d| &d.kind).collect();
    assert!(matches!(kinds[0], DeclarationKind::Precision { .. }));
    match kinds[1] {
        DeclarationKind::Variables(list) => {
            let layout = list.ty.qualifier.as_ref().unwrap().layout.as_ref().unwrap();
            assert_eq!(layout.ids.len(), 2);
            assert!(layout.ids[0].value.is_some());
            assert!(layout.ids[1].value.is_none());
        }
        other => panic!("expected variables, got {other:?}"),
    }
    assert!(matches!(kinds[2], DeclarationKind::Variables(_)));
    assert!(matches!(kinds[3], DeclarationKind::Variables(_)));
}

#[test]
fn test_annotations_attach_to_declarations() {
    let unit = parse_ok("//$ @a = 1\nuniform float x; //$ @b = 2\nuniform float y;");
    let declarations: Vec<_> = unit.globals().collect();
    assert_eq!(declarations.len(), 2);
    let annotations: Vec<_> = declarations[0].annotations().collect();
    assert_eq!(annotations, ["@a = 1", "@b = 2"]);
    assert_eq!(declarations[1].annotations().count(), 0);
}

// ============================================================================
// ERRORS
// ============================================================================

#[rstest]
#[case("int x = ;", ErrorCode::E0201)]
#[case("void main() {", ErrorCode::E0202)]
#[case("int class;", ErrorCode::E0203)]
#[case("int x = 1 $ 2;", ErrorCode::E0101)]
#[case("/* never closed", ErrorCode::E0102)]
#[case("int x = 99999999999;", ErrorCode::E0103)]
#[case("int x = 1 # 2;", ErrorCode::E0101)]
#[case("#include \"common.glsl\"\nvoid main() {}", ErrorCode::E0105)]
#[case("#define MAX(a, b) a\nvoid main() {}", ErrorCode::E0105)]
#[case("#endif\nvoid main() {}", ErrorCode::E0105)]
#[case("#ifdef DEBUG\nvoid main() {}", ErrorCode::E0106)]
#[case("#error unsupported driver\nvoid main() {}", ErrorCode::E0107)]
fn test_errors_are_fatal(#[case] source: &str, #[case] code: ErrorCode) {
    let error = parse_str(source).unwrap_err();
    assert_eq!(error.code(), code, "{error}");
}

#[test]
fn test_syntax_error_reports_expected_terminals() {
    let error = parse_str("int x = ;").unwrap_err();
    let ParseError::Syntax(syntax) = &error else {
        panic!("expected syntax error, got {error:?}");
    };
    assert_eq!(syntax.found, ";");
    assert_eq!(u32::from(syntax.range.start()), 8);
    assert!(syntax.expected.contains(&"IDENTIFIER"));
    assert!(syntax.expected.contains(&"NATIVE-TYPE"));
}

#[test]
fn test_error_position_rendering() {
    let source = "void main() {\n    int x = ;\n}";
    let error = parse_str(source).unwrap_err();
    let index = glslfront::LineIndex::new(source);
    assert!(error.render(&index).starts_with("2:13: error[E0201]"));
}

// ============================================================================
// PREPROCESSOR
// ============================================================================

fn global_names(unit: &TranslationUnit) -> Vec<String> {
    unit.globals()
        .flat_map(|declaration| match &declaration.kind {
            DeclarationKind::Variables(list) => list
                .variables
                .iter()
                .map(|variable| variable.name().to_string())
                .collect(),
            _ => Vec::new(),
        })
        .collect()
}

#[test]
fn test_version_directive_is_recorded() {
    let unit = parse_ok(PREPROCESSOR_DIRECTIVE);
    assert_eq!(unit.len(), 1);
    assert_eq!(
        unit.directives,
        vec![Directive {
            kind: DirectiveKind::Version {
                number: 130,
                profile: None,
            },
            range: TextRange::at(TextSize::new(0), TextSize::new(12)),
        }]
    );
}

#[test]
fn test_conditional_groups_and_macros() {
    let unit = parse_ok(CONDITIONAL_SHADER);
    assert_eq!(global_names(&unit), ["positions", "fogDensity", "quad"]);
    assert_eq!(unit.functions().count(), 1);

    let positions = unit.globals().next().unwrap();
    let DeclarationKind::Variables(list) = &positions.kind else {
        panic!("expected variables, got {:?}", positions.kind);
    };
    let Some(ArraySize::Sized(size)) = &list.variables[0].array else {
        panic!("expected a sized array");
    };
    assert_eq!(**size, Expr::IntConst(4));

    let kinds: Vec<&DirectiveKind> = unit.directives.iter().map(|d| &d.kind).collect();
    assert_eq!(kinds.len(), 2);
    assert!(matches!(kinds[0], DirectiveKind::Version { number: 330, .. }));
    assert!(matches!(
        kinds[1],
        DirectiveKind::Extension { name, behavior }
            if name == "GL_ARB_explicit_attrib_location" && behavior == "require"
    ));
}

#[test]
fn test_directives_in_skipped_groups_are_ignored() {
    let source = "#if 0\n#version 100\n#error never\n#endif\n#version 300 es\nvoid main() {}";
    let unit = parse_ok(source);
    assert_eq!(unit.directives.len(), 1);
    assert_eq!(
        unit.directives[0].kind,
        DirectiveKind::Version {
            number: 300,
            profile: Some("es".into()),
        }
    );
}

#[test]
fn test_defines_from_options() {
    let source = "uniform TF_SAMPLER_TYPE tf;\n#if TF_CHANNELS == 4\nuniform vec4 scale;\n#endif\nvoid main() {}";
    let error = parse_str(source).unwrap_err();
    assert_eq!(error.code(), ErrorCode::E0201);

    let options = ParseOptions::new()
        .with_define("TF_SAMPLER_TYPE", "sampler1D")
        .with_define("TF_CHANNELS", "4");
    let unit = parse_str_with(source, &options).unwrap();
    assert_eq!(global_names(&unit), ["tf", "scale"]);
}

#[test]
fn test_source_define_overrides_option_define() {
    let source = "#undef SIZE\n#define SIZE 2\nfloat values[SIZE];";
    let options = ParseOptions::new().with_define("SIZE", "8");
    let unit = parse_str_with(source, &options).unwrap();
    let declaration = unit.globals().next().unwrap();
    let DeclarationKind::Variables(list) = &declaration.kind else {
        panic!("expected variables, got {:?}", declaration.kind);
    };
    assert_eq!(
        list.variables[0].array,
        Some(ArraySize::Sized(Box::new(Expr::IntConst(2))))
    );
}

// ============================================================================
// DEEP EXPRESSIONS
// ============================================================================

#[test]
fn test_long_operator_chain_drops_without_overflow() {
    let terms = vec!["1"; 200_000].join("+");
    let source = format!("int x = {terms};");
    let unit = parse_ok(&source);
    assert!(matches!(
        first_initializer(&unit),
        Expr::Binary { op: BinaryOp::Add, .. }
    ));
    drop(unit);
}
