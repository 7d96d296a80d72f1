use super::*;
use crate::parser::ast::Expr;
use crate::parser::parse_str;
use crate::parser::terminals::{BaseType, Terminal};

#[derive(Default)]
struct Counter {
    functions: usize,
    statements: usize,
    identifiers: Vec<String>,
}

impl Visitor for Counter {
    fn visit_function(&mut self, function: &crate::parser::ast::FunctionDefinition) {
        self.functions += 1;
        walk_function(self, function);
    }

    fn visit_statement(&mut self, statement: &crate::parser::ast::Statement) {
        self.statements += 1;
        walk_statement(self, statement);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if let Some(name) = expr.identifier() {
            self.identifiers.push(name.to_string());
        }
        walk_expr(self, expr);
    }
}

#[test]
fn test_visitor_walks_nested_statements() {
    let unit = parse_str(
        "float g = k;\n\
         void main() { if (a > 0) { b = c; } else d++; for (int i = 0; i < n; ++i) {} }",
    )
    .unwrap();
    let mut counter = Counter::default();
    counter.visit_translation_unit(&unit);

    assert_eq!(counter.functions, 1);
    // if, inner block, assignment, else branch, for, init, body
    assert_eq!(counter.statements, 7);
    assert_eq!(counter.identifiers, ["k", "a", "b", "c", "d", "i", "n", "i"]);
}

#[test]
fn test_interface_collects_globals() {
    let source = "\
uniform mediump vec3 color; //$ @name = \"Color\"
//$ @range = [0.0, 1.0]
uniform float weights[4];
in vec2 uv;
centroid out vec4 fragColor;
struct Light { vec3 direction; };
uniform Light light;
const int N = 3;
void main() {}
";
    let unit = parse_str(source).unwrap();
    let interface = ShaderInterface::collect(&unit);

    assert_eq!(interface.len(), 6);
    assert_eq!(interface.uniforms().count(), 3);
    assert_eq!(interface.inputs().count(), 1);
    assert_eq!(interface.outputs().count(), 1);

    let color = interface.get("color").unwrap();
    assert_eq!(color.native, Some(Terminal::Vec3));
    assert_eq!(color.base_type, Some(BaseType::Float));
    assert_eq!(color.element_count, 3);
    assert_eq!(color.precision, Some(crate::parser::ast::Precision::Medium));
    assert_eq!(
        color
            .tag("name")
            .and_then(|tag| tag.value())
            .and_then(|value| value.as_str()),
        Some("Color")
    );

    let weights = interface.get("weights").unwrap();
    assert!(weights.is_array);
    assert_eq!(weights.tag("range").map(|tag| tag.values.len()), Some(2));

    let frag = interface.get("fragColor").unwrap();
    assert_eq!(frag.storage, Some(crate::parser::ast::Storage::CentroidOut));

    let light = interface.get("light").unwrap();
    assert_eq!(light.base_type, Some(BaseType::Struct));
    assert_eq!(light.type_name.as_deref(), Some("Light"));
    assert_eq!(light.element_count, 0);
}

#[test]
fn test_interface_block_members() {
    let unit = parse_str("uniform Material { vec4 diffuse; float shininess; } material;").unwrap();
    let interface = ShaderInterface::collect(&unit);
    assert_eq!(interface.uniforms().count(), 2);
    let diffuse = interface.get("diffuse").unwrap();
    assert_eq!(diffuse.block.as_deref(), Some("Material"));
}

#[test]
fn test_free_text_annotation_is_kept_raw() {
    let unit = parse_str("uniform float t; //$ not a tag list\n").unwrap();
    let interface = ShaderInterface::collect(&unit);
    let t = interface.get("t").unwrap();
    assert!(t.annotations.is_empty());
    assert_eq!(t.raw_annotations.len(), 1);
    assert_eq!(t.raw_annotations[0].as_str(), "not a tag list");
}
