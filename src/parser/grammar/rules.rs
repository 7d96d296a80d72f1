//! The productions of the shading language, in production-id order.
//!
//! Production 0 is the augmented start rule. Unit productions that only
//! forward their child are `keep`; every other production names the
//! builder that makes its node.

use crate::parser::ast::Node;
use crate::parser::builder::{declarations as decl, expressions as expr, statements as stmt};
use crate::parser::builder::types as ty;
use crate::parser::lr::{Rule, build, keep};
use crate::parser::terminals::Terminal;

pub static RULES: &[Rule<Terminal, Node>] = &[
    keep("$START$", "program"),
    keep("program", "translation-unit"),
    // =========================================================================
    // TRANSLATION UNIT
    // =========================================================================
    build("translation-unit", "external-declaration", decl::translation_unit_first),
    build("translation-unit", "translation-unit external-declaration", decl::translation_unit_append),
    build("external-declaration", "function-definition", decl::external_function),
    build("external-declaration", "declaration", decl::external_declaration),
    build("external-declaration", "enhanced-declaration", decl::external_declaration),
    build(
        "function-definition",
        "function-prototype compound-statement-no-new-scope",
        decl::function_definition,
    ),
    // =========================================================================
    // STATEMENTS
    // =========================================================================
    keep("statement", "compound-statement"),
    keep("statement", "simple-statement"),
    keep("simple-statement", "declaration-statement"),
    keep("simple-statement", "expression-statement"),
    keep("simple-statement", "selection-statement"),
    keep("simple-statement", "switch-statement"),
    keep("simple-statement", "case-label"),
    keep("simple-statement", "iteration-statement"),
    keep("simple-statement", "jump-statement"),
    build("compound-statement", "{ }", stmt::compound_empty),
    build("compound-statement", "{ statement-list }", stmt::compound),
    build("declaration-statement", "declaration", stmt::declaration),
    build("declaration-statement", "enhanced-declaration", stmt::declaration),
    build("statement-no-new-scope", "compound-statement-no-new-scope", stmt::from_compound),
    keep("statement-no-new-scope", "simple-statement"),
    build("compound-statement-no-new-scope", "{ }", stmt::compound_no_scope_empty),
    build("compound-statement-no-new-scope", "{ statement-list }", stmt::compound_no_scope),
    build("statement-list", "statement", stmt::list_first),
    build("statement-list", "statement-list statement", stmt::list_append),
    build("expression-statement", ";", stmt::empty),
    build("expression-statement", "expression ;", stmt::expression),
    build("selection-statement", "if ( expression ) statement", stmt::if_then),
    build(
        "selection-statement",
        "if ( expression ) statement else statement",
        stmt::if_then_else,
    ),
    build("condition", "expression", stmt::condition),
    build(
        "condition",
        "fully-specified-type IDENTIFIER = initializer",
        stmt::condition_declaration,
    ),
    build("switch-statement", "switch ( expression ) { statement-list }", stmt::switch),
    build("switch-statement", "switch ( expression ) { }", stmt::switch_empty),
    build("case-label", "case expression :", stmt::case_label),
    build("case-label", "default :", stmt::default_label),
    build("iteration-statement", "while ( condition ) statement-no-new-scope", stmt::while_loop),
    build("iteration-statement", "do statement while ( expression ) ;", stmt::do_while),
    build(
        "iteration-statement",
        "for ( for-init-statement for-rest-statement ) statement-no-new-scope",
        stmt::for_loop,
    ),
    keep("for-init-statement", "expression-statement"),
    keep("for-init-statement", "declaration-statement"),
    build("for-rest-statement", ";", stmt::for_rest_empty),
    build("for-rest-statement", "condition ;", stmt::for_rest_condition),
    build("for-rest-statement", "; expression", stmt::for_rest_iteration),
    build("for-rest-statement", "condition ; expression", stmt::for_rest_full),
    build("jump-statement", "continue ;", stmt::jump),
    build("jump-statement", "break ;", stmt::jump),
    build("jump-statement", "return ;", stmt::jump),
    build("jump-statement", "return expression ;", stmt::return_value),
    build("jump-statement", "discard ;", stmt::jump),
    // =========================================================================
    // EXPRESSIONS
    // =========================================================================
    build("primary-expression", "IDENTIFIER", expr::identifier),
    build("primary-expression", "INTCONSTANT", expr::int_constant),
    build("primary-expression", "UINTCONSTANT", expr::uint_constant),
    build("primary-expression", "FLOATCONSTANT", expr::float_constant),
    build("primary-expression", "false", expr::bool_constant),
    build("primary-expression", "true", expr::bool_constant),
    build("primary-expression", "( expression )", expr::parenthesized),
    keep("postfix-expression", "primary-expression"),
    build("postfix-expression", "postfix-expression [ integer-expression ]", expr::index),
    keep("postfix-expression", "function-call-or-method"),
    build("postfix-expression", "postfix-expression . FIELD-SELECTION", expr::field),
    build("postfix-expression", "postfix-expression ++", expr::postfix),
    build("postfix-expression", "postfix-expression --", expr::postfix),
    keep("integer-expression", "expression"),
    build("function-call-or-method", "function-call-generic", expr::call),
    build(
        "function-call-or-method",
        "postfix-expression . function-call-generic",
        expr::method_call,
    ),
    build("function-call-generic", "function-call-header void )", expr::call_void),
    build("function-call-generic", "function-call-header )", expr::call_close),
    build(
        "function-call-generic",
        "function-call-header-with-parameters )",
        expr::call_close,
    ),
    build(
        "function-call-header-with-parameters",
        "function-call-header assignment-expression",
        expr::call_first_argument,
    ),
    build(
        "function-call-header-with-parameters",
        "function-call-header-with-parameters , assignment-expression",
        expr::call_next_argument,
    ),
    build("function-call-header", "type-specifier (", expr::constructor_header),
    build("function-call-header", "IDENTIFIER (", expr::function_header),
    build("function-call-header", "FIELD-SELECTION (", expr::function_header),
    keep("unary-expression", "postfix-expression"),
    build("unary-expression", "++ unary-expression", expr::unary),
    build("unary-expression", "-- unary-expression", expr::unary),
    build("unary-expression", "+ unary-expression", expr::unary),
    build("unary-expression", "- unary-expression", expr::unary),
    build("unary-expression", "! unary-expression", expr::unary),
    build("unary-expression", "~ unary-expression", expr::unary),
    keep("multiplicative-expression", "unary-expression"),
    build("multiplicative-expression", "multiplicative-expression * unary-expression", expr::binary),
    build("multiplicative-expression", "multiplicative-expression / unary-expression", expr::binary),
    build("multiplicative-expression", "multiplicative-expression % unary-expression", expr::binary),
    keep("additive-expression", "multiplicative-expression"),
    build("additive-expression", "additive-expression + multiplicative-expression", expr::binary),
    build("additive-expression", "additive-expression - multiplicative-expression", expr::binary),
    keep("shift-expression", "additive-expression"),
    build("shift-expression", "shift-expression << additive-expression", expr::binary),
    build("shift-expression", "shift-expression >> additive-expression", expr::binary),
    keep("relational-expression", "shift-expression"),
    build("relational-expression", "relational-expression < shift-expression", expr::binary),
    build("relational-expression", "relational-expression > shift-expression", expr::binary),
    build("relational-expression", "relational-expression <= shift-expression", expr::binary),
    build("relational-expression", "relational-expression >= shift-expression", expr::binary),
    keep("equality-expression", "relational-expression"),
    build("equality-expression", "equality-expression == relational-expression", expr::binary),
    build("equality-expression", "equality-expression != relational-expression", expr::binary),
    keep("and-expression", "equality-expression"),
    build("and-expression", "and-expression & equality-expression", expr::binary),
    keep("exclusive-or-expression", "and-expression"),
    build("exclusive-or-expression", "exclusive-or-expression ^ and-expression", expr::binary),
    keep("inclusive-or-expression", "exclusive-or-expression"),
    build(
        "inclusive-or-expression",
        "inclusive-or-expression | exclusive-or-expression",
        expr::binary,
    ),
    keep("logical-and-expression", "inclusive-or-expression"),
    build(
        "logical-and-expression",
        "logical-and-expression && inclusive-or-expression",
        expr::binary,
    ),
    keep("logical-xor-expression", "logical-and-expression"),
    build(
        "logical-xor-expression",
        "logical-xor-expression ^^ logical-and-expression",
        expr::binary,
    ),
    keep("logical-or-expression", "logical-xor-expression"),
    build(
        "logical-or-expression",
        "logical-or-expression || logical-xor-expression",
        expr::binary,
    ),
    keep("conditional-expression", "logical-or-expression"),
    build(
        "conditional-expression",
        "logical-or-expression ? expression : assignment-expression",
        expr::conditional,
    ),
    keep("assignment-expression", "conditional-expression"),
    build("assignment-expression", "unary-expression = assignment-expression", expr::assignment),
    build("assignment-expression", "unary-expression *= assignment-expression", expr::assignment),
    build("assignment-expression", "unary-expression /= assignment-expression", expr::assignment),
    build("assignment-expression", "unary-expression %= assignment-expression", expr::assignment),
    build("assignment-expression", "unary-expression += assignment-expression", expr::assignment),
    build("assignment-expression", "unary-expression -= assignment-expression", expr::assignment),
    build("assignment-expression", "unary-expression <<= assignment-expression", expr::assignment),
    build("assignment-expression", "unary-expression >>= assignment-expression", expr::assignment),
    build("assignment-expression", "unary-expression &= assignment-expression", expr::assignment),
    build("assignment-expression", "unary-expression ^= assignment-expression", expr::assignment),
    build("assignment-expression", "unary-expression |= assignment-expression", expr::assignment),
    keep("expression", "assignment-expression"),
    build("expression", "expression , assignment-expression", expr::sequence),
    keep("constant-expression", "conditional-expression"),
    // =========================================================================
    // DECLARATIONS
    // =========================================================================
    build("enhanced-declaration", "LEADING-ANNOTATION declaration", decl::annotated_leading),
    build("enhanced-declaration", "declaration TRAILING-ANNOTATION", decl::annotated_trailing),
    build(
        "enhanced-declaration",
        "LEADING-ANNOTATION declaration TRAILING-ANNOTATION",
        decl::annotated_both,
    ),
    build("declaration", "function-prototype ;", decl::prototype_declaration),
    build("declaration", "init-declarator-list ;", decl::variables_declaration),
    build(
        "declaration",
        "precision precision-qualifier type-specifier-no-prec ;",
        decl::precision_declaration,
    ),
    build(
        "declaration",
        "type-qualifier IDENTIFIER { struct-declaration-list } ;",
        decl::block_declaration,
    ),
    build(
        "declaration",
        "type-qualifier IDENTIFIER { struct-declaration-list } IDENTIFIER ;",
        decl::block_instance,
    ),
    build(
        "declaration",
        "type-qualifier IDENTIFIER { struct-declaration-list } IDENTIFIER [ ] ;",
        decl::block_instance_unsized,
    ),
    build(
        "declaration",
        "type-qualifier IDENTIFIER { struct-declaration-list } IDENTIFIER [ constant-expression ] ;",
        decl::block_instance_sized,
    ),
    build("declaration", "type-qualifier ;", decl::qualifier_declaration),
    build("function-prototype", "function-header )", decl::prototype_close),
    build("function-prototype", "function-header-with-parameters )", decl::prototype_close),
    build(
        "function-header-with-parameters",
        "function-header parameter-declaration",
        decl::prototype_first_parameter,
    ),
    build(
        "function-header-with-parameters",
        "function-header-with-parameters , parameter-declaration",
        decl::prototype_next_parameter,
    ),
    build("function-header", "fully-specified-type IDENTIFIER (", decl::function_header),
    build("parameter-declarator", "type-specifier IDENTIFIER", decl::parameter_declarator),
    build(
        "parameter-declarator",
        "type-specifier IDENTIFIER [ constant-expression ]",
        decl::parameter_declarator_array,
    ),
    build("parameter-declaration", "const parameter-declarator", decl::parameter_const),
    build(
        "parameter-declaration",
        "const parameter-qualifier parameter-declarator",
        decl::parameter_const_qualified,
    ),
    keep("parameter-declaration", "parameter-declarator"),
    build(
        "parameter-declaration",
        "parameter-qualifier parameter-declarator",
        decl::parameter_qualified,
    ),
    build("parameter-declaration", "const parameter-type-specifier", decl::parameter_const_type),
    build(
        "parameter-declaration",
        "const parameter-qualifier parameter-type-specifier",
        decl::parameter_const_qualified_type,
    ),
    build("parameter-declaration", "parameter-type-specifier", decl::parameter_type),
    build(
        "parameter-declaration",
        "parameter-qualifier parameter-type-specifier",
        decl::parameter_qualified_type,
    ),
    build("parameter-qualifier", "in", decl::parameter_qualifier),
    build("parameter-qualifier", "out", decl::parameter_qualifier),
    build("parameter-qualifier", "inout", decl::parameter_qualifier),
    keep("parameter-type-specifier", "type-specifier"),
    keep("init-declarator-list", "single-declaration"),
    build("init-declarator-list", "init-declarator-list , IDENTIFIER", decl::list_append_name),
    build(
        "init-declarator-list",
        "init-declarator-list , IDENTIFIER [ ]",
        decl::list_append_unsized,
    ),
    build(
        "init-declarator-list",
        "init-declarator-list , IDENTIFIER [ constant-expression ]",
        decl::list_append_sized,
    ),
    build(
        "init-declarator-list",
        "init-declarator-list , IDENTIFIER [ ] = initializer",
        decl::list_append_unsized_init,
    ),
    build(
        "init-declarator-list",
        "init-declarator-list , IDENTIFIER [ constant-expression ] = initializer",
        decl::list_append_sized_init,
    ),
    build(
        "init-declarator-list",
        "init-declarator-list , IDENTIFIER = initializer",
        decl::list_append_init,
    ),
    build("single-declaration", "fully-specified-type", decl::single_anonymous),
    build("single-declaration", "fully-specified-type IDENTIFIER", decl::single_name),
    build("single-declaration", "fully-specified-type IDENTIFIER [ ]", decl::single_unsized),
    build(
        "single-declaration",
        "fully-specified-type IDENTIFIER [ constant-expression ]",
        decl::single_sized,
    ),
    build(
        "single-declaration",
        "fully-specified-type IDENTIFIER [ ] = initializer",
        decl::single_unsized_init,
    ),
    build(
        "single-declaration",
        "fully-specified-type IDENTIFIER [ constant-expression ] = initializer",
        decl::single_sized_init,
    ),
    build("single-declaration", "fully-specified-type IDENTIFIER = initializer", decl::single_init),
    // =========================================================================
    // TYPES
    // =========================================================================
    build("fully-specified-type", "type-specifier", ty::fully_specified),
    build("fully-specified-type", "type-qualifier type-specifier", ty::fully_specified_qualified),
    build("interpolation-qualifier", "smooth", ty::interpolation_qualifier),
    build("interpolation-qualifier", "flat", ty::interpolation_qualifier),
    build("interpolation-qualifier", "noperspective", ty::interpolation_qualifier),
    build("layout-qualifier", "layout ( layout-qualifier-id-list )", ty::layout_qualifier),
    build("layout-qualifier-id-list", "IDENTIFIER", ty::layout_id_first),
    build("layout-qualifier-id-list", "IDENTIFIER = INTCONSTANT", ty::layout_value_first),
    build(
        "layout-qualifier-id-list",
        "layout-qualifier-id-list , IDENTIFIER",
        ty::layout_id_append,
    ),
    build(
        "layout-qualifier-id-list",
        "layout-qualifier-id-list , IDENTIFIER = INTCONSTANT",
        ty::layout_value_append,
    ),
    build("type-qualifier", "storage-qualifier", ty::qualifier_storage),
    build("type-qualifier", "layout-qualifier", ty::qualifier_layout),
    build("type-qualifier", "layout-qualifier storage-qualifier", ty::qualifier_layout_storage),
    build(
        "type-qualifier",
        "interpolation-qualifier storage-qualifier",
        ty::qualifier_interpolation_storage,
    ),
    build("type-qualifier", "interpolation-qualifier", ty::qualifier_interpolation),
    build("type-qualifier", "invariant storage-qualifier", ty::qualifier_invariant_storage),
    build(
        "type-qualifier",
        "invariant interpolation-qualifier storage-qualifier",
        ty::qualifier_invariant_interpolation_storage,
    ),
    build("type-qualifier", "invariant", ty::qualifier_invariant),
    build("storage-qualifier", "const", ty::storage_qualifier),
    build("storage-qualifier", "attribute", ty::storage_qualifier),
    build("storage-qualifier", "varying", ty::storage_qualifier),
    build("storage-qualifier", "centroid varying", ty::centroid_storage_qualifier),
    build("storage-qualifier", "in", ty::storage_qualifier),
    build("storage-qualifier", "out", ty::storage_qualifier),
    build("storage-qualifier", "centroid in", ty::centroid_storage_qualifier),
    build("storage-qualifier", "centroid out", ty::centroid_storage_qualifier),
    build("storage-qualifier", "uniform", ty::storage_qualifier),
    keep("type-specifier", "type-specifier-no-prec"),
    build("type-specifier", "precision-qualifier type-specifier-no-prec", ty::with_precision),
    build("precision-qualifier", "highp", ty::precision_qualifier),
    build("precision-qualifier", "mediump", ty::precision_qualifier),
    build("precision-qualifier", "lowp", ty::precision_qualifier),
    build("type-specifier-no-prec", "type-specifier-nonarray", ty::type_specifier),
    build("type-specifier-no-prec", "type-specifier-nonarray [ ]", ty::type_specifier_unsized),
    build(
        "type-specifier-no-prec",
        "type-specifier-nonarray [ constant-expression ]",
        ty::type_specifier_sized,
    ),
    build("type-specifier-nonarray", "void", ty::void_type),
    build("type-specifier-nonarray", "NATIVE-TYPE", ty::native_type),
    build("type-specifier-nonarray", "struct-specifier", ty::struct_type),
    build("type-specifier-nonarray", "TYPE-NAME", ty::type_name),
    build(
        "struct-specifier",
        "struct IDENTIFIER { struct-declaration-list }",
        ty::struct_named,
    ),
    build("struct-specifier", "struct { struct-declaration-list }", ty::struct_anonymous),
    build("struct-declaration-list", "struct-declaration", ty::struct_members_first),
    build(
        "struct-declaration-list",
        "struct-declaration-list struct-declaration",
        ty::struct_members_append,
    ),
    build("struct-declaration", "type-specifier struct-declarator-list ;", ty::struct_member),
    build(
        "struct-declaration",
        "type-qualifier type-specifier struct-declarator-list ;",
        ty::struct_member_qualified,
    ),
    build("struct-declarator-list", "struct-declarator", ty::struct_declarators_first),
    build(
        "struct-declarator-list",
        "struct-declarator-list , struct-declarator",
        ty::struct_declarators_append,
    ),
    build("struct-declarator", "IDENTIFIER", ty::struct_declarator),
    build("struct-declarator", "IDENTIFIER [ ]", ty::struct_declarator_unsized),
    build(
        "struct-declarator",
        "IDENTIFIER [ constant-expression ]",
        ty::struct_declarator_sized,
    ),
    keep("initializer", "assignment-expression"),
];
