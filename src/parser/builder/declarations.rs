//! Translation unit, function and declaration productions

use super::{Built, GlslBody, Suffix, array_suffix, unexpected};
use crate::parser::ast::{
    BlockInstance, CompoundStatement, Declaration, DeclarationKind, DeclarationList, Expr,
    ExternalDeclaration, FullySpecifiedType, FunctionDefinition, FunctionPrototype,
    InterfaceBlock, ParameterDeclaration, ParameterQualifier, PrecisionQualifier,
    StructDeclaration, TranslationUnit, TypeQualifier, TypeSpecifier, VariableDeclarator,
};
use crate::parser::errors::ReductionError;
use crate::parser::token::Token;

// ============================================================================
// TRANSLATION UNIT
// ============================================================================

/// `external-declaration`
pub(crate) fn translation_unit_first(body: &mut GlslBody) -> Built {
    let declaration: ExternalDeclaration = body.node(0)?;
    Ok(TranslationUnit {
        declarations: vec![declaration],
        directives: Vec::new(),
    }
    .into())
}

/// `translation-unit external-declaration`
pub(crate) fn translation_unit_append(body: &mut GlslBody) -> Built {
    let mut unit: TranslationUnit = body.node(0)?;
    unit.declarations.push(body.node(1)?);
    Ok(unit.into())
}

/// `function-definition`
pub(crate) fn external_function(body: &mut GlslBody) -> Built {
    let function: FunctionDefinition = body.node(0)?;
    Ok(ExternalDeclaration::Function(function).into())
}

/// `declaration` and `enhanced-declaration`
pub(crate) fn external_declaration(body: &mut GlslBody) -> Built {
    let declaration: Declaration = body.node(0)?;
    Ok(ExternalDeclaration::Declaration(declaration).into())
}

/// `function-prototype compound-statement-no-new-scope`
pub(crate) fn function_definition(body: &mut GlslBody) -> Built {
    let prototype: FunctionPrototype = body.node(0)?;
    let compound: CompoundStatement = body.node(1)?;
    Ok(FunctionDefinition {
        prototype,
        body: compound,
    }
    .into())
}

// ============================================================================
// ANNOTATED DECLARATIONS
// ============================================================================

/// `LEADING-ANNOTATION declaration`
pub(crate) fn annotated_leading(body: &mut GlslBody) -> Built {
    let annotation = body.token(0)?;
    let mut declaration: Declaration = body.node(1)?;
    declaration.leading_annotation = Some(annotation);
    Ok(declaration.into())
}

/// `declaration TRAILING-ANNOTATION`
pub(crate) fn annotated_trailing(body: &mut GlslBody) -> Built {
    let mut declaration: Declaration = body.node(0)?;
    declaration.trailing_annotation = Some(body.token(1)?);
    Ok(declaration.into())
}

/// `LEADING-ANNOTATION declaration TRAILING-ANNOTATION`
pub(crate) fn annotated_both(body: &mut GlslBody) -> Built {
    let leading = body.token(0)?;
    let mut declaration: Declaration = body.node(1)?;
    declaration.leading_annotation = Some(leading);
    declaration.trailing_annotation = Some(body.token(2)?);
    Ok(declaration.into())
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// `function-prototype ;`
pub(crate) fn prototype_declaration(body: &mut GlslBody) -> Built {
    let prototype: FunctionPrototype = body.node(0)?;
    Ok(Declaration::new(DeclarationKind::Prototype(prototype)).into())
}

/// `init-declarator-list ;`
pub(crate) fn variables_declaration(body: &mut GlslBody) -> Built {
    let list: DeclarationList = body.node(0)?;
    Ok(Declaration::new(DeclarationKind::Variables(list)).into())
}

/// `precision precision-qualifier type-specifier-no-prec ;`
pub(crate) fn precision_declaration(body: &mut GlslBody) -> Built {
    let precision: PrecisionQualifier = body.node(1)?;
    let ty: TypeSpecifier = body.node(2)?;
    Ok(Declaration::new(DeclarationKind::Precision { precision, ty }).into())
}

/// `type-qualifier IDENTIFIER { struct-declaration-list }` followed by an
/// optional instance, whose shape `instance` describes
fn block(body: &mut GlslBody, instance: Option<Suffix>) -> Built {
    let qualifier: TypeQualifier = body.node(0)?;
    let name = body.token(1)?;
    let members: Vec<StructDeclaration> = body.node(3)?;
    let instance = match instance {
        Some(suffix) => {
            let name = body.token(5)?;
            let array = array_suffix(body, suffix)?;
            Some(BlockInstance { name, array })
        }
        None => None,
    };
    Ok(Declaration::new(DeclarationKind::Block(InterfaceBlock {
        qualifier,
        name,
        members,
        instance,
    }))
    .into())
}

/// `... } ;`
pub(crate) fn block_declaration(body: &mut GlslBody) -> Built {
    block(body, None)
}

/// `... } IDENTIFIER ;`
pub(crate) fn block_instance(body: &mut GlslBody) -> Built {
    block(body, Some(Suffix::None))
}

/// `... } IDENTIFIER [ ] ;`
pub(crate) fn block_instance_unsized(body: &mut GlslBody) -> Built {
    block(body, Some(Suffix::Unsized))
}

/// `... } IDENTIFIER [ constant-expression ] ;`
pub(crate) fn block_instance_sized(body: &mut GlslBody) -> Built {
    block(body, Some(Suffix::Sized(7)))
}

/// `type-qualifier ;`
///
/// Gets an anonymous identifier placed where the name would be.
pub(crate) fn qualifier_declaration(body: &mut GlslBody) -> Built {
    let qualifier: TypeQualifier = body.node(0)?;
    let name = Token::anonymous_identifier(body.anchor());
    Ok(Declaration::new(DeclarationKind::Qualifier { qualifier, name }).into())
}

// ============================================================================
// FUNCTION PROTOTYPES
// ============================================================================

/// `function-header )` and `function-header-with-parameters )`
pub(crate) fn prototype_close(body: &mut GlslBody) -> Built {
    let prototype: FunctionPrototype = body.node(0)?;
    Ok(prototype.into())
}

/// `function-header parameter-declaration`
pub(crate) fn prototype_first_parameter(body: &mut GlslBody) -> Built {
    let mut prototype: FunctionPrototype = body.node(0)?;
    prototype.parameters.push(body.node(1)?);
    Ok(prototype.into())
}

/// `function-header-with-parameters , parameter-declaration`
pub(crate) fn prototype_next_parameter(body: &mut GlslBody) -> Built {
    let mut prototype: FunctionPrototype = body.node(0)?;
    prototype.parameters.push(body.node(2)?);
    Ok(prototype.into())
}

/// `fully-specified-type IDENTIFIER (`
pub(crate) fn function_header(body: &mut GlslBody) -> Built {
    let return_type: FullySpecifiedType = body.node(0)?;
    let name = body.token(1)?;
    Ok(FunctionPrototype {
        return_type,
        name,
        parameters: Vec::new(),
    }
    .into())
}

// ============================================================================
// PARAMETERS
// ============================================================================

/// `type-specifier IDENTIFIER`
pub(crate) fn parameter_declarator(body: &mut GlslBody) -> Built {
    let ty: TypeSpecifier = body.node(0)?;
    let name = body.token(1)?;
    Ok(ParameterDeclaration {
        constant: None,
        qualifier: None,
        ty,
        name: Some(name),
        array: None,
    }
    .into())
}

/// `type-specifier IDENTIFIER [ constant-expression ]`
pub(crate) fn parameter_declarator_array(body: &mut GlslBody) -> Built {
    let ty: TypeSpecifier = body.node(0)?;
    let name = body.token(1)?;
    let array = array_suffix(body, Suffix::Sized(3))?;
    Ok(ParameterDeclaration {
        constant: None,
        qualifier: None,
        ty,
        name: Some(name),
        array,
    }
    .into())
}

/// `in`, `out` and `inout`
pub(crate) fn parameter_qualifier(body: &mut GlslBody) -> Built {
    let token = body.token(0)?;
    match ParameterQualifier::from_token(token.clone()) {
        Some(qualifier) => Ok(qualifier.into()),
        None => Err(unexpected(body, 0, "parameter qualifier", &token)),
    }
}

/// What follows the optional `const` and qualifier of a parameter
#[derive(Debug, Clone, Copy)]
enum Parameter {
    /// `parameter-declarator` at the given position
    Declarator(usize),
    /// `parameter-type-specifier` at the given position
    Type(usize),
}

fn parameter(
    body: &mut GlslBody,
    constant: bool,
    qualified: bool,
    rest: Parameter,
) -> Result<ParameterDeclaration, ReductionError> {
    let constant = if constant { Some(body.token(0)?) } else { None };
    let qualifier: Option<ParameterQualifier> = if qualified {
        Some(body.node(usize::from(constant.is_some()))?)
    } else {
        None
    };
    let mut declaration = match rest {
        Parameter::Declarator(position) => body.node::<ParameterDeclaration>(position)?,
        Parameter::Type(position) => ParameterDeclaration {
            constant: None,
            qualifier: None,
            ty: body.node(position)?,
            name: None,
            array: None,
        },
    };
    declaration.constant = constant;
    declaration.qualifier = qualifier;
    Ok(declaration)
}

/// `const parameter-declarator`
pub(crate) fn parameter_const(body: &mut GlslBody) -> Built {
    Ok(parameter(body, true, false, Parameter::Declarator(1))?.into())
}

/// `const parameter-qualifier parameter-declarator`
pub(crate) fn parameter_const_qualified(body: &mut GlslBody) -> Built {
    Ok(parameter(body, true, true, Parameter::Declarator(2))?.into())
}

/// `parameter-qualifier parameter-declarator`
pub(crate) fn parameter_qualified(body: &mut GlslBody) -> Built {
    Ok(parameter(body, false, true, Parameter::Declarator(1))?.into())
}

/// `const parameter-type-specifier`
pub(crate) fn parameter_const_type(body: &mut GlslBody) -> Built {
    Ok(parameter(body, true, false, Parameter::Type(1))?.into())
}

/// `const parameter-qualifier parameter-type-specifier`
pub(crate) fn parameter_const_qualified_type(body: &mut GlslBody) -> Built {
    Ok(parameter(body, true, true, Parameter::Type(2))?.into())
}

/// `parameter-type-specifier`
pub(crate) fn parameter_type(body: &mut GlslBody) -> Built {
    Ok(parameter(body, false, false, Parameter::Type(0))?.into())
}

/// `parameter-qualifier parameter-type-specifier`
pub(crate) fn parameter_qualified_type(body: &mut GlslBody) -> Built {
    Ok(parameter(body, false, true, Parameter::Type(1))?.into())
}

// ============================================================================
// VARIABLE DECLARATORS
// ============================================================================

/// Positions of the parts of one declarator
#[derive(Debug, Clone, Copy)]
struct Declarator {
    name: usize,
    suffix: Suffix,
    initializer: Option<usize>,
}

impl Declarator {
    const fn new(name: usize, suffix: Suffix, initializer: Option<usize>) -> Self {
        Self {
            name,
            suffix,
            initializer,
        }
    }
}

fn variable(body: &mut GlslBody, shape: Declarator) -> Result<VariableDeclarator, ReductionError> {
    let name = body.token(shape.name)?;
    let array = array_suffix(body, shape.suffix)?;
    let initializer = match shape.initializer {
        Some(position) => Some(body.node::<Expr>(position)?),
        None => None,
    };
    Ok(VariableDeclarator {
        name,
        array,
        initializer,
    })
}

/// `init-declarator-list , ...`
fn list_append(body: &mut GlslBody, shape: Declarator) -> Built {
    let mut list: DeclarationList = body.node(0)?;
    list.variables.push(variable(body, shape)?);
    Ok(list.into())
}

/// `fully-specified-type ...`
fn single(body: &mut GlslBody, shape: Declarator) -> Built {
    let ty: FullySpecifiedType = body.node(0)?;
    let variable = variable(body, shape)?;
    Ok(DeclarationList {
        ty,
        variables: vec![variable],
    }
    .into())
}

/// `init-declarator-list , IDENTIFIER`
pub(crate) fn list_append_name(body: &mut GlslBody) -> Built {
    list_append(body, Declarator::new(2, Suffix::None, None))
}

/// `init-declarator-list , IDENTIFIER [ ]`
pub(crate) fn list_append_unsized(body: &mut GlslBody) -> Built {
    list_append(body, Declarator::new(2, Suffix::Unsized, None))
}

/// `init-declarator-list , IDENTIFIER [ constant-expression ]`
pub(crate) fn list_append_sized(body: &mut GlslBody) -> Built {
    list_append(body, Declarator::new(2, Suffix::Sized(4), None))
}

/// `init-declarator-list , IDENTIFIER [ ] = initializer`
pub(crate) fn list_append_unsized_init(body: &mut GlslBody) -> Built {
    list_append(body, Declarator::new(2, Suffix::Unsized, Some(6)))
}

/// `init-declarator-list , IDENTIFIER [ constant-expression ] = initializer`
pub(crate) fn list_append_sized_init(body: &mut GlslBody) -> Built {
    list_append(body, Declarator::new(2, Suffix::Sized(4), Some(7)))
}

/// `init-declarator-list , IDENTIFIER = initializer`
pub(crate) fn list_append_init(body: &mut GlslBody) -> Built {
    list_append(body, Declarator::new(2, Suffix::None, Some(4)))
}

/// `fully-specified-type`
///
/// Declares a type only, e.g. `struct S { float f; };`. The variable is
/// anonymous and placed at the end of the type.
pub(crate) fn single_anonymous(body: &mut GlslBody) -> Built {
    let ty: FullySpecifiedType = body.node(0)?;
    let name = Token::anonymous_identifier(body.anchor());
    Ok(DeclarationList {
        ty,
        variables: vec![VariableDeclarator {
            name,
            array: None,
            initializer: None,
        }],
    }
    .into())
}

/// `fully-specified-type IDENTIFIER`
pub(crate) fn single_name(body: &mut GlslBody) -> Built {
    single(body, Declarator::new(1, Suffix::None, None))
}

/// `fully-specified-type IDENTIFIER [ ]`
pub(crate) fn single_unsized(body: &mut GlslBody) -> Built {
    single(body, Declarator::new(1, Suffix::Unsized, None))
}

/// `fully-specified-type IDENTIFIER [ constant-expression ]`
pub(crate) fn single_sized(body: &mut GlslBody) -> Built {
    single(body, Declarator::new(1, Suffix::Sized(3), None))
}

/// `fully-specified-type IDENTIFIER [ ] = initializer`
pub(crate) fn single_unsized_init(body: &mut GlslBody) -> Built {
    single(body, Declarator::new(1, Suffix::Unsized, Some(5)))
}

/// `fully-specified-type IDENTIFIER [ constant-expression ] = initializer`
pub(crate) fn single_sized_init(body: &mut GlslBody) -> Built {
    single(body, Declarator::new(1, Suffix::Sized(3), Some(6)))
}

/// `fully-specified-type IDENTIFIER = initializer`
pub(crate) fn single_init(body: &mut GlslBody) -> Built {
    single(body, Declarator::new(1, Suffix::None, Some(3)))
}
