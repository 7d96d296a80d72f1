//! Type and qualifier productions

use super::{Built, GlslBody, Suffix, array_suffix, unexpected};
use crate::parser::ast::{
    FullySpecifiedType, Interpolation, InterpolationQualifier, LayoutId, LayoutQualifier, Node,
    Precision, PrecisionQualifier, Storage, StorageQualifier, StructDeclaration, StructDeclarator,
    StructSpecifier, TypeQualifier, TypeSpecifier, TypeSpecifierNonArray,
};
use crate::parser::errors::ReductionError;
use crate::parser::terminals::Terminal;

// ============================================================================
// FULLY SPECIFIED TYPES
// ============================================================================

/// `type-specifier`
pub(crate) fn fully_specified(body: &mut GlslBody) -> Built {
    Ok(FullySpecifiedType {
        qualifier: None,
        specifier: body.node(0)?,
    }
    .into())
}

/// `type-qualifier type-specifier`
pub(crate) fn fully_specified_qualified(body: &mut GlslBody) -> Built {
    let qualifier: TypeQualifier = body.node(0)?;
    Ok(FullySpecifiedType {
        qualifier: Some(qualifier),
        specifier: body.node(1)?,
    }
    .into())
}

// ============================================================================
// QUALIFIERS
// ============================================================================

/// `smooth`, `flat` and `noperspective`
pub(crate) fn interpolation_qualifier(body: &mut GlslBody) -> Built {
    let token = body.token(0)?;
    let kind = match token.terminal {
        Terminal::Smooth => Interpolation::Smooth,
        Terminal::Flat => Interpolation::Flat,
        Terminal::NoPerspective => Interpolation::NoPerspective,
        _ => return Err(unexpected(body, 0, "interpolation keyword", &token)),
    };
    Ok(InterpolationQualifier { kind, token }.into())
}

/// `layout ( layout-qualifier-id-list )`
pub(crate) fn layout_qualifier(body: &mut GlslBody) -> Built {
    let ids: Vec<LayoutId> = body.node(2)?;
    Ok(LayoutQualifier { ids }.into())
}

/// `IDENTIFIER`
pub(crate) fn layout_id_first(body: &mut GlslBody) -> Built {
    let name = body.token(0)?;
    Ok(Node::LayoutIds(vec![LayoutId { name, value: None }]))
}

/// `IDENTIFIER = INTCONSTANT`
pub(crate) fn layout_value_first(body: &mut GlslBody) -> Built {
    let name = body.token(0)?;
    let value = body.token(2)?;
    Ok(Node::LayoutIds(vec![LayoutId {
        name,
        value: Some(value),
    }]))
}

/// `layout-qualifier-id-list , IDENTIFIER`
pub(crate) fn layout_id_append(body: &mut GlslBody) -> Built {
    let mut ids: Vec<LayoutId> = body.node(0)?;
    ids.push(LayoutId {
        name: body.token(2)?,
        value: None,
    });
    Ok(Node::LayoutIds(ids))
}

/// `layout-qualifier-id-list , IDENTIFIER = INTCONSTANT`
pub(crate) fn layout_value_append(body: &mut GlslBody) -> Built {
    let mut ids: Vec<LayoutId> = body.node(0)?;
    let name = body.token(2)?;
    let value = body.token(4)?;
    ids.push(LayoutId {
        name,
        value: Some(value),
    });
    Ok(Node::LayoutIds(ids))
}

/// `storage-qualifier`
pub(crate) fn qualifier_storage(body: &mut GlslBody) -> Built {
    Ok(TypeQualifier {
        storage: Some(body.node(0)?),
        ..TypeQualifier::default()
    }
    .into())
}

/// `layout-qualifier`
pub(crate) fn qualifier_layout(body: &mut GlslBody) -> Built {
    Ok(TypeQualifier {
        layout: Some(body.node(0)?),
        ..TypeQualifier::default()
    }
    .into())
}

/// `layout-qualifier storage-qualifier`
pub(crate) fn qualifier_layout_storage(body: &mut GlslBody) -> Built {
    let layout: LayoutQualifier = body.node(0)?;
    Ok(TypeQualifier {
        layout: Some(layout),
        storage: Some(body.node(1)?),
        ..TypeQualifier::default()
    }
    .into())
}

/// `interpolation-qualifier storage-qualifier`
pub(crate) fn qualifier_interpolation_storage(body: &mut GlslBody) -> Built {
    let interpolation: InterpolationQualifier = body.node(0)?;
    Ok(TypeQualifier {
        interpolation: Some(interpolation),
        storage: Some(body.node(1)?),
        ..TypeQualifier::default()
    }
    .into())
}

/// `interpolation-qualifier`
pub(crate) fn qualifier_interpolation(body: &mut GlslBody) -> Built {
    Ok(TypeQualifier {
        interpolation: Some(body.node(0)?),
        ..TypeQualifier::default()
    }
    .into())
}

/// `invariant storage-qualifier`
pub(crate) fn qualifier_invariant_storage(body: &mut GlslBody) -> Built {
    let invariant = body.token(0)?;
    Ok(TypeQualifier {
        invariant: Some(invariant),
        storage: Some(body.node(1)?),
        ..TypeQualifier::default()
    }
    .into())
}

/// `invariant interpolation-qualifier storage-qualifier`
pub(crate) fn qualifier_invariant_interpolation_storage(body: &mut GlslBody) -> Built {
    let invariant = body.token(0)?;
    let interpolation: InterpolationQualifier = body.node(1)?;
    Ok(TypeQualifier {
        invariant: Some(invariant),
        interpolation: Some(interpolation),
        storage: Some(body.node(2)?),
        ..TypeQualifier::default()
    }
    .into())
}

/// `invariant`
pub(crate) fn qualifier_invariant(body: &mut GlslBody) -> Built {
    Ok(TypeQualifier {
        invariant: Some(body.token(0)?),
        ..TypeQualifier::default()
    }
    .into())
}

/// Single storage keyword
pub(crate) fn storage_qualifier(body: &mut GlslBody) -> Built {
    let token = body.token(0)?;
    match Storage::from_terminal(token.terminal) {
        Some(kind) => Ok(StorageQualifier {
            kind,
            centroid: None,
            token,
        }
        .into()),
        None => Err(unexpected(body, 0, "storage keyword", &token)),
    }
}

/// `centroid varying`, `centroid in` and `centroid out`
pub(crate) fn centroid_storage_qualifier(body: &mut GlslBody) -> Built {
    let centroid = body.token(0)?;
    let token = body.token(1)?;
    match Storage::from_terminal(token.terminal).and_then(Storage::centroid) {
        Some(kind) => Ok(StorageQualifier {
            kind,
            centroid: Some(centroid),
            token,
        }
        .into()),
        None => Err(unexpected(body, 1, "centroid storage keyword", &token)),
    }
}

/// `highp`, `mediump` and `lowp`
pub(crate) fn precision_qualifier(body: &mut GlslBody) -> Built {
    let token = body.token(0)?;
    let kind = match token.terminal {
        Terminal::HighP => Precision::High,
        Terminal::MediumP => Precision::Medium,
        Terminal::LowP => Precision::Low,
        _ => return Err(unexpected(body, 0, "precision keyword", &token)),
    };
    Ok(PrecisionQualifier { kind, token }.into())
}

// ============================================================================
// TYPE SPECIFIERS
// ============================================================================

/// `precision-qualifier type-specifier-no-prec`
pub(crate) fn with_precision(body: &mut GlslBody) -> Built {
    let precision: PrecisionQualifier = body.node(0)?;
    let mut specifier: TypeSpecifier = body.node(1)?;
    specifier.precision = Some(precision);
    Ok(specifier.into())
}

fn specifier(body: &mut GlslBody, suffix: Suffix) -> Built {
    let ty: TypeSpecifierNonArray = body.node(0)?;
    let array = array_suffix(body, suffix)?;
    Ok(TypeSpecifier {
        precision: None,
        ty,
        array,
    }
    .into())
}

/// `type-specifier-nonarray`
pub(crate) fn type_specifier(body: &mut GlslBody) -> Built {
    specifier(body, Suffix::None)
}

/// `type-specifier-nonarray [ ]`
pub(crate) fn type_specifier_unsized(body: &mut GlslBody) -> Built {
    specifier(body, Suffix::Unsized)
}

/// `type-specifier-nonarray [ constant-expression ]`
pub(crate) fn type_specifier_sized(body: &mut GlslBody) -> Built {
    specifier(body, Suffix::Sized(2))
}

/// `void`
pub(crate) fn void_type(body: &mut GlslBody) -> Built {
    Ok(TypeSpecifierNonArray::Void(body.token(0)?).into())
}

/// `NATIVE-TYPE`; the token still carries the concrete type keyword.
pub(crate) fn native_type(body: &mut GlslBody) -> Built {
    let token = body.token(0)?;
    if !token.terminal.is_native_type() {
        return Err(unexpected(body, 0, "native type", &token));
    }
    Ok(TypeSpecifierNonArray::Native(token).into())
}

/// `struct-specifier`
pub(crate) fn struct_type(body: &mut GlslBody) -> Built {
    let specifier: StructSpecifier = body.node(0)?;
    Ok(TypeSpecifierNonArray::Struct(specifier).into())
}

/// `TYPE-NAME`
pub(crate) fn type_name(body: &mut GlslBody) -> Built {
    Ok(TypeSpecifierNonArray::TypeName(body.token(0)?).into())
}

// ============================================================================
// STRUCTS
// ============================================================================

/// `struct IDENTIFIER { struct-declaration-list }`
pub(crate) fn struct_named(body: &mut GlslBody) -> Built {
    let name = body.token(1)?;
    let members: Vec<StructDeclaration> = body.node(3)?;
    Ok(StructSpecifier {
        name: Some(name),
        members,
    }
    .into())
}

/// `struct { struct-declaration-list }`
pub(crate) fn struct_anonymous(body: &mut GlslBody) -> Built {
    let members: Vec<StructDeclaration> = body.node(2)?;
    Ok(StructSpecifier {
        name: None,
        members,
    }
    .into())
}

/// `struct-declaration`
pub(crate) fn struct_members_first(body: &mut GlslBody) -> Built {
    let member: StructDeclaration = body.node(0)?;
    Ok(Node::StructDeclarations(vec![member]))
}

/// `struct-declaration-list struct-declaration`
pub(crate) fn struct_members_append(body: &mut GlslBody) -> Built {
    let mut members: Vec<StructDeclaration> = body.node(0)?;
    members.push(body.node(1)?);
    Ok(Node::StructDeclarations(members))
}

/// `type-specifier struct-declarator-list ;`
pub(crate) fn struct_member(body: &mut GlslBody) -> Built {
    let ty: TypeSpecifier = body.node(0)?;
    let declarators: Vec<StructDeclarator> = body.node(1)?;
    Ok(StructDeclaration {
        qualifier: None,
        ty,
        declarators,
    }
    .into())
}

/// `type-qualifier type-specifier struct-declarator-list ;`
pub(crate) fn struct_member_qualified(body: &mut GlslBody) -> Built {
    let qualifier: TypeQualifier = body.node(0)?;
    let ty: TypeSpecifier = body.node(1)?;
    let declarators: Vec<StructDeclarator> = body.node(2)?;
    Ok(StructDeclaration {
        qualifier: Some(qualifier),
        ty,
        declarators,
    }
    .into())
}

/// `struct-declarator`
pub(crate) fn struct_declarators_first(body: &mut GlslBody) -> Built {
    let declarator: StructDeclarator = body.node(0)?;
    Ok(Node::StructDeclarators(vec![declarator]))
}

/// `struct-declarator-list , struct-declarator`
pub(crate) fn struct_declarators_append(body: &mut GlslBody) -> Built {
    let mut declarators: Vec<StructDeclarator> = body.node(0)?;
    declarators.push(body.node(2)?);
    Ok(Node::StructDeclarators(declarators))
}

fn declarator(body: &mut GlslBody, suffix: Suffix) -> Result<StructDeclarator, ReductionError> {
    let name = body.token(0)?;
    let array = array_suffix(body, suffix)?;
    Ok(StructDeclarator { name, array })
}

/// `IDENTIFIER`
pub(crate) fn struct_declarator(body: &mut GlslBody) -> Built {
    Ok(declarator(body, Suffix::None)?.into())
}

/// `IDENTIFIER [ ]`
pub(crate) fn struct_declarator_unsized(body: &mut GlslBody) -> Built {
    Ok(declarator(body, Suffix::Unsized)?.into())
}

/// `IDENTIFIER [ constant-expression ]`
pub(crate) fn struct_declarator_sized(body: &mut GlslBody) -> Built {
    Ok(declarator(body, Suffix::Sized(2))?.into())
}
