//! The externally visible variables of a shader

use smol_str::SmolStr;

use crate::annotations::{AnnotationTag, parse_annotation};
use crate::parser::ast::{
    Declaration, DeclarationKind, FullySpecifiedType, Interpolation, Precision, Storage,
    TranslationUnit, TypeQualifier, TypeSpecifier, TypeSpecifierNonArray,
};
use crate::parser::terminals::{BaseType, Terminal};

/// A global variable or interface block member
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceVariable {
    pub name: SmolStr,
    /// Name of the enclosing interface block
    pub block: Option<SmolStr>,
    pub storage: Option<Storage>,
    pub interpolation: Option<Interpolation>,
    pub precision: Option<Precision>,
    pub invariant: bool,
    /// Spelled type: keyword, type name or struct name
    pub type_name: Option<SmolStr>,
    /// Concrete keyword of a native type
    pub native: Option<Terminal>,
    pub base_type: Option<BaseType>,
    pub element_count: u32,
    pub is_array: bool,
    /// Tags of the leading and trailing annotations, leading first
    pub annotations: Vec<AnnotationTag>,
    /// Annotation texts as written, including those that are not tag lists
    pub raw_annotations: Vec<SmolStr>,
}

impl InterfaceVariable {
    fn new(
        name: &str,
        qualifier: Option<&TypeQualifier>,
        specifier: &TypeSpecifier,
        is_array: bool,
        declaration: &Declaration,
    ) -> Self {
        let native = specifier.ty.native();
        let base_type = match &specifier.ty {
            TypeSpecifierNonArray::Void(_) => Some(BaseType::Void),
            TypeSpecifierNonArray::Native(token) => token.terminal.base_type(),
            TypeSpecifierNonArray::Struct(_) | TypeSpecifierNonArray::TypeName(_) => {
                Some(BaseType::Struct)
            }
        };
        let raw_annotations: Vec<SmolStr> = declaration.annotations().map(SmolStr::new).collect();
        let annotations = raw_annotations
            .iter()
            .flat_map(|text| match parse_annotation(text) {
                Ok(tags) => tags,
                Err(error) => {
                    tracing::debug!(annotation = %text, %error, "annotation is not a tag list");
                    Vec::new()
                }
            })
            .collect();

        Self {
            name: SmolStr::new(name),
            block: None,
            storage: qualifier.and_then(|q| q.storage.as_ref()).map(|s| s.kind),
            interpolation: qualifier
                .and_then(|q| q.interpolation.as_ref())
                .map(|i| i.kind),
            precision: specifier.precision.as_ref().map(|p| p.kind),
            invariant: qualifier.is_some_and(|q| q.invariant.is_some()),
            type_name: specifier.ty.name().map(SmolStr::new),
            native,
            base_type,
            element_count: native.map_or(0, Terminal::element_count),
            is_array: is_array || specifier.array.is_some(),
            annotations,
            raw_annotations,
        }
    }

    pub fn is_uniform(&self) -> bool {
        self.storage == Some(Storage::Uniform)
    }

    /// Find a tag of this variable's annotations by name.
    pub fn tag(&self, name: &str) -> Option<&AnnotationTag> {
        crate::annotations::find_tag(&self.annotations, name)
    }
}

/// Global variables of a translation unit in declaration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShaderInterface {
    pub variables: Vec<InterfaceVariable>,
}

impl ShaderInterface {
    pub fn collect(unit: &TranslationUnit) -> Self {
        let mut variables = Vec::new();
        for declaration in unit.globals() {
            match &declaration.kind {
                DeclarationKind::Variables(list) => {
                    let FullySpecifiedType {
                        qualifier,
                        specifier,
                    } = &list.ty;
                    variables.extend(list.variables.iter().filter(|v| !v.is_anonymous()).map(
                        |variable| {
                            InterfaceVariable::new(
                                variable.name(),
                                qualifier.as_ref(),
                                specifier,
                                variable.array.is_some(),
                                declaration,
                            )
                        },
                    ));
                }
                DeclarationKind::Block(block) => {
                    let block_name = block.name.text().map(SmolStr::new);
                    for member in &block.members {
                        let qualifier = member.qualifier.as_ref().unwrap_or(&block.qualifier);
                        for declarator in &member.declarators {
                            let mut variable = InterfaceVariable::new(
                                declarator.name.text().unwrap_or_default(),
                                Some(qualifier),
                                &member.ty,
                                declarator.array.is_some(),
                                declaration,
                            );
                            if variable.storage.is_none() {
                                variable.storage =
                                    block.qualifier.storage.as_ref().map(|s| s.kind);
                            }
                            variable.block = block_name.clone();
                            variables.push(variable);
                        }
                    }
                }
                DeclarationKind::Prototype(_)
                | DeclarationKind::Precision { .. }
                | DeclarationKind::Qualifier { .. } => {}
            }
        }
        Self { variables }
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&InterfaceVariable> {
        self.variables.iter().find(|v| v.name.as_str() == name)
    }

    pub fn uniforms(&self) -> impl Iterator<Item = &InterfaceVariable> {
        self.variables.iter().filter(|v| v.is_uniform())
    }

    pub fn inputs(&self) -> impl Iterator<Item = &InterfaceVariable> {
        self.variables
            .iter()
            .filter(|v| v.storage.is_some_and(Storage::is_input))
    }

    pub fn outputs(&self) -> impl Iterator<Item = &InterfaceVariable> {
        self.variables
            .iter()
            .filter(|v| v.storage.is_some_and(Storage::is_output))
    }
}
