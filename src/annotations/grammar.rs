//! Annotation grammar, its semantic actions and tables

use std::sync::LazyLock;

use smol_str::SmolStr;

use super::{AnnotationTag, AnnotationTerminal, AnnotationValue};
use crate::parser::errors::{GrammarError, ParseError, ReductionError, ReductionErrorKind};
use crate::parser::lr::{
    Body, Extract, ParseTables, Parser, Rule, SymbolNode, TerminalKind, build, keep,
};
use crate::parser::token::{Token, TokenSource, TokenValue};

/// Stack payload of the annotation parser
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AnnotationNode {
    Tags(Vec<AnnotationTag>),
    Tag(AnnotationTag),
    Names(Vec<SmolStr>),
    Values(Vec<AnnotationValue>),
}

impl SymbolNode for AnnotationNode {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Tags(_) => "tag-list",
            Self::Tag(_) => "tag",
            Self::Names(_) => "tag-assignment",
            Self::Values(_) => "value-list",
        }
    }
}

macro_rules! extract {
    ($($variant:ident($payload:ty) => $name:literal,)*) => {
        $(
            impl Extract<AnnotationNode> for $payload {
                const EXPECTED: &'static str = $name;

                fn extract(node: AnnotationNode) -> Result<Self, AnnotationNode> {
                    match node {
                        AnnotationNode::$variant(payload) => Ok(payload),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

extract! {
    Tags(Vec<AnnotationTag>) => "tag-list",
    Tag(AnnotationTag) => "tag",
    Names(Vec<SmolStr>) => "tag-assignment",
    Values(Vec<AnnotationValue>) => "value-list",
}

type AnnotationBody = Body<AnnotationTerminal, AnnotationNode>;
type Built = Result<AnnotationNode, ReductionError>;

pub(crate) static RULES: &[Rule<AnnotationTerminal, AnnotationNode>] = &[
    keep("$START$", "annotation"),
    keep("annotation", "tag-list"),
    build("tag-list", "tag", tag_list_first),
    build("tag-list", "tag-list tag", tag_list_append),
    build("tag-list", "tag-list , tag", tag_list_append_separated),
    build("tag", "tag-assignment [ value-list ]", tag_list_values),
    build("tag", "tag-assignment single-value", tag_single_value),
    build("tag-assignment", "tag-name =", tag_assignment_first),
    build("tag-assignment", "tag-assignment tag-name =", tag_assignment_append),
    build("tag-name", "@ IDENTIFIER", tag_name),
    keep("value-list", "single-value"),
    build("value-list", "value-list , single-value", value_list_append),
    build("single-value", "true", bool_value),
    build("single-value", "false", bool_value),
    build("single-value", "INTCONST", number_value),
    build("single-value", "FLOATCONST", number_value),
    build("single-value", "STRING", string_value),
    build("single-value", "CHARACTER", character_value),
];

static TABLES: LazyLock<Result<ParseTables<AnnotationTerminal, AnnotationNode>, GrammarError>> =
    LazyLock::new(|| ParseTables::build(RULES));

pub(crate) fn parse<S: TokenSource<AnnotationTerminal>>(
    source: S,
) -> Result<Vec<AnnotationTag>, ParseError> {
    let tables = TABLES
        .as_ref()
        .map_err(|error| ParseError::Grammar(error.clone()))?;
    let root = Parser::new(tables, source).run()?;
    Vec::<AnnotationTag>::extract(root).map_err(|node| {
        ParseError::from(ReductionError {
            production: 0,
            head: "$START$",
            kind: ReductionErrorKind::Mismatch {
                position: 0,
                expected: "tag-list",
                found: format!("node {}", node.kind_name()),
            },
        })
    })
}

fn mismatch(
    body: &AnnotationBody,
    position: usize,
    expected: &'static str,
    token: &Token<AnnotationTerminal>,
) -> ReductionError {
    body.error(ReductionErrorKind::Mismatch {
        position,
        expected,
        found: format!("token {}", token.terminal.grammar_name()),
    })
}

// ============================================================================
// SEMANTIC ACTIONS
// ============================================================================

fn tag_list_first(body: &mut AnnotationBody) -> Built {
    let tag: AnnotationTag = body.node(0)?;
    Ok(AnnotationNode::Tags(vec![tag]))
}

fn tag_list_append(body: &mut AnnotationBody) -> Built {
    let mut tags: Vec<AnnotationTag> = body.node(0)?;
    tags.push(body.node(1)?);
    Ok(AnnotationNode::Tags(tags))
}

fn tag_list_append_separated(body: &mut AnnotationBody) -> Built {
    let mut tags: Vec<AnnotationTag> = body.node(0)?;
    tags.push(body.node(2)?);
    Ok(AnnotationNode::Tags(tags))
}

fn tag_list_values(body: &mut AnnotationBody) -> Built {
    let names: Vec<SmolStr> = body.node(0)?;
    let values: Vec<AnnotationValue> = body.node(2)?;
    Ok(AnnotationNode::Tag(AnnotationTag { names, values }))
}

fn tag_single_value(body: &mut AnnotationBody) -> Built {
    let names: Vec<SmolStr> = body.node(0)?;
    let values: Vec<AnnotationValue> = body.node(1)?;
    Ok(AnnotationNode::Tag(AnnotationTag { names, values }))
}

fn tag_assignment_first(body: &mut AnnotationBody) -> Built {
    let names: Vec<SmolStr> = body.node(0)?;
    Ok(AnnotationNode::Names(names))
}

fn tag_assignment_append(body: &mut AnnotationBody) -> Built {
    let mut names: Vec<SmolStr> = body.node(0)?;
    names.extend(body.node::<Vec<SmolStr>>(1)?);
    Ok(AnnotationNode::Names(names))
}

fn tag_name(body: &mut AnnotationBody) -> Built {
    let token = body.token(1)?;
    match token.value {
        TokenValue::Identifier(name) => Ok(AnnotationNode::Names(vec![name])),
        _ => Err(mismatch(body, 1, "identifier", &token)),
    }
}

fn value_list_append(body: &mut AnnotationBody) -> Built {
    let mut values: Vec<AnnotationValue> = body.node(0)?;
    values.extend(body.node::<Vec<AnnotationValue>>(2)?);
    Ok(AnnotationNode::Values(values))
}

fn single(value: AnnotationValue) -> Built {
    Ok(AnnotationNode::Values(vec![value]))
}

fn bool_value(body: &mut AnnotationBody) -> Built {
    let token = body.token(0)?;
    single(AnnotationValue::Bool(token.terminal == AnnotationTerminal::True))
}

fn number_value(body: &mut AnnotationBody) -> Built {
    let token = body.token(0)?;
    match token.value {
        TokenValue::Int(value) => single(AnnotationValue::Int(value)),
        TokenValue::Float(value) => single(AnnotationValue::Float(value)),
        _ => Err(mismatch(body, 0, "number", &token)),
    }
}

fn string_value(body: &mut AnnotationBody) -> Built {
    let token = body.token(0)?;
    match token.value {
        TokenValue::Text(text) => single(AnnotationValue::String(text)),
        _ => Err(mismatch(body, 0, "string", &token)),
    }
}

fn character_value(body: &mut AnnotationBody) -> Built {
    let token = body.token(0)?;
    match token.text().and_then(|text| text.chars().next()) {
        Some(c) => single(AnnotationValue::Char(c)),
        None => Err(mismatch(body, 0, "character", &token)),
    }
}
