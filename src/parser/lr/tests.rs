//! Tests for the LR machinery over small standalone grammars

use text_size::{TextRange, TextSize};

use super::lalr::FirstSets;
use super::*;
use crate::parser::errors::{GrammarError, ParseError, ReductionError, ReductionErrorKind};
use crate::parser::token::{Token, TokenStream, TokenValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Mini {
    Num,
    Plus,
    Star,
    LParen,
    RParen,
    If,
    Else,
    X,
    End,
}

const MINI: &[Mini] = &[
    Mini::Num,
    Mini::Plus,
    Mini::Star,
    Mini::LParen,
    Mini::RParen,
    Mini::If,
    Mini::Else,
    Mini::X,
    Mini::End,
];

impl TerminalKind for Mini {
    const COUNT: usize = 9;
    const END: Self = Mini::End;

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Option<Self> {
        MINI.get(index).copied()
    }

    fn grammar_name(self) -> &'static str {
        match self {
            Mini::Num => "NUM",
            Mini::Plus => "+",
            Mini::Star => "*",
            Mini::LParen => "(",
            Mini::RParen => ")",
            Mini::If => "if",
            Mini::Else => "else",
            Mini::X => "x",
            Mini::End => "$END$",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Num(i64),
    Stmt(Stmt),
}

#[derive(Debug, Clone, PartialEq)]
enum Stmt {
    X,
    If(Box<Stmt>, Option<Box<Stmt>>),
}

impl SymbolNode for Value {
    fn kind_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "number",
            Value::Stmt(_) => "statement",
        }
    }
}

impl Extract<Value> for i64 {
    const EXPECTED: &'static str = "number";

    fn extract(node: Value) -> Result<Self, Value> {
        match node {
            Value::Num(n) => Ok(n),
            other => Err(other),
        }
    }
}

impl Extract<Value> for Stmt {
    const EXPECTED: &'static str = "statement";

    fn extract(node: Value) -> Result<Self, Value> {
        match node {
            Value::Stmt(stmt) => Ok(stmt),
            other => Err(other),
        }
    }
}

type MiniBody = Body<Mini, Value>;

fn number(body: &mut MiniBody) -> Result<Value, ReductionError> {
    let token = body.token(0)?;
    match token.value {
        TokenValue::Int(n) => Ok(Value::Num(n)),
        _ => Err(body.error(ReductionErrorKind::Missing { position: 0 })),
    }
}

fn add(body: &mut MiniBody) -> Result<Value, ReductionError> {
    let lhs: i64 = body.node(0)?;
    body.token(1)?;
    let rhs: i64 = body.node(2)?;
    Ok(Value::Num(lhs + rhs))
}

fn mul(body: &mut MiniBody) -> Result<Value, ReductionError> {
    let lhs: i64 = body.node(0)?;
    body.token(1)?;
    let rhs: i64 = body.node(2)?;
    Ok(Value::Num(lhs * rhs))
}

fn paren(body: &mut MiniBody) -> Result<Value, ReductionError> {
    body.node::<i64>(1).map(Value::Num)
}

fn not_a_number(body: &mut MiniBody) -> Result<Value, ReductionError> {
    // NUM is a token, not a reduced number
    body.node::<i64>(0).map(Value::Num)
}

fn stmt_x(body: &mut MiniBody) -> Result<Value, ReductionError> {
    body.token(0)?;
    Ok(Value::Stmt(Stmt::X))
}

fn stmt_if(body: &mut MiniBody) -> Result<Value, ReductionError> {
    body.token(0)?;
    let then: Stmt = body.node(1)?;
    Ok(Value::Stmt(Stmt::If(Box::new(then), None)))
}

fn stmt_if_else(body: &mut MiniBody) -> Result<Value, ReductionError> {
    body.token(0)?;
    let then: Stmt = body.node(1)?;
    body.token(2)?;
    let otherwise: Stmt = body.node(3)?;
    Ok(Value::Stmt(Stmt::If(Box::new(then), Some(Box::new(otherwise)))))
}

static CALC: &[Rule<Mini, Value>] = &[
    keep("$START$", "expr"),
    build("expr", "expr + term", add),
    keep("expr", "term"),
    build("term", "term * factor", mul),
    keep("term", "factor"),
    build("factor", "( expr )", paren),
    build("factor", "NUM", number),
];

static DANGLING: &[Rule<Mini, Value>] = &[
    keep("$START$", "stmt"),
    build("stmt", "if stmt", stmt_if),
    build("stmt", "if stmt else stmt", stmt_if_else),
    build("stmt", "x", stmt_x),
];

static BROKEN_ACTION: &[Rule<Mini, Value>] = &[
    keep("$START$", "factor"),
    build("factor", "NUM", not_a_number),
];

static UNKNOWN_SYMBOL: &[Rule<Mini, Value>] = &[
    keep("$START$", "expr"),
    build("expr", "NUM - NUM", number),
];

static BAD_KEEP: &[Rule<Mini, Value>] = &[keep("$START$", "expr"), keep("expr", "NUM +")];

fn lex(input: &str) -> Vec<Token<Mini>> {
    input
        .char_indices()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(offset, c)| {
            let range = TextRange::at(TextSize::new(offset as u32), TextSize::new(1));
            let terminal = match c {
                '+' => Mini::Plus,
                '*' => Mini::Star,
                '(' => Mini::LParen,
                ')' => Mini::RParen,
                'i' => Mini::If,
                'e' => Mini::Else,
                'x' => Mini::X,
                digit => {
                    let value = digit.to_digit(10).unwrap() as i64;
                    return Token::new(Mini::Num, TokenValue::Int(value), range);
                }
            };
            Token::bare(terminal, range)
        })
        .collect()
}

fn parse(rules: &ParseTables<Mini, Value>, input: &str) -> Result<Value, ParseError> {
    Parser::new(rules, TokenStream::new(lex(input))).run()
}

#[test]
fn test_calc_evaluates_with_precedence() {
    let tables = ParseTables::build(CALC).unwrap();
    assert!(tables.conflicts().is_empty());
    assert_eq!(parse(&tables, "2+3*4").unwrap(), Value::Num(14));
    assert_eq!(parse(&tables, "(2+3)*4").unwrap(), Value::Num(20));
    assert_eq!(parse(&tables, "7").unwrap(), Value::Num(7));
}

#[test]
fn test_first_sets() {
    let tables = ParseTables::build(CALC).unwrap();
    let grammar = tables.grammar();
    let first = FirstSets::compute(grammar);
    let expr = grammar.nonterminal("expr").unwrap();
    let members: Vec<usize> = first.first(expr).iter().collect();
    assert_eq!(members, vec![Mini::Num.index(), Mini::LParen.index()]);
}

#[test]
fn test_stack_invariant_holds_before_every_action() {
    let tables = ParseTables::build(CALC).unwrap();
    let mut parser = Parser::new(&tables, TokenStream::new(lex("(1+2)*3+4")));
    let mut shifts = 0;
    let mut reductions = 0;
    loop {
        let (states, symbols) = parser.stack_depths();
        assert_eq!(states, symbols + 1);
        match parser.step().unwrap() {
            Step::Shift { .. } => shifts += 1,
            Step::Reduce { .. } => reductions += 1,
            Step::Accept => break,
        }
    }
    assert_eq!(shifts, 9);
    assert!(reductions > 0);
    assert_eq!(parser.stack_depths(), (2, 1));
    assert_eq!(parser.step().unwrap(), Step::Accept);
    assert_eq!(parser.finish().unwrap(), Value::Num(13));
}

#[test]
fn test_syntax_error_reports_state_and_terminal() {
    let tables = ParseTables::build(CALC).unwrap();
    let err = parse(&tables, "2+*3").unwrap_err();
    let ParseError::Syntax(err) = err else {
        panic!("expected a syntax error, got {err:?}");
    };
    assert_eq!(err.found, "*");
    assert_eq!(err.terminal, Mini::Star.index() as u16);
    assert_eq!(err.range, TextRange::at(TextSize::new(2), TextSize::new(1)));
    assert!(err.expected.contains(&"NUM"));
    assert!(err.expected.contains(&"("));
    assert!(!err.expected.contains(&"+"));
}

#[test]
fn test_unexpected_end() {
    let tables = ParseTables::build(CALC).unwrap();
    let err = parse(&tables, "(1+2").unwrap_err();
    let ParseError::Syntax(err) = err else {
        panic!("expected a syntax error, got {err:?}");
    };
    assert!(err.is_unexpected_end());
}

#[test]
fn test_dangling_else_binds_to_inner_if() {
    let tables = ParseTables::build(DANGLING).unwrap();
    let conflicts = tables.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert!(conflicts[0].is_shift_reduce());
    assert_eq!(conflicts[0].terminal, "else");
    assert!(matches!(conflicts[0].chosen, Action::Shift(_)));

    let parsed = parse(&tables, "iixex").unwrap();
    let expected = Stmt::If(
        Box::new(Stmt::If(Box::new(Stmt::X), Some(Box::new(Stmt::X)))),
        None,
    );
    assert_eq!(parsed, Value::Stmt(expected));
}

#[test]
fn test_mismatched_body_symbol_aborts() {
    let tables = ParseTables::build(BROKEN_ACTION).unwrap();
    let err = parse(&tables, "1").unwrap_err();
    let ParseError::Reduction(err) = err else {
        panic!("expected a reduction error, got {err:?}");
    };
    assert_eq!(err.production, 1);
    assert_eq!(err.head, "factor");
    assert_eq!(
        err.kind,
        ReductionErrorKind::Mismatch {
            position: 0,
            expected: "number",
            found: "token NUM".to_string(),
        }
    );
}

#[test]
fn test_grammar_errors() {
    assert!(matches!(
        ParseTables::build(UNKNOWN_SYMBOL),
        Err(GrammarError::UnknownSymbol { symbol: "-", .. })
    ));
    assert!(matches!(
        ParseTables::build(BAD_KEEP),
        Err(GrammarError::KeepArity { len: 2, .. })
    ));
}

#[test]
fn test_production_metadata() {
    let tables = ParseTables::build(CALC).unwrap();
    let production = tables.production(1).unwrap();
    assert_eq!(production.to_string(), "expr ::= expr + term");
    assert_eq!(production.len(), 3);
    assert!(tables.production(99).is_none());
    assert_eq!(tables.action(0, Mini::RParen), Action::Error);
    assert!(tables.goto(0, grammar_id(&tables, "expr")).is_some());
}

fn grammar_id(tables: &ParseTables<Mini, Value>, name: &str) -> usize {
    tables.grammar().nonterminal(name).unwrap()
}

#[test]
fn test_parser_stays_failed_after_syntax_error() {
    let tables = ParseTables::build(CALC).unwrap();
    let mut parser = Parser::new(&tables, TokenStream::new(lex("2+*3")));
    let err = loop {
        match parser.step() {
            Ok(Step::Accept) => panic!("accepted invalid input"),
            Ok(_) => {}
            Err(err) => break err,
        }
    };
    assert!(matches!(err, ParseError::Syntax(_)));
    assert!(parser.is_failed());

    // The rest of the input ("3") would otherwise shift and reduce fine.
    for _ in 0..4 {
        let err = parser.step().unwrap_err();
        assert!(matches!(err, ParseError::Halted));
        assert_eq!(err.code(), crate::parser::errors::ErrorCode::E0304);
    }
    assert!(!parser.is_accepted());
    assert!(matches!(parser.finish(), Err(ParseError::Halted)));
}

#[test]
fn test_parser_stays_failed_after_reduction_error() {
    let tables = ParseTables::build(BROKEN_ACTION).unwrap();
    let mut parser = Parser::new(&tables, TokenStream::new(lex("1")));
    assert!(matches!(parser.step(), Ok(Step::Shift { .. })));
    assert!(matches!(parser.step(), Err(ParseError::Reduction(_))));
    assert!(matches!(parser.step(), Err(ParseError::Halted)));
    assert!(matches!(parser.finish(), Err(ParseError::Halted)));
}
