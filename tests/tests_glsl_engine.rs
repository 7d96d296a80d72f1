#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

mod helpers;

use glslfront::parser::grammar::{RULES, tables};
use glslfront::parser::lr::{Action, Parser, StateId, Step};
use glslfront::parser::terminals::Terminal;
use glslfront::parser::{ErrorCode, Lexer, ParseError, Token, TokenStream, parse_tokens};
use helpers::source_fixtures::*;
use rstest::rstest;
use text_size::{TextRange, TextSize};

#[rstest]
#[case(EMPTY_MAIN)]
#[case(SINGLE_DECLARATION)]
#[case(VERTEX_SHADER)]
#[case(LIGHTING_SHADER)]
#[case(LOOPS)]
fn test_stacks_stay_in_sync(#[case] source: &str) {
    let tables = tables().unwrap();
    let mut parser = Parser::new(tables, Lexer::new(source));
    let mut steps = 0;
    loop {
        let step = parser.step().unwrap();
        let (states, symbols) = parser.stack_depths();
        assert_eq!(states, symbols + 1, "after step {steps}: {step:?}");
        steps += 1;
        if step == Step::Accept {
            break;
        }
    }
    assert!(parser.is_accepted());
    assert_eq!(parser.step().unwrap(), Step::Accept);
    let root = parser.finish().unwrap();
    assert!(matches!(root, glslfront::parser::Node::TranslationUnit(_)));
}

#[test]
fn test_every_native_type_acts_like_the_wildcard() {
    let tables = tables().unwrap();
    let natives: Vec<Terminal> = Terminal::ALL
        .iter()
        .copied()
        .filter(|t| t.is_native_type())
        .collect();
    assert_eq!(natives.first(), Some(&Terminal::NATIVE_TYPE_FIRST));
    assert_eq!(natives.last(), Some(&Terminal::NATIVE_TYPE_LAST));

    for state in 0..tables.state_count() as StateId {
        let first = tables.action(state, Terminal::NATIVE_TYPE_FIRST);
        for &native in &natives {
            assert_eq!(tables.action(state, native), first, "state {state}, {native}");
        }
        assert_eq!(tables.action(state, Terminal::NativeType), Action::Error);
    }
}

#[test]
fn test_wildcard_token_is_a_syntax_error() {
    let at = |offset: u32| TextRange::empty(TextSize::new(offset));
    let tokens = vec![
        Token::bare(Terminal::NativeType, at(0)),
        Token::identifier("v", at(1)),
        Token::bare(Terminal::Semicolon, at(2)),
    ];
    let error = parse_tokens(TokenStream::new(tokens)).unwrap_err();
    assert_eq!(error.code(), ErrorCode::E0201, "{error}");
}

#[test]
fn test_table_shape() {
    let tables = tables().unwrap();
    assert_eq!(tables.grammar().productions().len(), RULES.len());
    let start = tables.production(0).unwrap();
    assert_eq!(start.head_name, "$START$");
    assert_eq!(start.body_names, ["program"]);

    // Reserved words appear in no production.
    for state in 0..tables.state_count() as StateId {
        assert_eq!(tables.action(state, Terminal::ReservedKeyword), Action::Error);
    }
}

#[test]
fn test_dangling_else_conflict_prefers_shift() {
    let tables = tables().unwrap();
    let else_conflicts: Vec<_> = tables
        .conflicts()
        .iter()
        .filter(|c| c.terminal == "else")
        .collect();
    assert!(!else_conflicts.is_empty());
    for conflict in else_conflicts {
        assert!(conflict.is_shift_reduce());
        assert!(matches!(conflict.chosen, Action::Shift(_)));
    }
}

#[test]
fn test_tables_are_shared() {
    let first = tables().unwrap();
    let second = tables().unwrap();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_parse_from_token_stream() {
    let at = |offset: u32| TextRange::empty(TextSize::new(offset));
    let tokens = vec![
        Token::bare(Terminal::Vec3, at(0)),
        Token::identifier("v", at(1)),
        Token::bare(Terminal::Semicolon, at(2)),
    ];
    let unit = parse_tokens(TokenStream::new(tokens)).unwrap();
    assert_eq!(unit.len(), 1);
}

#[test]
fn test_token_stream_without_terminator_fails_at_end() {
    let at = |offset: u32| TextRange::empty(TextSize::new(offset));
    let tokens = vec![
        Token::bare(Terminal::Float, at(0)),
        Token::identifier("v", at(1)),
    ];
    let error = parse_tokens(TokenStream::new(tokens)).unwrap_err();
    assert_eq!(error.code(), ErrorCode::E0202);
}

#[test]
fn test_parser_does_not_resume_after_syntax_error() {
    let tables = tables().unwrap();
    let mut parser = Parser::new(tables, Lexer::new("int x = ) 1; float y;"));
    let error = loop {
        match parser.step() {
            Ok(Step::Accept) => panic!("accepted invalid input"),
            Ok(_) => {}
            Err(error) => break error,
        }
    };
    assert_eq!(error.code(), ErrorCode::E0201);
    assert!(parser.is_failed());

    for _ in 0..8 {
        assert!(matches!(parser.step(), Err(ParseError::Halted)));
    }
    assert!(!parser.is_accepted());
    assert!(matches!(parser.finish(), Err(ParseError::Halted)));
}
