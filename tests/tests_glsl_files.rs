#![allow(clippy::unwrap_used)]

mod helpers;

use glslfront::parser::ErrorCode;
use glslfront::{ParseOptions, parse_file, parse_file_with, parse_many};
use helpers::source_fixtures::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_parse_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(LIGHTING_SHADER.as_bytes()).unwrap();

    let unit = parse_file(file.path()).unwrap();
    assert_eq!(unit.len(), 11);
    assert_eq!(unit, glslfront::parse_str(LIGHTING_SHADER).unwrap());
}

#[test]
fn test_parse_file_with_options() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shader.frag");
    std::fs::write(&path, "Material m;\nvoid main() {}").unwrap();

    assert_eq!(parse_file(&path).unwrap_err().code(), ErrorCode::E0201);

    let options = ParseOptions::new().with_type_name("Material");
    let unit = parse_file_with(&path, &options).unwrap();
    assert_eq!(unit.len(), 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.frag");

    let error = parse_file(&path).unwrap_err();
    assert_eq!(error.code(), ErrorCode::E0901);
    assert!(error.to_string().contains("missing.frag"));
}

#[test]
fn test_parse_many_keeps_input_order() {
    let sources = [
        EMPTY_MAIN,
        "float broken(",
        SINGLE_DECLARATION,
        VERTEX_SHADER,
    ];
    let results = parse_many(&sources);
    assert_eq!(results.len(), 4);

    assert_eq!(results[0].as_ref().unwrap().len(), 1);
    assert_eq!(results[1].as_ref().unwrap_err().code(), ErrorCode::E0202);
    assert_eq!(results[2].as_ref().unwrap().len(), 1);
    assert_eq!(results[3].as_ref().unwrap().len(), 5);
}

#[test]
fn test_parse_many_matches_sequential_parses() {
    let sources: Vec<&str> = std::iter::repeat_n([LOOPS, LIGHTING_SHADER], 8)
        .flatten()
        .collect();
    let parallel = parse_many(&sources);
    for (source, result) in sources.iter().zip(parallel) {
        assert_eq!(result.unwrap(), glslfront::parse_str(source).unwrap());
    }
}
