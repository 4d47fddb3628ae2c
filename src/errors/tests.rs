//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip, PrintError};
use crate::lexer::tokens::{Token, TokenKind};
use crate::Position;

fn token(kind: TokenKind, value: &str, line: u32, column: u32) -> Token {
    Token {
        kind,
        value: value.to_string(),
        position: Position::new(line, column),
    }
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken,
        "test.ecal",
        "foo".to_string(),
        token(TokenKind::Identifier, "foo", 1, 8),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.kind(), ErrorImpl::UnexpectedToken);
    assert_eq!(error.source_name(), "test.ecal");
    assert_eq!(error.detail(), "foo");
    assert_eq!(error.token().value, "foo");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::ImpossibleNullDenotation,
        "test.ecal",
        "==".to_string(),
        token(TokenKind::Eq, "==", 42, 5),
    );

    assert_eq!(error.get_position().line, 42);
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_error_display() {
    let error = Error::new(
        ErrorImpl::ImpossibleNullDenotation,
        "mytest",
        "==".to_string(),
        token(TokenKind::Eq, "==", 1, 5),
    );

    assert_eq!(
        error.to_string(),
        "Parse error in mytest: Term cannot start an expression (==) (Line:1 Pos:5)"
    );
}

#[test]
fn test_error_display_without_detail_or_position() {
    let error = Error::new(ErrorImpl::UnexpectedEnd, "mytest", String::new(), Token::eof());

    assert_eq!(error.to_string(), "Parse error in mytest: Unexpected end");
}

#[test]
fn test_error_kind_descriptions() {
    assert_eq!(ErrorImpl::LexicalError.to_string(), "Lexical error");
    assert_eq!(ErrorImpl::UnexpectedEnd.to_string(), "Unexpected end");
    assert_eq!(ErrorImpl::UnknownToken.to_string(), "Unknown term");
    assert_eq!(ErrorImpl::ImpossibleNullDenotation.to_string(), "Term cannot start an expression");
    assert_eq!(ErrorImpl::ImpossibleLeftDenotation.to_string(), "Term can only start an expression");
    assert_eq!(ErrorImpl::UnexpectedToken.to_string(), "Unexpected term");
    assert_eq!(ErrorImpl::NestingTooDeep.to_string(), "Nesting too deep");
}

#[test]
fn test_error_tip() {
    let lexical = Error::new(
        ErrorImpl::LexicalError,
        "test.ecal",
        "Unexpected character '@'".to_string(),
        token(TokenKind::Error, "Unexpected character '@'", 1, 1),
    );
    assert_eq!(lexical.get_tip(), ErrorTip::None);
    assert_eq!(lexical.get_tip().to_string(), "");

    let end = Error::new(ErrorImpl::UnexpectedEnd, "test.ecal", String::new(), Token::eof());
    assert_eq!(end.get_tip().to_string(), "the input ended in the middle of an expression");

    let unexpected = Error::new(
        ErrorImpl::UnexpectedToken,
        "test.ecal",
        "foo".to_string(),
        token(TokenKind::Identifier, "foo", 1, 1),
    );
    assert_eq!(unexpected.get_tip().to_string(), "Unexpected token: `foo`");
}

#[test]
fn test_error_is_std_error() {
    let error: Box<dyn std::error::Error> = Box::new(Error::new(
        ErrorImpl::UnknownToken,
        "test.ecal",
        "id:Times (*)".to_string(),
        token(TokenKind::Times, "*", 1, 3),
    ));

    assert_eq!(
        error.to_string(),
        "Parse error in test.ecal: Unknown term (id:Times (*)) (Line:1 Pos:3)"
    );
}

#[test]
fn test_print_error_display() {
    let error = PrintError::MissingTemplate {
        name: "plus".to_string(),
        key: "plus_3".to_string(),
    };

    assert_eq!(error.to_string(), "could not find template for plus (template key: plus_3)");
}
