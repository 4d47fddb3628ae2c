//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts ECAL source
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line/column tracking for error reporting
//! - Block comments and line comments, which are kept as tokens

pub mod lexer;
pub mod tokens;
