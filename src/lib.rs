#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::errors::errors::ErrorTip;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod printer;

extern crate regex;

pub use ast::ast::{MetaData, MetaDataKind, Node, Runtime, RuntimeProvider};
pub use errors::errors::{Error, ErrorImpl, PrintError};
pub use lexer::lexer::{lex, lex_concurrent};
pub use parser::parser::{parse, parse_tokens, parse_with_runtime};
pub use printer::printer::{pretty_print, pretty_print_with, FormatConfig};

/// A 1-based line/column location in the parsed input.
///
/// Line 0 marks a token without a source location, such as the end marker
/// returned once the token stream is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn null() -> Self {
        Position { line: 0, column: 0 }
    }

    pub fn is_null(&self) -> bool {
        self.line == 0
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line:{} Pos:{}", self.line, self.column)
    }
}

/// Returns the text of the given 1-based line, without its line terminator.
pub fn get_line_at_position(content: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    content
        .split('\n')
        .nth(line as usize - 1)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}


/// Renders an error as a multi-line diagnostic pointing at the offending token.
///
/// ```text
/// Error: Term cannot start an expression
/// -> script.ecal
///   |
/// 1 | not ==
///   | ----^
/// ```
pub fn render_diagnostic(error: &crate::errors::errors::Error, source: &str) -> String {
    let mut result = String::new();

    match error.get_tip() {
        ErrorTip::None => result.push_str(&format!("Error: {}\n", error.kind())),
        tip => result.push_str(&format!("Error: {} ({})\n", error.kind(), tip)),
    }
    result.push_str(&format!("-> {}\n", error.source_name()));

    let position = error.get_position();
    let Some(line_text) = get_line_at_position(source, position.line) else {
        return result;
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    result.push_str(&format!("{:>padding$}\n", "|"));

    let (code, indentation) = split_indentation(line_text);
    result.push_str(&format!("{} | {}\n", line_string, code.trim_end()));

    let arrows = (position.column as usize)
        .saturating_sub(indentation)
        .max(1);

    result.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));
    result
}

/// Splits a source line into its code and the number of leading spaces.
fn split_indentation(line: &str) -> (&str, usize) {
    let code = line.trim_start_matches(' ');
    (code, line.len() - code.len())
}
