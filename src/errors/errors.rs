use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::Token, Position};

/// A parse failure: the first error encountered terminates the parse.
#[derive(Debug, Clone)]
pub struct Error {
    source_name: String,
    internal_error: ErrorImpl,
    detail: String,
    token: Token,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, source_name: &str, detail: String, token: Token) -> Self {
        Error {
            source_name: String::from(source_name),
            internal_error: error_impl,
            detail,
            token,
        }
    }

    pub fn kind(&self) -> ErrorImpl {
        self.internal_error
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// The offending token. A bare unexpected end of input carries an end
    /// marker without a position.
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn get_position(&self) -> &Position {
        &self.token.position
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::LexicalError => "LexicalError",
            ErrorImpl::UnexpectedEnd => "UnexpectedEnd",
            ErrorImpl::UnknownToken => "UnknownToken",
            ErrorImpl::ImpossibleNullDenotation => "ImpossibleNullDenotation",
            ErrorImpl::ImpossibleLeftDenotation => "ImpossibleLeftDenotation",
            ErrorImpl::UnexpectedToken => "UnexpectedToken",
            ErrorImpl::NestingTooDeep => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::LexicalError => ErrorTip::None,
            ErrorImpl::UnexpectedEnd if self.token.position.is_null() => ErrorTip::Suggestion(
                String::from("the input ended in the middle of an expression"),
            ),
            ErrorImpl::UnexpectedEnd => ErrorTip::Suggestion(format!(
                "`{}` follows a complete statement, is a `;` or a line break missing?",
                self.token.value
            )),
            ErrorImpl::UnknownToken => ErrorTip::Suggestion(format!(
                "the grammar has no production for {}",
                self.token.kind
            )),
            ErrorImpl::ImpossibleNullDenotation => ErrorTip::Suggestion(format!(
                "`{}` needs an operand in front of it",
                self.token.value
            )),
            ErrorImpl::ImpossibleLeftDenotation => ErrorTip::Suggestion(format!(
                "`{}` cannot continue the expression, is a `;` missing?",
                self.token.value
            )),
            ErrorImpl::UnexpectedToken => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", self.token.value))
            }
            ErrorImpl::NestingTooDeep => ErrorTip::Suggestion(String::from(
                "move inner parts of the expression into separate assignments",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error in {}: {}", self.source_name, self.internal_error)?;

        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }

        if !self.token.position.is_null() {
            write!(f, " ({})", self.token.position)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

/// A hint shown next to an error in a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => Ok(()),
            ErrorTip::Suggestion(suggestion) => f.write_str(suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("Lexical error")]
    LexicalError,
    #[error("Unexpected end")]
    UnexpectedEnd,
    #[error("Unknown term")]
    UnknownToken,
    #[error("Term cannot start an expression")]
    ImpossibleNullDenotation,
    #[error("Term can only start an expression")]
    ImpossibleLeftDenotation,
    #[error("Unexpected term")]
    UnexpectedToken,
    #[error("Nesting too deep")]
    NestingTooDeep,
}

/// Failures of the pretty printer. These indicate a mismatch between the
/// grammar table and the printer templates, not bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrintError {
    #[error("could not find template for {name} (template key: {key})")]
    MissingTemplate { name: String, key: String },
    #[error("node {name} is missing its token")]
    MissingToken { name: String },
}
