use std::{
    sync::mpsc::{self, IntoIter},
    thread,
};

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use crate::{Position, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Turns the matched text at a position into a token. `None` skips the text.
pub type RegexHandler = fn(&str, Position) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        // The pattern table is fixed; a bad entry is a programming error.
        regex: Regex::new(regex).unwrap_or_else(|e| panic!("invalid lexer pattern {}: {}", regex, e)),
        handler,
    }
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern(r"^\s+", skip_handler),
        pattern(r"^/\*(?s:.*?)\*/", pre_comment_handler),
        pattern(r"^/\*", |_, position| {
            Some(error_token("Unexpected end while reading comment", position))
        }),
        pattern(r"^#[^\n]*", post_comment_handler),
        pattern(r#"^r"[^"]*""#, raw_string_handler),
        pattern(r"^r'[^']*'", raw_string_handler),
        pattern(r#"^"(?s:[^"\\]|\\.)*""#, string_handler),
        pattern(r"^'(?s:[^'\\]|\\.)*'", string_handler),
        pattern(r#"^["']"#, |_, position| {
            Some(error_token(
                "Unexpected end while reading string value (unclosed quotes)",
                position,
            ))
        }),
        pattern(r"^[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?", MK_DEFAULT_HANDLER!(TokenKind::Number)),
        pattern(r"^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern(r"^:=", MK_DEFAULT_HANDLER!(TokenKind::Assign)),
        pattern(r"^>=", MK_DEFAULT_HANDLER!(TokenKind::Geq)),
        pattern(r"^<=", MK_DEFAULT_HANDLER!(TokenKind::Leq)),
        pattern(r"^!=", MK_DEFAULT_HANDLER!(TokenKind::Neq)),
        pattern(r"^==", MK_DEFAULT_HANDLER!(TokenKind::Eq)),
        pattern(r"^//", MK_DEFAULT_HANDLER!(TokenKind::DivInt)),
        pattern(r"^\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen)),
        pattern(r"^\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen)),
        pattern(r"^\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket)),
        pattern(r"^\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket)),
        pattern(r"^\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly)),
        pattern(r"^\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly)),
        pattern(r"^\.", MK_DEFAULT_HANDLER!(TokenKind::Dot)),
        pattern(r"^,", MK_DEFAULT_HANDLER!(TokenKind::Comma)),
        pattern(r"^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon)),
        pattern(r"^:", MK_DEFAULT_HANDLER!(TokenKind::Colon)),
        pattern(r"^=", MK_DEFAULT_HANDLER!(TokenKind::Equal)),
        pattern(r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        pattern(r"^-", MK_DEFAULT_HANDLER!(TokenKind::Minus)),
        pattern(r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Times)),
        pattern(r"^/", MK_DEFAULT_HANDLER!(TokenKind::Div)),
        pattern(r"^%", MK_DEFAULT_HANDLER!(TokenKind::ModInt)),
        pattern(r"^>", MK_DEFAULT_HANDLER!(TokenKind::Gt)),
        pattern(r"^<", MK_DEFAULT_HANDLER!(TokenKind::Lt)),
    ];
}

/// A lazy tokenizer over a named input.
///
/// The stream ends with exactly one `EOF` token, unless an `Error` token is
/// produced first, in which case the `Error` token is the last one.
pub struct Lexer {
    name: String,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    finished: bool,
}

impl Lexer {
    pub fn new(name: &str, source: &str) -> Lexer {
        Lexer {
            name: String::from(name),
            source: String::from(source),
            pos: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn advance_over(&mut self, len: usize) {
        let consumed = &self.source[self.pos..self.pos + len];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += len;
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        loop {
            if self.at_eof() {
                self.finished = true;
                return Some(MK_TOKEN!(TokenKind::EOF, String::new(), self.current_position()));
            }

            let position = self.current_position();
            let remainder = self.remainder();

            let matched = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(remainder)
                    .map(|found| (found.end(), (pattern.handler)(found.as_str(), position)))
            });

            let token = match matched {
                Some((len, token)) => {
                    self.advance_over(len);
                    token
                }
                None => {
                    let ch = remainder.chars().next().unwrap_or_default();
                    self.advance_over(ch.len_utf8());
                    Some(error_token(&format!("Unexpected character '{}'", ch), position))
                }
            };

            if let Some(token) = token {
                trace!("{}: lexed {:?} at {}", self.name, token.kind, token.position);

                if token.kind == TokenKind::Error {
                    self.finished = true;
                }
                return Some(token);
            }
        }
    }
}

fn error_token(message: &str, position: Position) -> Token {
    MK_TOKEN!(TokenKind::Error, String::from(message), position)
}

fn skip_handler(_: &str, _: Position) -> Option<Token> {
    None
}

fn pre_comment_handler(matched: &str, position: Position) -> Option<Token> {
    let text = &matched[2..matched.len() - 2];
    Some(MK_TOKEN!(TokenKind::PreComment, String::from(text), position))
}

fn post_comment_handler(matched: &str, position: Position) -> Option<Token> {
    let text = matched[1..].trim_end_matches('\r');
    Some(MK_TOKEN!(TokenKind::PostComment, String::from(text), position))
}

fn raw_string_handler(matched: &str, position: Position) -> Option<Token> {
    let text = &matched[2..matched.len() - 1];
    Some(MK_TOKEN!(TokenKind::String, String::from(text), position))
}

fn string_handler(matched: &str, position: Position) -> Option<Token> {
    let literal = &matched[1..matched.len() - 1];

    match unescape(literal) {
        Some(value) => Some(MK_TOKEN!(TokenKind::String, value, position)),
        None => Some(error_token("invalid syntax while parsing string", position)),
    }
}

fn symbol_handler(matched: &str, position: Position) -> Option<Token> {
    let kind = RESERVED_LOOKUP
        .get(matched.to_lowercase().as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    Some(MK_TOKEN!(kind, String::from(matched), position))
}

/// Resolves the escape sequences of a quoted string body. Returns `None` for an
/// unknown or malformed escape.
fn unescape(literal: &str) -> Option<String> {
    let mut result = String::with_capacity(literal.len());
    let mut chars = literal.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next()? {
            'n' => result.push('\n'),
            't' => result.push('\t'),
            'r' => result.push('\r'),
            '0' => result.push('\0'),
            '\\' => result.push('\\'),
            '"' => result.push('"'),
            '\'' => result.push('\''),
            'x' => result.push(hex_escape(&mut chars, 2)?),
            'u' => result.push(hex_escape(&mut chars, 4)?),
            _ => return None,
        }
    }

    Some(result)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return None;
    }

    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
}

/// Tokenizes `input` lazily on the calling thread.
pub fn lex(name: &str, input: &str) -> Lexer {
    debug!("lexing {}", name);
    Lexer::new(name, input)
}

/// Tokenizes `input` on a background thread which feeds a channel holding at
/// most `bound` tokens. The returned iterator blocks until the next token is
/// available and ends once the lexer is done.
pub fn lex_concurrent(name: &str, input: &str, bound: usize) -> IntoIter<Token> {
    debug!("lexing {} on a background thread", name);

    let (sender, receiver) = mpsc::sync_channel(bound);
    let lexer = Lexer::new(name, input);

    thread::spawn(move || {
        for token in lexer {
            if sender.send(token).is_err() {
                // The consumer stopped listening
                break;
            }
        }
    });

    receiver.into_iter()
}
