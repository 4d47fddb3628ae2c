use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    /// Keywords, looked up with the lower-cased identifier text.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("import", TokenKind::Import);
        map.insert("as", TokenKind::As);
        map.insert("sink", TokenKind::Sink);
        map.insert("kindmatch", TokenKind::KindMatch);
        map.insert("scopematch", TokenKind::ScopeMatch);
        map.insert("statematch", TokenKind::StateMatch);
        map.insert("priority", TokenKind::Priority);
        map.insert("suppresses", TokenKind::Suppresses);
        map.insert("func", TokenKind::Func);
        map.insert("return", TokenKind::Return);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map.insert("like", TokenKind::Like);
        map.insert("in", TokenKind::In);
        map.insert("hasprefix", TokenKind::HasPrefix);
        map.insert("hassuffix", TokenKind::HasSuffix);
        map.insert("notin", TokenKind::NotIn);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Error,
    PreComment,
    PostComment,

    String,
    Number,
    Identifier,

    // Synthetic, never produced by the lexer
    Statements,
    FuncCall,
    CompAccess,
    List,
    Map,
    Params,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,

    Dot,
    Comma,
    Semicolon,
    Colon,  // :
    Equal,  // =
    Assign, // :=

    Plus,
    Minus,
    Times,
    Div,
    DivInt, // //
    ModInt, // %

    Geq,
    Leq,
    Neq,
    Eq,
    Gt,
    Lt,

    // Reserved
    Import,
    As,
    Sink,
    KindMatch,
    ScopeMatch,
    StateMatch,
    Priority,
    Suppresses,
    Func,
    Return,

    And,
    Or,
    Not,
    Like,
    In,
    HasPrefix,
    HasSuffix,
    NotIn,

    True,
    False,
    Null,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TokenKind {
    pub fn is_symbol(&self) -> bool {
        matches!(
            self,
            TokenKind::OpenParen
                | TokenKind::CloseParen
                | TokenKind::OpenBracket
                | TokenKind::CloseBracket
                | TokenKind::OpenCurly
                | TokenKind::CloseCurly
                | TokenKind::Dot
                | TokenKind::Comma
                | TokenKind::Semicolon
                | TokenKind::Colon
                | TokenKind::Equal
                | TokenKind::Assign
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Times
                | TokenKind::Div
                | TokenKind::DivInt
                | TokenKind::ModInt
                | TokenKind::Geq
                | TokenKind::Leq
                | TokenKind::Neq
                | TokenKind::Eq
                | TokenKind::Gt
                | TokenKind::Lt
        )
    }

    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    /// End marker used once the token source is exhausted. It has no position.
    pub fn eof() -> Self {
        Token {
            kind: TokenKind::EOF,
            value: String::new(),
            position: Position::null(),
        }
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "EOF"),
            TokenKind::Error => write!(f, "Error: {}", self.value),
            TokenKind::PreComment => write!(f, "/* {} */", self.value),
            TokenKind::PostComment => write!(f, "# {}", self.value),
            kind if kind.is_symbol() => write!(f, "{}", self.value.to_uppercase()),
            kind if kind.is_keyword() => write!(f, "<{}>", self.value.to_uppercase()),
            _ if self.value.chars().count() > 20 => {
                let head: String = self.value.chars().take(10).collect();
                write!(f, "{:?}...", head)
            }
            _ => write!(f, "{:?}", self.value),
        }
    }
}
