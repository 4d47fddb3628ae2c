use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{ast::Node, names},
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::*, parser::Parser, stmt::*};

/// Binding power of a production: how strongly it holds on to the expression
/// on its left. Zero means the token cannot continue an expression.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Default, Hash)]
pub struct BindingPower(pub u32);

impl BindingPower {
    pub const DEFAULT: BindingPower = BindingPower(0);
    pub const ASSIGNMENT: BindingPower = BindingPower(10);
    pub const NOT: BindingPower = BindingPower(20);
    pub const OR: BindingPower = BindingPower(30);
    pub const AND: BindingPower = BindingPower(40);
    pub const RELATIONAL: BindingPower = BindingPower(60);
    pub const ADDITIVE: BindingPower = BindingPower(110);
    pub const MULTIPLICATIVE: BindingPower = BindingPower(120);
    pub const PRIMARY: BindingPower = BindingPower(150);

    /// Binding power used for the operand of a prefix operator.
    pub fn prefix_operand(self) -> BindingPower {
        BindingPower(self.0 + 20)
    }
}

/// Null denotation: called with the node of the token that starts an expression.
pub type NudHandler = fn(&mut Parser<'_>, Node) -> Result<Node, Error>;
/// Left denotation: called with the operator node and the expression on its left.
pub type LedHandler = fn(&mut Parser<'_>, Node, Node) -> Result<Node, Error>;

/// Grammar data for one token kind.
#[derive(Clone, Copy, Default)]
pub struct ProductionDescriptor {
    pub name: &'static str,
    pub binding: BindingPower,
    pub nud: Option<NudHandler>,
    pub led: Option<LedHandler>,
}

impl ProductionDescriptor {
    /// Creates a fresh node for this production. The token is absent for
    /// synthetic containers.
    pub fn instance(&self, token: Option<Token>) -> Node {
        Node {
            name: self.name,
            token,
            binding: self.binding,
            nud: self.nud,
            led: self.led,
            ..Default::default()
        }
    }
}

/// Token kind to production table. Built once and shared by reference.
#[derive(Clone, Default)]
pub struct Grammar {
    productions: HashMap<TokenKind, ProductionDescriptor>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar::default()
    }

    pub fn get(&self, kind: TokenKind) -> Option<&ProductionDescriptor> {
        self.productions.get(&kind)
    }

    fn entry(&mut self, kind: TokenKind, name: &'static str) -> &mut ProductionDescriptor {
        let descriptor = self.productions.entry(kind).or_default();
        descriptor.name = name;
        descriptor
    }

    /// Registers a token which only structures the input, like brackets and separators.
    pub fn structural(&mut self, kind: TokenKind) {
        self.entry(kind, "");
    }

    /// Registers a synthetic container which never comes from the token source.
    pub fn synthetic(&mut self, kind: TokenKind, name: &'static str) {
        self.entry(kind, name);
    }

    /// Registers a token which is an expression by itself.
    pub fn term(&mut self, kind: TokenKind, name: &'static str) {
        self.entry(kind, name).nud = Some(parse_term);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, name: &'static str, binding_power: BindingPower, nud_fn: NudHandler) {
        let descriptor = self.entry(kind, name);
        descriptor.binding = binding_power;
        descriptor.nud = Some(nud_fn);
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, name: &'static str, binding_power: BindingPower, led_fn: LedHandler) {
        let descriptor = self.entry(kind, name);
        descriptor.binding = binding_power;
        descriptor.led = Some(led_fn);
    }
}

lazy_static! {
    /// The ECAL grammar.
    pub static ref GRAMMAR: Grammar = create_token_lookups();
}

pub fn create_token_lookups() -> Grammar {
    let mut grammar = Grammar::new();

    // Terminals
    grammar.term(TokenKind::EOF, names::EOF);
    grammar.term(TokenKind::String, names::STRING);
    grammar.term(TokenKind::Number, names::NUMBER);
    grammar.nud(TokenKind::Identifier, names::IDENTIFIER, BindingPower::DEFAULT, parse_identifier);
    grammar.term(TokenKind::True, names::TRUE);
    grammar.term(TokenKind::False, names::FALSE);
    grammar.term(TokenKind::Null, names::NULL);

    // Synthetic containers
    grammar.synthetic(TokenKind::Statements, names::STATEMENTS);
    grammar.synthetic(TokenKind::FuncCall, names::FUNCCALL);
    grammar.synthetic(TokenKind::CompAccess, names::COMPACCESS);
    grammar.synthetic(TokenKind::List, names::LIST);
    grammar.synthetic(TokenKind::Map, names::MAP);
    grammar.synthetic(TokenKind::Params, names::PARAMS);

    // Grouping and literals
    grammar.nud(TokenKind::OpenParen, "", BindingPower::PRIMARY, parse_inner);
    grammar.nud(TokenKind::OpenBracket, "", BindingPower::PRIMARY, parse_list);
    grammar.nud(TokenKind::OpenCurly, "", BindingPower::PRIMARY, parse_map);

    grammar.structural(TokenKind::CloseParen);
    grammar.structural(TokenKind::CloseBracket);
    grammar.structural(TokenKind::CloseCurly);
    grammar.structural(TokenKind::Dot);
    grammar.structural(TokenKind::Comma);
    grammar.structural(TokenKind::Semicolon);
    grammar.structural(TokenKind::As);

    // Assignment
    grammar.led(TokenKind::Assign, names::ASSIGN, BindingPower::ASSIGNMENT, parse_infix);

    // Boolean operators
    grammar.nud(TokenKind::Not, names::NOT, BindingPower::NOT, parse_prefix);
    grammar.led(TokenKind::Or, names::OR, BindingPower::OR, parse_infix);
    grammar.led(TokenKind::And, names::AND, BindingPower::AND, parse_infix);

    // Conditions
    grammar.led(TokenKind::Geq, names::GEQ, BindingPower::RELATIONAL, parse_infix);
    grammar.led(TokenKind::Leq, names::LEQ, BindingPower::RELATIONAL, parse_infix);
    grammar.led(TokenKind::Neq, names::NEQ, BindingPower::RELATIONAL, parse_infix);
    grammar.led(TokenKind::Eq, names::EQ, BindingPower::RELATIONAL, parse_infix);
    grammar.led(TokenKind::Gt, names::GT, BindingPower::RELATIONAL, parse_infix);
    grammar.led(TokenKind::Lt, names::LT, BindingPower::RELATIONAL, parse_infix);
    grammar.led(TokenKind::Like, names::LIKE, BindingPower::RELATIONAL, parse_infix);
    grammar.led(TokenKind::In, names::IN, BindingPower::RELATIONAL, parse_infix);
    grammar.led(TokenKind::HasPrefix, names::HASPREFIX, BindingPower::RELATIONAL, parse_infix);
    grammar.led(TokenKind::HasSuffix, names::HASSUFFIX, BindingPower::RELATIONAL, parse_infix);
    grammar.led(TokenKind::NotIn, names::NOTIN, BindingPower::RELATIONAL, parse_infix);

    // Map entries and sink presets
    grammar.led(TokenKind::Colon, names::KVP, BindingPower::RELATIONAL, parse_infix);
    grammar.led(TokenKind::Equal, names::PRESET, BindingPower::RELATIONAL, parse_infix);

    // Arithmetic
    grammar.nud(TokenKind::Plus, names::PLUS, BindingPower::ADDITIVE, parse_prefix);
    grammar.led(TokenKind::Plus, names::PLUS, BindingPower::ADDITIVE, parse_infix);
    grammar.nud(TokenKind::Minus, names::MINUS, BindingPower::ADDITIVE, parse_prefix);
    grammar.led(TokenKind::Minus, names::MINUS, BindingPower::ADDITIVE, parse_infix);
    grammar.led(TokenKind::Times, names::TIMES, BindingPower::MULTIPLICATIVE, parse_infix);
    grammar.led(TokenKind::Div, names::DIV, BindingPower::MULTIPLICATIVE, parse_infix);
    grammar.led(TokenKind::DivInt, names::DIVINT, BindingPower::MULTIPLICATIVE, parse_infix);
    grammar.led(TokenKind::ModInt, names::MODINT, BindingPower::MULTIPLICATIVE, parse_infix);

    // Sink clauses
    grammar.nud(TokenKind::KindMatch, names::KINDMATCH, BindingPower::PRIMARY, parse_prefix);
    grammar.nud(TokenKind::ScopeMatch, names::SCOPEMATCH, BindingPower::PRIMARY, parse_prefix);
    grammar.nud(TokenKind::StateMatch, names::STATEMATCH, BindingPower::PRIMARY, parse_prefix);
    grammar.nud(TokenKind::Priority, names::PRIORITY, BindingPower::PRIMARY, parse_prefix);
    grammar.nud(TokenKind::Suppresses, names::SUPPRESSES, BindingPower::PRIMARY, parse_prefix);

    // Statements
    grammar.nud(TokenKind::Import, names::IMPORT, BindingPower::DEFAULT, parse_import);
    grammar.nud(TokenKind::Sink, names::SINK, BindingPower::DEFAULT, parse_sink);
    grammar.nud(TokenKind::Func, names::FUNCTION, BindingPower::DEFAULT, parse_func);
    grammar.nud(TokenKind::Return, names::RETURN, BindingPower::DEFAULT, parse_return);

    grammar
}
