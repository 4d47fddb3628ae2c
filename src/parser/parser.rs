//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the entry points. The
//! parser is a Pratt parser: every node carries the NUD/LED handlers and
//! the binding power of its grammar production, and `run` drives them.
//!
//! Comments never reach the handlers. `/* */` comments become metadata of
//! the node that follows them, `#` comments become metadata of the node
//! before them once that node is displaced as the current node.

use std::mem;

use log::{debug, trace};

use crate::{
    ast::{
        ast::{MetaData, MetaDataKind, Node, RuntimeProvider},
        names,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::lex,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookahead::LookaheadWindow,
    lookups::{BindingPower, Grammar, ProductionDescriptor, GRAMMAR},
};

/// Number of tokens the parser buffers ahead of the current node.
pub const LOOKAHEAD_SIZE: usize = 3;

/// Deepest expression nesting the parser accepts. Brackets, prefix operators,
/// right operands, blocks and identifier chains each add a level.
pub const MAX_NESTING: usize = 100;

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// The name of the input, used in error messages
    name: String,
    /// The most recently fetched node which has not been consumed yet
    node: Node,
    tokens: LookaheadWindow<Box<dyn Iterator<Item = Token> + 'a>>,
    grammar: &'a Grammar,
    runtime_provider: Option<&'a dyn RuntimeProvider>,
    /// Post-comments waiting for the current node to be displaced
    pending_post: Vec<MetaData>,
    /// Number of expressions currently being parsed
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser and primes it with the first node of the input.
    pub fn new(
        name: &str,
        tokens: impl Iterator<Item = Token> + 'a,
        grammar: &'a Grammar,
        runtime_provider: Option<&'a dyn RuntimeProvider>,
    ) -> Result<Self, Error> {
        let source: Box<dyn Iterator<Item = Token> + 'a> = Box::new(tokens);

        let mut parser = Parser {
            name: String::from(name),
            node: Node::default(),
            tokens: LookaheadWindow::new(source, LOOKAHEAD_SIZE),
            grammar,
            runtime_provider,
            pending_post: vec![],
            depth: 0,
        };

        parser.node = parser.next()?;

        // There is no earlier node for leading post-comments to belong to
        let orphans: Vec<MetaData> = parser
            .pending_post
            .drain(..)
            .map(|meta| MetaData::new(MetaDataKind::PreComment, meta.value))
            .collect();
        prepend_meta(&mut parser.node, orphans);

        Ok(parser)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current node without consuming it.
    pub fn current(&self) -> &Node {
        &self.node
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.node.kind()
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.node.is_kind(kind)
    }

    /// Looks past the current node into the raw token buffer.
    pub fn peek(&self, i: usize) -> Option<&Token> {
        self.tokens.peek(i)
    }

    fn descriptor(&self, kind: TokenKind, token: &Token) -> Result<ProductionDescriptor, Error> {
        match self.grammar.get(kind) {
            Some(descriptor) => Ok(*descriptor),
            None => Err(Error::new(
                ErrorImpl::UnknownToken,
                &self.name,
                format!("id:{} ({})", kind, token),
                token.clone(),
            )),
        }
    }

    /// Instantiates a node of the given production and hands it to the
    /// runtime provider, if there is one.
    pub fn new_node(&self, kind: TokenKind, token: Option<Token>) -> Result<Node, Error> {
        let descriptor = match &token {
            Some(token) => self.descriptor(kind, token)?,
            None => {
                let placeholder = Token {
                    kind,
                    value: String::new(),
                    position: self.node.token.as_ref().map(|t| t.position).unwrap_or_default(),
                };
                self.descriptor(kind, &placeholder)?
            }
        };

        let mut node = descriptor.instance(token);
        if let Some(provider) = self.runtime_provider {
            node.runtime = Some(provider.runtime(&node));
        }

        Ok(node)
    }

    /// Fetches the next node from the token source. Pre-comments in front of
    /// it are attached to it, post-comments are queued for the current node.
    fn next(&mut self) -> Result<Node, Error> {
        let mut pre_comments = vec![];

        loop {
            let Some(token) = self.tokens.next() else {
                return Err(Error::new(ErrorImpl::UnexpectedEnd, &self.name, String::new(), Token::eof()));
            };

            match token.kind {
                TokenKind::PreComment => {
                    pre_comments.push(MetaData::new(MetaDataKind::PreComment, token.value));
                }
                TokenKind::PostComment => {
                    self.pending_post.push(MetaData::new(MetaDataKind::PostComment, token.value));
                }
                TokenKind::Error => {
                    return Err(Error::new(ErrorImpl::LexicalError, &self.name, token.value.clone(), token));
                }
                kind => {
                    let mut node = self.new_node(kind, Some(token))?;
                    node.meta = pre_comments;
                    return Ok(node);
                }
            }
        }
    }

    /// Makes the next node current and returns the displaced one, together
    /// with the post-comments that followed it.
    pub fn advance(&mut self) -> Result<Node, Error> {
        let next = self.next()?;
        let mut previous = mem::replace(&mut self.node, next);
        previous.meta.append(&mut self.pending_post);

        Ok(previous)
    }

    /// Error for a current node which does not fit the production being parsed.
    pub fn unexpected(&self) -> Error {
        let token = self.node.token.clone().unwrap_or_else(Token::eof);

        if token.kind == TokenKind::EOF {
            Error::new(ErrorImpl::UnexpectedEnd, &self.name, String::new(), token)
        } else {
            Error::new(ErrorImpl::UnexpectedToken, &self.name, token.value.clone(), token)
        }
    }

    fn error_at(&self, kind: ErrorImpl, node: &Node) -> Error {
        let token = node.token.clone().unwrap_or_else(Token::eof);
        Error::new(kind, &self.name, token.to_string(), token)
    }

    /// Consumes the current token, which must be one of `kinds`. Its comments
    /// move to the new current node.
    pub fn skip_token(&mut self, kinds: &[TokenKind]) -> Result<(), Error> {
        if !self.node.kind().is_some_and(|kind| kinds.contains(&kind)) {
            return Err(self.unexpected());
        }

        let skipped = self.advance()?;
        prepend_meta(&mut self.node, skipped.meta);
        Ok(())
    }

    /// Consumes a token which closes `owner`. Comments after it belong to
    /// `owner`, comments before it to the new current node.
    pub fn skip_closing(&mut self, kind: TokenKind, owner: &mut Node) -> Result<(), Error> {
        if !self.node.is_kind(kind) {
            return Err(self.unexpected());
        }

        let skipped = self.advance()?;
        let (post, pre): (Vec<MetaData>, Vec<MetaData>) = skipped
            .meta
            .into_iter()
            .partition(|meta| meta.kind == MetaDataKind::PostComment);

        owner.meta.extend(post);
        prepend_meta(&mut self.node, pre);
        Ok(())
    }

    /// Consumes an optional `,` after a list item. Comments following the
    /// comma still belong to `item`.
    pub fn skip_comma(&mut self, item: &mut Node) -> Result<(), Error> {
        if self.node.is_kind(TokenKind::Comma) {
            self.skip_closing(TokenKind::Comma, item)?;
        }
        Ok(())
    }

    /// Consumes the current node, which must be of the given kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Node, Error> {
        if !self.node.is_kind(kind) {
            return Err(self.unexpected());
        }

        self.advance()
    }

    /// Consumes the current node and appends it to `parent`. The node must
    /// be of the given kind.
    pub fn accept_child(&mut self, parent: &mut Node, kind: TokenKind) -> Result<(), Error> {
        let child = self.expect(kind)?;
        parent.children.push(child);
        Ok(())
    }

    fn at_end(&self, end: TokenKind) -> bool {
        self.node.is_kind(TokenKind::EOF) || self.node.is_kind(end)
    }

    /// Consumes `;` separators after `owner`. Returns whether any were found.
    fn skip_separators(&mut self, owner: &mut Node) -> Result<bool, Error> {
        let mut skipped = false;

        while self.node.is_kind(TokenKind::Semicolon) {
            self.skip_closing(TokenKind::Semicolon, owner)?;
            skipped = true;
        }

        Ok(skipped)
    }

    /// Consumes separators after `prev` and decides whether another statement
    /// follows. Without a `;` a new statement has to start on a later line.
    pub fn has_more_statements(&mut self, prev: &mut Node, end: TokenKind) -> Result<bool, Error> {
        let separated = self.skip_separators(prev)?;

        if self.at_end(end) {
            return Ok(false);
        }

        Ok(separated || prev.line() < self.node.line())
    }

    /// Parses statements into `statements` until `end` (or the end of input)
    /// or until no further statement follows.
    pub fn collect_statements(&mut self, statements: &mut Node, end: TokenKind) -> Result<(), Error> {
        loop {
            let more = match statements.children.len() {
                0 => {
                    self.skip_separators(statements)?;
                    !self.at_end(end)
                }
                n => self.has_more_statements(&mut statements.children[n - 1], end)?,
            };

            if !more {
                return Ok(());
            }

            let statement = self.run(BindingPower::DEFAULT)?;
            statements.children.push(statement);
        }
    }

    /// Parses an expression whose operators bind tighter than `right_binding`.
    pub fn run(&mut self, right_binding: BindingPower) -> Result<Node, Error> {
        self.enter()?;
        let result = self.run_nested(right_binding);
        self.leave();
        result
    }

    /// Adds a nesting level, failing once `MAX_NESTING` is exceeded.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING {
            let token = self.node.token.clone().unwrap_or_else(Token::eof);
            return Err(Error::new(
                ErrorImpl::NestingTooDeep,
                &self.name,
                format!("more than {} levels", MAX_NESTING),
                token,
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn run_nested(&mut self, right_binding: BindingPower) -> Result<Node, Error> {
        let n = self.advance()?;
        trace!("{}: nud {} ({:?})", self.name, n.name, n.kind());

        let Some(nud) = n.nud else {
            return Err(self.error_at(ErrorImpl::ImpossibleNullDenotation, &n));
        };

        let mut left = nud(self, n)?;

        while self.node.binding > right_binding {
            let Some(led) = self.node.led else {
                // A term on a later line starts the next statement
                if left.line() < self.node.line() {
                    return Ok(left);
                }
                return Err(self.error_at(ErrorImpl::ImpossibleLeftDenotation, &self.node));
            };

            let operator = self.advance()?;
            trace!("{}: led {} ({:?})", self.name, operator.name, operator.kind());
            left = led(self, operator, left)?;
        }

        Ok(left)
    }

    fn parse_root(&mut self) -> Result<Node, Error> {
        if self.node.is_kind(TokenKind::EOF) {
            let mut root = self.new_node(TokenKind::Statements, None)?;
            root.meta.append(&mut self.node.meta);
            return Ok(root);
        }

        let mut first = self.run(BindingPower::DEFAULT)?;

        let mut root = if self.has_more_statements(&mut first, TokenKind::EOF)? {
            let mut statements = self.new_node(TokenKind::Statements, None)?;
            statements.children.push(first);
            let second = self.run(BindingPower::DEFAULT)?;
            statements.children.push(second);
            self.collect_statements(&mut statements, TokenKind::EOF)?;
            statements
        } else {
            first
        };

        if !self.node.is_kind(TokenKind::EOF) {
            let token = self.node.token.clone().unwrap_or_else(Token::eof);
            return Err(Error::new(
                ErrorImpl::UnexpectedEnd,
                &self.name,
                format!("extra token id:{} ({})", token.kind, token),
                token,
            ));
        }

        // Comments at the very end of the input belong to the statement list
        if !self.node.meta.is_empty() {
            if root.name != names::STATEMENTS {
                let mut statements = self.new_node(TokenKind::Statements, None)?;
                statements.children.push(root);
                root = statements;
            }
            root.meta.append(&mut self.node.meta);
        }

        Ok(root)
    }
}

fn prepend_meta(node: &mut Node, mut meta: Vec<MetaData>) {
    meta.append(&mut node.meta);
    node.meta = meta;
}

/// Parses any token stream with any grammar.
///
/// # Arguments
///
/// * `name` - Name of the input, used in error messages
/// * `tokens` - The token source; it should end with an `EOF` token
/// * `grammar` - The production table
/// * `runtime_provider` - Invoked for every node the parser creates
///
/// # Returns
///
/// The root node. Several statements are wrapped in a `statements` node.
pub fn parse_tokens<'a>(
    name: &str,
    tokens: impl Iterator<Item = Token> + 'a,
    grammar: &'a Grammar,
    runtime_provider: Option<&'a dyn RuntimeProvider>,
) -> Result<Node, Error> {
    debug!("parsing {}", name);

    let mut parser = Parser::new(name, tokens, grammar, runtime_provider)?;
    let root = parser.parse_root()?;

    debug!("parsed {} into {} with {} children", name, root.name, root.children.len());
    Ok(root)
}

/// Parses ECAL source text.
pub fn parse(name: &str, input: &str) -> Result<Node, Error> {
    parse_tokens(name, lex(name, input), &GRAMMAR, None)
}

/// Parses ECAL source text and attaches a runtime payload to every node.
pub fn parse_with_runtime(name: &str, input: &str, runtime_provider: &dyn RuntimeProvider) -> Result<Node, Error> {
    parse_tokens(name, lex(name, input), &GRAMMAR, Some(runtime_provider))
}
