use crate::{ast::ast::Node, errors::errors::Error, lexer::tokens::TokenKind};

use super::{lookups::BindingPower, parser::Parser};

/// A token which is an expression by itself.
pub fn parse_term(_: &mut Parser<'_>, node: Node) -> Result<Node, Error> {
    Ok(node)
}

/// A bracketed expression. The brackets do not appear in the tree.
pub fn parse_inner(parser: &mut Parser<'_>, open: Node) -> Result<Node, Error> {
    let mut expr = parser.run(BindingPower::DEFAULT)?;

    let mut meta = open.meta;
    meta.append(&mut expr.meta);
    expr.meta = meta;

    parser.skip_closing(TokenKind::CloseParen, &mut expr)?;
    Ok(expr)
}

pub fn parse_prefix(parser: &mut Parser<'_>, mut operator: Node) -> Result<Node, Error> {
    let operand = parser.run(operator.binding.prefix_operand())?;
    operator.children.push(operand);
    Ok(operator)
}

pub fn parse_infix(parser: &mut Parser<'_>, mut operator: Node, left: Node) -> Result<Node, Error> {
    let right = parser.run(operator.binding)?;
    operator.children.push(left);
    operator.children.push(right);
    Ok(operator)
}

/// An identifier with its suffixes: `a.b`, `a(x, y)` and `a[x]`, chained
/// arbitrarily. Each member becomes the last child of the member before it.
///
/// An opening `[` continues the chain only on the line of the identifier
/// which starts it, on a later line it starts a list.
pub fn parse_identifier(parser: &mut Parser<'_>, identifier: Node) -> Result<Node, Error> {
    let line = identifier.line();
    let mut chain = vec![identifier];

    let result = parse_identifier_chain(parser, &mut chain, line);
    for _ in 1..chain.len() {
        parser.leave();
    }
    result?;

    let mut member = chain.pop().unwrap_or_default();
    while let Some(mut parent) = chain.pop() {
        parent.children.push(member);
        member = parent;
    }

    Ok(member)
}

fn parse_identifier_chain(parser: &mut Parser<'_>, chain: &mut Vec<Node>, line: u32) -> Result<(), Error> {
    loop {
        let suffix = match parser.current_kind() {
            Some(TokenKind::Dot) => {
                parser.enter()?;
                parser.skip_token(&[TokenKind::Dot])?;
                let member = parser.expect(TokenKind::Identifier)?;
                chain.push(member);
                continue;
            }
            Some(TokenKind::OpenParen) => parse_func_call(parser)?,
            Some(TokenKind::OpenBracket) if parser.current().line() == line => parse_composition_access(parser)?,
            _ => return Ok(()),
        };

        if let Some(member) = chain.last_mut() {
            member.children.push(suffix);
        }
    }
}

fn parse_func_call(parser: &mut Parser<'_>) -> Result<Node, Error> {
    parser.skip_token(&[TokenKind::OpenParen])?;
    let mut call = parser.new_node(TokenKind::FuncCall, None)?;

    while !parser.current_is(TokenKind::CloseParen) {
        let mut arg = parser.run(BindingPower::DEFAULT)?;
        parser.skip_comma(&mut arg)?;
        call.children.push(arg);
    }

    parser.skip_closing(TokenKind::CloseParen, &mut call)?;
    Ok(call)
}

fn parse_composition_access(parser: &mut Parser<'_>) -> Result<Node, Error> {
    parser.skip_token(&[TokenKind::OpenBracket])?;
    let mut access = parser.new_node(TokenKind::CompAccess, None)?;

    let index = parser.run(BindingPower::DEFAULT)?;
    access.children.push(index);

    parser.skip_closing(TokenKind::CloseBracket, &mut access)?;
    Ok(access)
}

/// Comma separated expressions up to `close`. Missing commas are tolerated.
fn parse_collection(parser: &mut Parser<'_>, open: Node, kind: TokenKind, close: TokenKind) -> Result<Node, Error> {
    let mut collection = parser.new_node(kind, open.token)?;
    collection.meta = open.meta;

    while !parser.current_is(close) {
        let mut item = parser.run(BindingPower::DEFAULT)?;
        parser.skip_comma(&mut item)?;
        collection.children.push(item);
    }

    parser.skip_closing(close, &mut collection)?;
    Ok(collection)
}

/// A list literal `[a, b]`.
pub fn parse_list(parser: &mut Parser<'_>, open: Node) -> Result<Node, Error> {
    parse_collection(parser, open, TokenKind::List, TokenKind::CloseBracket)
}

/// A map literal `{k : v, ...}`.
pub fn parse_map(parser: &mut Parser<'_>, open: Node) -> Result<Node, Error> {
    parse_collection(parser, open, TokenKind::Map, TokenKind::CloseCurly)
}
