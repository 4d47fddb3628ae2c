use crate::{ast::ast::Node, errors::errors::Error, lexer::tokens::TokenKind};

use super::{lookups::BindingPower, parser::Parser};

/// `import "<path>" as <identifier>`
pub fn parse_import(parser: &mut Parser<'_>, mut import: Node) -> Result<Node, Error> {
    parser.accept_child(&mut import, TokenKind::String)?;
    parser.skip_token(&[TokenKind::As])?;
    parser.accept_child(&mut import, TokenKind::Identifier)?;
    Ok(import)
}

/// `sink <name> <clause>, <clause> ... { <statements> }`
pub fn parse_sink(parser: &mut Parser<'_>, mut sink: Node) -> Result<Node, Error> {
    parser.accept_child(&mut sink, TokenKind::Identifier)?;

    while !parser.current_is(TokenKind::OpenCurly) {
        let mut clause = parser.run(BindingPower::PRIMARY)?;
        parser.skip_comma(&mut clause)?;
        sink.children.push(clause);
    }

    parse_inner_statements(parser, &mut sink)?;
    Ok(sink)
}

/// `func <name>(<params>) { <statements> }`
pub fn parse_func(parser: &mut Parser<'_>, mut function: Node) -> Result<Node, Error> {
    parser.accept_child(&mut function, TokenKind::Identifier)?;

    parser.skip_token(&[TokenKind::OpenParen])?;
    let mut params = parser.new_node(TokenKind::Params, None)?;

    while !parser.current_is(TokenKind::CloseParen) {
        // Parameters may carry a default value: `b=1`
        let mut param = parser.run(BindingPower::DEFAULT)?;
        parser.skip_comma(&mut param)?;
        params.children.push(param);
    }

    parser.skip_closing(TokenKind::CloseParen, &mut params)?;
    function.children.push(params);

    parse_inner_statements(parser, &mut function)?;
    Ok(function)
}

/// `return` with an optional value, which has to start on the same line.
pub fn parse_return(parser: &mut Parser<'_>, mut ret: Node) -> Result<Node, Error> {
    let has_value = parser.current().line() == ret.line()
        && !parser
            .current()
            .token
            .as_ref()
            .is_some_and(|token| token.is_one_of_many(&[TokenKind::CloseCurly, TokenKind::Semicolon, TokenKind::EOF]));

    if has_value {
        let value = parser.run(BindingPower::DEFAULT)?;
        ret.children.push(value);
    }

    Ok(ret)
}

/// A `{ ... }` block. The statements node is appended to `owner`, which also
/// receives the comments following the closing bracket.
pub fn parse_inner_statements(parser: &mut Parser<'_>, owner: &mut Node) -> Result<(), Error> {
    parser.skip_token(&[TokenKind::OpenCurly])?;

    let mut body = parser.new_node(TokenKind::Statements, None)?;
    parser.collect_statements(&mut body, TokenKind::CloseCurly)?;

    parser.skip_closing(TokenKind::CloseCurly, owner)?;
    owner.children.push(body);
    Ok(())
}
