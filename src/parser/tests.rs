//! Unit tests for the parser module.
//!
//! This module contains tests for parsing language constructs including:
//! - Operator precedence and associativity
//! - Statement sequencing
//! - Identifier chains, collections, imports, sinks and functions
//! - Comment attachment
//! - Error reporting
//! - The lookahead window and custom grammars

use std::{any::Any, cell::Cell};

use super::{
    lookahead::LookaheadWindow,
    lookups::{BindingPower, Grammar},
    parser::{parse, parse_tokens, parse_with_runtime},
};
use crate::{
    ast::ast::{Node, Runtime, RuntimeProvider},
    errors::errors::ErrorImpl,
    lexer::{
        lexer::lex,
        tokens::{Token, TokenKind},
    },
    parser::expr::{parse_infix, parse_prefix},
    Position,
};

fn dump(input: &str) -> String {
    parse("mytest", input).unwrap().to_string()
}

fn error(input: &str) -> String {
    parse("mytest", input).unwrap_err().to_string()
}

#[test]
fn test_parse_precedence() {
    assert_eq!(
        dump("a + b * 5 / 2"),
        "plus
  identifier: a
  div
    times
      identifier: b
      number: 5
    number: 2
"
    );
}

#[test]
fn test_parse_left_associativity() {
    assert_eq!(
        dump("a - b - c"),
        "minus
  minus
    identifier: a
    identifier: b
  identifier: c
"
    );
}

#[test]
fn test_parse_prefix_operators() {
    assert_eq!(
        dump(" + a - -5"),
        "minus
  plus
    identifier: a
  minus
    number: 5
"
    );
}

#[test]
fn test_parse_grouping() {
    assert_eq!(
        dump("a // 5 % (50 + 1)"),
        "modint
  divint
    identifier: a
    number: 5
  plus
    number: 50
    number: 1
"
    );
}

#[test]
fn test_parse_logical_expression() {
    assert_eq!(
        dump("not (a + 1) * 5 and tRue or not 1 - 5 != '!test'"),
        "or
  and
    not
      times
        plus
          identifier: a
          number: 1
        number: 5
    true
  not
    !=
      minus
        number: 1
        number: 5
      string: '!test'
"
    );
}

#[test]
fn test_parse_conditions() {
    assert_eq!(
        dump("a hasPrefix 'a' and 3 notin x"),
        "and
  hasprefix
    identifier: a
    string: 'a'
  notin
    number: 3
    identifier: x
"
    );
}

#[test]
fn test_parse_statement_sequence() {
    let root = parse("mytest", "a := 1\nb := 2; c := 3").unwrap();

    assert_eq!(root.name, "statements");
    assert_eq!(root.children.len(), 3);
    assert!(root.children.iter().all(|child| child.name == ":="));
    assert_eq!(root.children[0].children[0].value(), "a");
    assert_eq!(root.children[1].children[0].value(), "b");
    assert_eq!(root.children[2].children[0].value(), "c");
}

#[test]
fn test_parse_separators_are_tolerated() {
    let root = parse("mytest", "a := 1;").unwrap();
    assert_eq!(root.name, ":=");

    let root = parse("mytest", "a;;b;").unwrap();
    assert_eq!(root.name, "statements");
    assert_eq!(root.children.len(), 2);
}

#[test]
fn test_parse_newline_ends_statement() {
    assert_eq!(
        dump("a := 1\n(b)"),
        "statements
  :=
    identifier: a
    number: 1
  identifier: b
"
    );
}

#[test]
fn test_parse_empty_input() {
    let root = parse("mytest", "  \n ").unwrap();

    assert_eq!(root.name, "statements");
    assert!(root.children.is_empty());
    assert!(root.token.is_none());
}

#[test]
fn test_parse_import() {
    assert_eq!(
        dump("import \"foo/bar.ecal\" as foobar\n\ti := foobar"),
        "statements
  import
    string: 'foo/bar.ecal'
    identifier: foobar
  :=
    identifier: i
    identifier: foobar
"
    );
}

#[test]
fn test_parse_identifier_chain() {
    assert_eq!(
        dump("a.b(1, 2)[3].c"),
        "identifier: a
  identifier: b
    funccall
      number: 1
      number: 2
    compaccess
      number: 3
    identifier: c
"
    );
}

#[test]
fn test_parse_function_call_without_commas() {
    assert_eq!(
        dump("foo(1 2)(x)"),
        "identifier: foo
  funccall
    number: 1
    number: 2
  funccall
    identifier: x
"
    );
}

#[test]
fn test_parse_composition_access_on_next_line_is_a_list() {
    let root = parse("mytest", "a\n[1]").unwrap();

    assert_eq!(root.name, "statements");
    assert_eq!(root.children[0].name, "identifier");
    assert!(root.children[0].children.is_empty());
    assert_eq!(root.children[1].name, "list");
}

#[test]
fn test_parse_collections() {
    assert_eq!(
        dump("x := {\"a\" : 1, \"b\" : [1, 2]}"),
        ":=
  identifier: x
  map
    kvp
      string: 'a'
      number: 1
    kvp
      string: 'b'
      list
        number: 1
        number: 2
"
    );
}

#[test]
fn test_parse_sink() {
    let input = "sink mysink\n    kindmatch [ \"foo.bar.*\" ],\n    priority 0\n    {\n        a := 1\n    }";

    assert_eq!(
        dump(input),
        "sink
  identifier: mysink
  kindmatch
    list
      string: 'foo.bar.*'
  priority
    number: 0
  statements
    :=
      identifier: a
      number: 1
"
    );
}

#[test]
fn test_parse_function() {
    assert_eq!(
        dump("func foo(a, b=1) {\n  return a + b\n}"),
        "function
  identifier: foo
  params
    identifier: a
    preset
      identifier: b
      number: 1
  statements
    return
      plus
        identifier: a
        identifier: b
"
    );
}

#[test]
fn test_parse_return_without_value() {
    let root = parse("mytest", "func f() { return }").unwrap();
    let body = &root.children[2];
    assert_eq!(body.children[0].name, "return");
    assert!(body.children[0].children.is_empty());

    let root = parse("mytest", "func f() {\n  return\n  a\n}").unwrap();
    let body = &root.children[2];
    assert_eq!(body.children.len(), 2);
    assert!(body.children[0].children.is_empty());
}

#[test]
fn test_parse_empty_block() {
    let root = parse("mytest", "func f() {}").unwrap();

    assert_eq!(root.children[1].name, "params");
    assert_eq!(root.children[2].name, "statements");
    assert!(root.children[2].children.is_empty());
}

#[test]
fn test_parse_comments() {
    assert_eq!(
        dump("/* lead */ a := 1 # trailing\nb := 2"),
        "statements
  :=
    identifier: a /* lead */
    number: 1 # trailing
  :=
    identifier: b
    number: 2
"
    );
}

#[test]
fn test_parse_comments_around_skipped_tokens() {
    // Comments after a closing bracket stay with the bracketed expression,
    // comments in front of it move on
    let root = parse("mytest", "(a /* x */) # after\n").unwrap();
    assert_eq!(root.to_string(), "statements /* x */\n  identifier: a # after\n");

    let root = parse("mytest", "a := 1 /* next */\n").unwrap();
    assert_eq!(root.name, "statements");
    assert_eq!(root.to_string(), "statements /* next */\n  :=\n    identifier: a\n    number: 1\n");
}

#[test]
fn test_parse_comment_after_comma_stays_with_item() {
    assert_eq!(dump("[1, # c\n 2]"), "list\n  number: 1 # c\n  number: 2\n");
    assert_eq!(
        dump("f(a, # c\n b)"),
        "identifier: f\n  funccall\n    identifier: a # c\n    identifier: b\n"
    );
}

#[test]
fn test_parse_comment_on_chain_member() {
    assert_eq!(
        dump("a.b # c\n.c"),
        "identifier: a\n  identifier: b # c\n    identifier: c\n"
    );
}

#[test]
fn test_parse_leading_post_comment_becomes_pre_comment() {
    assert_eq!(dump("# header\na"), "identifier: a /* header*/\n");
}

#[test]
fn test_parse_error_unexpected_end() {
    assert_eq!(error("a *"), "Parse error in mytest: Unexpected end");
    assert_eq!(error("f(a"), "Parse error in mytest: Unexpected end");

    let err = parse("mytest", "a *").unwrap_err();
    assert_eq!(err.kind(), ErrorImpl::UnexpectedEnd);
    assert!(err.get_position().is_null());
}

#[test]
fn test_parse_error_impossible_null_denotation() {
    assert_eq!(
        error("not =="),
        "Parse error in mytest: Term cannot start an expression (==) (Line:1 Pos:5)"
    );
    assert_eq!(
        error("(==)"),
        "Parse error in mytest: Term cannot start an expression (==) (Line:1 Pos:2)"
    );
}

#[test]
fn test_parse_error_impossible_left_denotation() {
    assert_eq!(
        error("5 ( 5"),
        "Parse error in mytest: Term can only start an expression (() (Line:1 Pos:3)"
    );
}

#[test]
fn test_parse_error_lexical() {
    assert_eq!(
        error(r#""bl\*a"conversion"#),
        "Parse error in mytest: Lexical error (invalid syntax while parsing string) (Line:1 Pos:1)"
    );
    assert_eq!(
        error("5 + \""),
        "Parse error in mytest: Lexical error (Unexpected end while reading string value (unclosed quotes)) (Line:1 Pos:5)"
    );
}

#[test]
fn test_parse_error_extra_token() {
    let err = parse("mytest", "a b").unwrap_err();

    assert_eq!(err.kind(), ErrorImpl::UnexpectedEnd);
    assert_eq!(err.detail(), "extra token id:Identifier (\"b\")");
    assert_eq!(*err.get_position(), Position::new(1, 3));
}

#[test]
fn test_parse_error_unexpected_token() {
    let err = parse("mytest", "import foo as bar").unwrap_err();

    assert_eq!(err.kind(), ErrorImpl::UnexpectedToken);
    assert_eq!(
        err.to_string(),
        "Parse error in mytest: Unexpected term (foo) (Line:1 Pos:8)"
    );
}

#[test]
fn test_lookahead_window() {
    let tokens = (1..10).map(|i| Token {
        kind: TokenKind::Number,
        value: i.to_string(),
        position: Position::new(1, i),
    });
    let mut window = LookaheadWindow::new(tokens, 3);

    assert_eq!(window.next().unwrap().value, "1");
    assert_eq!(window.next().unwrap().value, "2");

    assert_eq!(window.peek(0).unwrap().value, "3");
    assert_eq!(window.peek(1).unwrap().value, "4");
    assert_eq!(window.peek(2).unwrap().value, "5");
    assert!(window.peek(3).is_none());

    let rest: Vec<String> = std::iter::from_fn(|| window.next()).map(|t| t.value).collect();
    assert_eq!(rest, vec!["3", "4", "5", "6", "7", "8", "9"]);
    assert!(window.next().is_none());
}

#[test]
fn test_lookahead_window_zero_capacity() {
    let mut window = LookaheadWindow::new(std::iter::empty(), 0);

    assert_eq!(window.capacity(), 1);
    assert!(window.peek(0).is_none());
    assert!(window.next().is_none());
}

#[test]
fn test_lookahead_window_stops_at_eof() {
    let polled = Cell::new(0);
    let tokens = lex("mytest", "1 2").chain(lex("mytest", "3")).inspect(|_| polled.set(polled.get() + 1));

    let mut window = LookaheadWindow::new(tokens, 10);
    assert_eq!(polled.get(), 3);
    assert_eq!(window.peek(2).unwrap().kind, TokenKind::EOF);
    assert!(window.peek(3).is_none());

    while window.next().is_some() {}
    assert_eq!(polled.get(), 3);
}

#[test]
fn test_parse_custom_grammar() {
    let mut grammar = Grammar::new();
    grammar.term(TokenKind::EOF, "EOF");
    grammar.term(TokenKind::Number, "number");
    grammar.led(TokenKind::Plus, "sum", BindingPower(10), parse_infix);
    grammar.nud(TokenKind::Minus, "neg", BindingPower(10), parse_prefix);

    let root = parse_tokens("custom", lex("custom", "-1 + 2"), &grammar, None).unwrap();
    assert_eq!(root.to_string(), "sum\n  neg\n    number: 1\n  number: 2\n");

    let err = parse_tokens("custom", lex("custom", "1 * 2"), &grammar, None).unwrap_err();
    assert_eq!(err.kind(), ErrorImpl::UnknownToken);
    assert_eq!(err.to_string(), "Parse error in custom: Unknown term (id:Times (*)) (Line:1 Pos:3)");
}

#[derive(Debug)]
struct NameRuntime(&'static str);

impl Runtime for NameRuntime {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct CountingProvider {
    created: Cell<usize>,
}

impl RuntimeProvider for CountingProvider {
    fn runtime(&self, node: &Node) -> Box<dyn Runtime> {
        self.created.set(self.created.get() + 1);
        Box::new(NameRuntime(node.name))
    }
}

#[test]
fn test_parse_with_runtime() {
    let provider = CountingProvider { created: Cell::new(0) };
    let root = parse_with_runtime("mytest", "a := foo(1)", &provider).unwrap();

    assert_eq!(root.runtime_as::<NameRuntime>().unwrap().0, ":=");
    let call = &root.children[1].children[0];
    assert_eq!(call.runtime_as::<NameRuntime>().unwrap().0, "funccall");

    // a, :=, foo, (, funccall, 1, ), EOF
    assert_eq!(provider.created.get(), 8);

    let plain = parse("mytest", "a := foo(1)").unwrap();
    assert!(plain.runtime.is_none());
    assert_eq!(plain, root);
}

#[test]
fn test_parse_nesting_limit() {
    let brackets = |depth: usize| format!("{}a{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(dump(&brackets(50)), "identifier: a\n");
    assert_eq!(
        error(&brackets(1000)),
        "Parse error in mytest: Nesting too deep (more than 100 levels) (Line:1 Pos:101)"
    );

    let prefixes = format!("{}a", "not ".repeat(1000));
    assert_eq!(parse("mytest", &prefixes).unwrap_err().kind(), ErrorImpl::NestingTooDeep);

    let chain = format!("a{}", ".b".repeat(1000));
    assert_eq!(parse("mytest", &chain).unwrap_err().kind(), ErrorImpl::NestingTooDeep);
}
