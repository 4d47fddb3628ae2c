use std::any::Any;

use super::{
    ast::{MetaData, MetaDataKind, Node, Runtime},
    names,
};
use crate::parse;

#[test]
fn test_node_dump() {
    let root = parse("test.ecal", "x := foo.bar('a') + 1 # c").unwrap();

    assert_eq!(
        root.to_string(),
        ":=
  identifier: x
  plus
    identifier: foo
      identifier: bar
        funccall
          string: 'a'
    number: 1 # c
"
    );
}

#[test]
fn test_node_equality_ignores_positions() {
    let a = parse("one", "a + 1").unwrap();
    let b = parse("two", "\n\n   a   +\n 1").unwrap();
    let c = parse("three", "a + 2").unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.children[0].line(), 1);
    assert_eq!(b.children[0].line(), 3);
}

#[test]
fn test_node_equality_compares_comments() {
    let a = parse("one", "a + 1").unwrap();
    let b = parse("two", "a + /* c */ 1").unwrap();

    assert_ne!(a, b);
    assert_eq!(
        b.children[1].meta,
        vec![MetaData::new(MetaDataKind::PreComment, " c ".to_string())]
    );
    assert_eq!(b.children[1].pre_comments().count(), 1);
    assert_eq!(b.children[1].post_comments().count(), 0);
}

#[test]
fn test_node_accessors() {
    let root = parse("test.ecal", "foo(1)").unwrap();

    assert_eq!(root.value(), "foo");
    assert!(root.has_value());

    let call = &root.children[0];
    assert_eq!(call.name, names::FUNCCALL);
    assert!(call.token.is_none());
    assert_eq!(call.value(), "");
    assert_eq!(call.line(), 0);
    assert!(call.kind().is_none());
}

#[derive(Debug)]
struct Marker;

impl Runtime for Marker {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn test_node_runtime_downcast() {
    let mut node = Node::default();
    assert!(node.runtime_as::<Marker>().is_none());

    node.runtime = Some(Box::new(Marker));
    assert!(node.runtime_as::<Marker>().is_some());
    assert!(node.runtime_as::<String>().is_none());
}

#[test]
fn test_operator_classification() {
    assert!(names::is_infix_operator(names::PLUS));
    assert!(names::is_prefix_operator(names::PLUS));
    assert!(names::is_infix_operator(names::KVP));
    assert!(!names::is_prefix_operator(names::TIMES));
    assert!(names::is_prefix_operator(names::KINDMATCH));
    assert!(!names::is_infix_operator(names::FUNCCALL));
}
