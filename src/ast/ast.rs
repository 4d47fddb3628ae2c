use std::{
    any::Any,
    fmt::{Debug, Display},
};

use crate::{
    lexer::tokens::{Token, TokenKind},
    parser::lookups::{BindingPower, LedHandler, NudHandler},
};

use super::names;

/// Comment Metadata Kinds
///
/// A pre-comment (`/* ... */`) belongs to the node that follows it, a
/// post-comment (`# ...`) to the node before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaDataKind {
    PreComment,
    PostComment,
}

/// A comment attached to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaData {
    pub kind: MetaDataKind,
    pub value: String,
}

impl MetaData {
    pub fn new(kind: MetaDataKind, value: String) -> Self {
        MetaData { kind, value }
    }
}

/// Runtime Trait
///
/// An opaque payload a later stage attaches to each node. The parser never
/// looks inside it.
pub trait Runtime: Debug + Send + Sync {
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
}

/// Runtime Provider Trait
///
/// Invoked once for every node the parser instantiates, right after the node
/// got its token.
pub trait RuntimeProvider {
    fn runtime(&self, node: &Node) -> Box<dyn Runtime>;
}

/// AST Node
///
/// A node carries copies of the binding power and handlers of the grammar
/// production it was instantiated from. Synthetic containers (statement
/// lists, call arguments, parameter lists, composition access) have no token.
#[derive(Default)]
pub struct Node {
    pub name: &'static str,
    pub token: Option<Token>,
    pub children: Vec<Node>,
    pub meta: Vec<MetaData>,
    pub runtime: Option<Box<dyn Runtime>>,
    pub binding: BindingPower,
    pub nud: Option<NudHandler>,
    pub led: Option<LedHandler>,
}

impl Node {
    /// The literal text of the originating token, empty for synthetic nodes.
    pub fn value(&self) -> &str {
        self.token.as_ref().map_or("", |token| token.value.as_str())
    }

    pub fn kind(&self) -> Option<TokenKind> {
        self.token.as_ref().map(|token| token.kind)
    }

    /// Line of the originating token; 0 when there is none.
    pub fn line(&self) -> u32 {
        self.token.as_ref().map_or(0, |token| token.position.line)
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn has_value(&self) -> bool {
        matches!(self.name, names::STRING | names::NUMBER | names::IDENTIFIER)
    }

    pub fn pre_comments(&self) -> impl Iterator<Item = &MetaData> {
        self.meta.iter().filter(|m| m.kind == MetaDataKind::PreComment)
    }

    pub fn post_comments(&self) -> impl Iterator<Item = &MetaData> {
        self.meta.iter().filter(|m| m.kind == MetaDataKind::PostComment)
    }

    /// Downcasts the runtime payload, if there is one of the requested type.
    pub fn runtime_as<T: 'static>(&self) -> Option<&T> {
        self.runtime.as_ref().and_then(|rt| rt.as_any().downcast_ref::<T>())
    }

    fn dump(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        write!(f, "{}", "  ".repeat(depth))?;

        match self.name {
            names::STRING => write!(f, "{}: '{}'", self.name, self.value())?,
            names::NUMBER | names::IDENTIFIER => write!(f, "{}: {}", self.name, self.value())?,
            _ => write!(f, "{}", self.name)?,
        }

        for meta in &self.meta {
            match meta.kind {
                MetaDataKind::PreComment => write!(f, " /*{}*/", meta.value)?,
                MetaDataKind::PostComment => write!(f, " #{}", meta.value)?,
            }
        }
        writeln!(f)?;

        for child in &self.children {
            child.dump(f, depth + 1)?;
        }

        Ok(())
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.dump(f, 0)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("token", &self.token)
            .field("children", &self.children)
            .field("meta", &self.meta)
            .field("runtime", &self.runtime)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

/// Structural equality: names, leaf values, children and comments. Token
/// positions and runtime payloads are ignored.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && (!self.has_value() || self.value() == other.value())
            && self.children == other.children
            && self.meta == other.meta
    }
}
