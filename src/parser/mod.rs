//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a tree of nodes. It uses a Pratt parser for expressions with
//! binding powers for precedence and handles:
//!
//! - Statement sequencing (`;` or a line break between statements)
//! - Expression parsing (prefix and binary operators, grouping, literals)
//! - Identifier chains, imports, sinks and functions
//! - Attaching comments to the nodes they belong to
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! which are looked up in a grammar table by token kind.

pub mod expr;
pub mod lookahead;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
