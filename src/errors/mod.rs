//! Error types and error handling for the parser and printer.
//!
//! This module defines:
//!
//! - The parse error carrying the source name, kind, detail and offending token
//! - The parse error kinds
//! - Suggestions used when rendering diagnostics
//! - Printer consistency errors

pub mod errors;

#[cfg(test)]
mod tests;
