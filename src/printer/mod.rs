//! Pretty printer module.
//!
//! Renders a parsed tree back into canonical ECAL source:
//!
//! - Templates per node name and number of children
//! - Block layout for statement lists, functions and sinks
//! - Brackets only where the binding powers require them
//! - Comments re-attached on the side they were found

pub mod printer;
pub mod templates;
