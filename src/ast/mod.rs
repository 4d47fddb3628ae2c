/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node type, comment metadata and the runtime payload traits
/// - names: Semantic names of the node kinds
pub mod ast;
pub mod names;

#[cfg(test)]
mod tests;
