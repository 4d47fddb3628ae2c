//! Pretty printer turning a node tree back into ECAL source.
//!
//! Children are printed before their parent and substituted into the
//! parent's template. Brackets, which the parser drops, are put back
//! wherever the binding powers would otherwise regroup the operands.

use log::debug;

use crate::{
    ast::{
        ast::Node,
        names,
    },
    errors::errors::PrintError,
};

use super::templates;

/// Configuration for the pretty printer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatConfig {
    /// Indentation string for one block level (default: 4 spaces).
    pub indent: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: String::from("    "),
        }
    }
}

impl FormatConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation string.
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

struct Printer<'c> {
    config: &'c FormatConfig,
}

impl Printer<'_> {
    fn indent(&self, level: usize) -> String {
        self.config.indent.repeat(level)
    }

    /// `level` is the block depth, it only grows inside function and sink bodies.
    fn visit(&self, node: &Node, level: usize) -> Result<String, PrintError> {
        if node.name == names::IDENTIFIER {
            // Comments of a chain member sit between the member and its suffixes
            return self.identifier(node, level);
        }

        let text = self.render(node, level)?;
        Ok(with_meta(node, text))
    }

    /// Renders a node without its own comments.
    fn render(&self, node: &Node, level: usize) -> Result<String, PrintError> {
        let mut children = Vec::with_capacity(node.children.len());

        for (i, child) in node.children.iter().enumerate() {
            let child_level = if is_block_owner(node) && child.name == names::STATEMENTS {
                level + 1
            } else {
                level
            };

            let mut text = self.visit(child, child_level)?;
            if needs_brackets(node, child, i) {
                text = format!("({})", text);
            }
            children.push(text);
        }

        match node.name {
            names::STATEMENTS => Ok(self.statements(&children, level)),
            names::FUNCCALL => Ok(children.join(", ")),
            names::LIST => Ok(format!("[{}]", children.join(", "))),
            names::MAP => Ok(format!("{{{}}}", children.join(", "))),
            names::PARAMS => Ok(format!("({})", children.join(", "))),
            names::FUNCTION => self.function(node, &children, level),
            names::SINK => self.sink(node, &children, level),
            _ => templates::render(node, &children),
        }
    }

    /// `a.b(c)[d]`
    fn identifier(&self, node: &Node, level: usize) -> Result<String, PrintError> {
        let mut result = with_meta(node, String::from(node.value()));

        for child in &node.children {
            match child.name {
                names::IDENTIFIER => {
                    result.push('.');
                    result.push_str(&self.visit(child, level)?);
                }
                names::FUNCCALL => {
                    let arguments = format!("({})", self.render(child, level)?);
                    result.push_str(&with_meta(child, arguments));
                }
                _ => result.push_str(&self.visit(child, level)?),
            }
        }

        Ok(result)
    }

    fn statements(&self, children: &[String], level: usize) -> String {
        let mut result = String::new();

        for child in children {
            result.push_str(&self.indent(level));
            result.push_str(child);
            if !child.ends_with('\n') {
                result.push('\n');
            }
        }

        result
    }

    fn function(&self, node: &Node, children: &[String], level: usize) -> Result<String, PrintError> {
        let [name, params, body] = children else {
            return Err(missing_template(node));
        };

        Ok(format!("func {}{} {{\n{}{}}}", name, params, body, self.indent(level)))
    }

    fn sink(&self, node: &Node, children: &[String], level: usize) -> Result<String, PrintError> {
        let [name, clauses @ .., body] = children else {
            return Err(missing_template(node));
        };

        let mut result = format!("sink {}\n", name);

        for (i, clause) in clauses.iter().enumerate() {
            result.push_str(&self.indent(level + 1));
            result.push_str(clause);
            if i + 1 < clauses.len() {
                result.push(',');
            }
            result.push('\n');
        }

        result.push_str(&format!("{}{{\n{}{}}}", self.indent(level), body, self.indent(level)));
        Ok(result)
    }
}

fn is_block_owner(node: &Node) -> bool {
    matches!(node.name, names::FUNCTION | names::SINK)
}

fn missing_template(node: &Node) -> PrintError {
    PrintError::MissingTemplate {
        name: String::from(node.name),
        key: templates::template_key(node),
    }
}

fn is_infix(node: &Node) -> bool {
    node.children.len() == 2 && names::is_infix_operator(node.name)
}

fn is_prefix(node: &Node) -> bool {
    node.children.len() == 1 && names::is_prefix_operator(node.name)
}

/// Whether `child`, the `index`th operand of `parent`, has to be bracketed so
/// that parsing the output yields the same tree.
fn needs_brackets(parent: &Node, child: &Node, index: usize) -> bool {
    let lower_precedence = is_infix(child)
        && matches!(child.name, names::PLUS | names::MINUS | names::AND | names::OR)
        && parent.binding > child.binding;

    let regrouped = if is_infix(parent) && is_infix(child) {
        // Operators of equal binding power group to the left
        if index == 0 {
            child.binding < parent.binding
        } else {
            child.binding <= parent.binding
        }
    } else if is_infix(parent) && is_prefix(child) && index == 0 {
        // The prefix operand would swallow the parent operator
        parent.binding > child.binding.prefix_operand()
    } else if is_prefix(parent) && is_infix(child) {
        child.binding <= parent.binding.prefix_operand()
    } else {
        false
    };

    lower_precedence || regrouped
}

fn with_meta(node: &Node, text: String) -> String {
    let pre: String = node.pre_comments().map(|meta| format!("/*{}*/ ", meta.value)).collect();

    let mut result = if node.name == names::STATEMENTS {
        // Comments at the end of a statement list
        text + &pre
    } else {
        pre + &text
    };

    for meta in node.post_comments() {
        if !result.ends_with('\n') {
            result.push(' ');
        }
        result.push_str(&format!("#{}\n", meta.value));
    }

    result
}

/// Pretty prints a tree with the default configuration.
pub fn pretty_print(node: &Node) -> Result<String, PrintError> {
    pretty_print_with(node, &FormatConfig::default())
}

/// Pretty prints a tree.
pub fn pretty_print_with(node: &Node, config: &FormatConfig) -> Result<String, PrintError> {
    debug!("pretty printing {} with {} children", node.name, node.children.len());
    Printer { config }.visit(node, 0)
}
