use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::{ast::ast::Node, ast::names, errors::errors::PrintError};

lazy_static! {
    /// Output templates keyed by node name, or by `<name>_<number of children>`
    /// for nodes with children. Statements, identifier chains, call arguments,
    /// collections, functions and sinks are laid out by the printer itself.
    pub static ref TEMPLATES: HashMap<String, &'static str> = {
        let mut map = HashMap::new();
        let mut add = |name: &str, arity: usize, template: &'static str| {
            let key = if arity == 0 { String::from(name) } else { format!("{}_{}", name, arity) };
            map.insert(key, template);
        };

        add(names::STRING, 0, "{qval}");
        add(names::NUMBER, 0, "{val}");
        add(names::COMPACCESS, 1, "[{c1}]");

        add(names::ASSIGN, 2, "{c1} := {c2}");
        add(names::IMPORT, 2, "import {c1} as {c2}");

        // Arithmetic
        add(names::PLUS, 1, "+{c1}");
        add(names::PLUS, 2, "{c1} + {c2}");
        add(names::MINUS, 1, "-{c1}");
        add(names::MINUS, 2, "{c1} - {c2}");
        add(names::TIMES, 2, "{c1} * {c2}");
        add(names::DIV, 2, "{c1} / {c2}");
        add(names::MODINT, 2, "{c1} % {c2}");
        add(names::DIVINT, 2, "{c1} // {c2}");

        add(names::RETURN, 0, "return");
        add(names::RETURN, 1, "return {c1}");

        // Boolean operators
        add(names::OR, 2, "{c1} or {c2}");
        add(names::AND, 2, "{c1} and {c2}");
        add(names::NOT, 1, "not {c1}");

        // Conditions
        add(names::LIKE, 2, "{c1} like {c2}");
        add(names::IN, 2, "{c1} in {c2}");
        add(names::HASPREFIX, 2, "{c1} hasprefix {c2}");
        add(names::HASSUFFIX, 2, "{c1} hassuffix {c2}");
        add(names::NOTIN, 2, "{c1} notin {c2}");

        add(names::GEQ, 2, "{c1} >= {c2}");
        add(names::LEQ, 2, "{c1} <= {c2}");
        add(names::NEQ, 2, "{c1} != {c2}");
        add(names::EQ, 2, "{c1} == {c2}");
        add(names::GT, 2, "{c1} > {c2}");
        add(names::LT, 2, "{c1} < {c2}");

        add(names::KVP, 2, "{c1} : {c2}");
        add(names::PRESET, 2, "{c1}={c2}");

        // Sink clauses
        add(names::KINDMATCH, 1, "kindmatch {c1}");
        add(names::SCOPEMATCH, 1, "scopematch {c1}");
        add(names::STATEMATCH, 1, "statematch {c1}");
        add(names::PRIORITY, 1, "priority {c1}");
        add(names::SUPPRESSES, 1, "suppresses {c1}");

        // Constants
        add(names::TRUE, 0, "true");
        add(names::FALSE, 0, "false");
        add(names::NULL, 0, "null");

        map
    };

    static ref PLACEHOLDER: Regex = Regex::new(r"\{(c[0-9]+|val|qval)\}")
        .unwrap_or_else(|e| panic!("invalid placeholder pattern: {}", e));
}

/// Template key of a node: its name, plus the number of its children if it has any.
pub fn template_key(node: &Node) -> String {
    if node.children.is_empty() {
        String::from(node.name)
    } else {
        format!("{}_{}", node.name, node.children.len())
    }
}

/// Renders `node` with its template. `children` holds the already printed children.
pub fn render(node: &Node, children: &[String]) -> Result<String, PrintError> {
    let key = template_key(node);
    let Some(template) = TEMPLATES.get(&key) else {
        return Err(PrintError::MissingTemplate { name: String::from(node.name), key });
    };

    let mut params: HashMap<String, String> = children
        .iter()
        .enumerate()
        .map(|(i, child)| (format!("c{}", i + 1), child.clone()))
        .collect();

    if let Some(token) = &node.token {
        params.insert(String::from("val"), token.value.clone());
        params.insert(String::from("qval"), quote(&token.value));
    }

    if PLACEHOLDER.captures_iter(template).any(|caps| !params.contains_key(&caps[1])) {
        return Err(PrintError::MissingToken { name: String::from(node.name) });
    }

    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures| params[&caps[1]].clone());
    Ok(rendered.into_owned())
}

/// Double-quoted string literal which the lexer reads back to `value`.
pub fn quote(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');

    for ch in value.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            c if c.is_control() => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }

    result.push('"');
    result
}
