//! Semantic node names shared by the grammar table and the pretty printer.

// Leaves and synthetic containers
pub const EOF: &str = "EOF";
pub const STRING: &str = "string";
pub const NUMBER: &str = "number";
pub const IDENTIFIER: &str = "identifier";
pub const STATEMENTS: &str = "statements";
pub const FUNCCALL: &str = "funccall";
pub const COMPACCESS: &str = "compaccess";
pub const LIST: &str = "list";
pub const MAP: &str = "map";
pub const PARAMS: &str = "params";

// Comparison
pub const GEQ: &str = ">=";
pub const LEQ: &str = "<=";
pub const NEQ: &str = "!=";
pub const EQ: &str = "==";
pub const GT: &str = ">";
pub const LT: &str = "<";

pub const KVP: &str = "kvp";
pub const PRESET: &str = "preset";
pub const ASSIGN: &str = ":=";

// Arithmetic
pub const PLUS: &str = "plus";
pub const MINUS: &str = "minus";
pub const TIMES: &str = "times";
pub const DIV: &str = "div";
pub const DIVINT: &str = "divint";
pub const MODINT: &str = "modint";

// Statements
pub const IMPORT: &str = "import";
pub const SINK: &str = "sink";
pub const KINDMATCH: &str = "kindmatch";
pub const SCOPEMATCH: &str = "scopematch";
pub const STATEMATCH: &str = "statematch";
pub const PRIORITY: &str = "priority";
pub const SUPPRESSES: &str = "suppresses";
pub const FUNCTION: &str = "function";
pub const RETURN: &str = "return";

// Boolean operators and conditions
pub const AND: &str = "and";
pub const OR: &str = "or";
pub const NOT: &str = "not";
pub const LIKE: &str = "like";
pub const IN: &str = "in";
pub const HASPREFIX: &str = "hasprefix";
pub const HASSUFFIX: &str = "hassuffix";
pub const NOTIN: &str = "notin";

// Constants
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";
pub const NULL: &str = "null";

/// Operators written between their two operands.
pub fn is_infix_operator(name: &str) -> bool {
    matches!(
        name,
        ASSIGN
            | PLUS
            | MINUS
            | TIMES
            | DIV
            | DIVINT
            | MODINT
            | AND
            | OR
            | LIKE
            | IN
            | HASPREFIX
            | HASSUFFIX
            | NOTIN
            | GEQ
            | LEQ
            | NEQ
            | EQ
            | GT
            | LT
            | KVP
            | PRESET
    )
}

/// Operators written in front of their single operand.
pub fn is_prefix_operator(name: &str) -> bool {
    matches!(
        name,
        PLUS | MINUS | NOT | KINDMATCH | SCOPEMATCH | STATEMATCH | PRIORITY | SUPPRESSES
    )
}
