//! JavaScript naming rules for generated controllers.

use rewire_core::{is_identifier, to_camel_case};

const RESERVED_WORDS: &[&str] = &[
    "arguments",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "eval",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "let",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
    // names the controller body itself declares
    "action",
    "pdict",
    "result",
    "target",
];

/// Returns true if `name` cannot be used as a function name.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Local function name for an entry point ("EditAddress" -> "editAddress").
///
/// Reserved words get a leading underscore, characters that are not valid in
/// an identifier become underscores.
pub fn function_name(entry: &str) -> String {
    let camel: String = to_camel_case(entry)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '$' { c } else { '_' })
        .collect();
    if is_reserved(&camel) || !is_identifier(&camel) {
        format!("_{}", camel)
    } else {
        camel
    }
}

/// Single-quoted JavaScript string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Property access suffix: `.name` for identifiers, `['name']` otherwise.
pub fn member(name: &str) -> String {
    if is_identifier(name) {
        format!(".{}", name)
    } else {
        format!("[{}]", string_literal(name))
    }
}

/// Object literal key: bare for identifiers, quoted otherwise.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}
