//! Identifier helpers for generated code.

/// Convert an entry name to camelCase (e.g., "ShowProduct" -> "showProduct").
///
/// Underscores, dashes and spaces act as word separators. A leading run of
/// capitals is lowered as one word, so "URLRedirect" becomes "urlRedirect".
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let chars: Vec<char> = pascal.chars().collect();

    let mut upper_run = chars.iter().take_while(|c| c.is_uppercase()).count();
    // keep the capital that starts the next word ("URLRedirect" -> "url" + "Redirect")
    if upper_run > 1 && upper_run < chars.len() && chars[upper_run].is_lowercase() {
        upper_run -= 1;
    }
    let upper_run = upper_run.max(1).min(chars.len());

    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < upper_run { c.to_ascii_lowercase() } else { *c })
        .collect()
}

/// Convert a string to PascalCase (e.g., "show_product" -> "ShowProduct")
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-', ' '])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Returns true if `s` is usable as a plain JavaScript identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
