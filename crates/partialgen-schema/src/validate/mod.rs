//! Identifier checks shared by the resolver.

pub mod reserved;

use reserved::is_reserved_word;

/// Maximum length for generated type and member identifiers.
pub const MAX_IDENT_LEN: usize = 512;

/// Ensure an identifier is non-empty, well-formed and not a reserved keyword.
/// A leading '@' marks a verbatim identifier and lifts the keyword check.
pub fn validate_ident(ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err("ident is empty".to_string());
    }
    if ident.len() > MAX_IDENT_LEN {
        return Err(format!("ident '{ident}' exceeds max length {MAX_IDENT_LEN}"));
    }

    let (verbatim, body) = match ident.strip_prefix('@') {
        Some(rest) => (true, rest),
        None => (false, ident),
    };

    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return Err(format!("ident '{ident}' must start with a letter or '_'")),
    }
    if let Some(c) = chars.find(|c| !(c.is_alphanumeric() || *c == '_')) {
        return Err(format!("ident '{ident}' contains invalid character '{c}'"));
    }

    // reserved?
    if !verbatim && is_reserved_word(body) {
        return Err(format!("the word '{ident}' is reserved"));
    }

    Ok(())
}

/// Ensure a namespace is a dot-separated list of identifiers.
pub fn validate_namespace(namespace: &str) -> Result<(), String> {
    namespace
        .split('.')
        .try_for_each(validate_ident)
        .map_err(|reason| format!("namespace '{namespace}': {reason}"))
}
