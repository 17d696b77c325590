//! Identifier value object - a validated Lua binding name

use std::fmt;

use crate::error::{BundleError, BundleResult};

/// Reserved words of Lua 5.1 / Luau that can never name a binding.
pub const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// A name that is legal on the left of `local <name> =`.
///
/// Module names, exported symbols, environment handles, the aggregate root
/// and the dependency-map table are all emitted as bare Lua names, so every
/// one of them goes through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Validate `name`. `context` describes the name in the error message.
    pub fn parse(name: &str, context: &str) -> BundleResult<Self> {
        if is_valid_identifier(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(BundleError::InvalidIdentifier {
                context: context.to_string(),
                name: name.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*` and not a keyword.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    !LUA_KEYWORDS.contains(&name)
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
