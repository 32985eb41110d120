//! Binding tokens for the container.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(0);

/// Token identifying a binding.
///
/// Tokens are compared by identity, never structurally:
///
/// - **Name**: string names, equal when the strings are equal
/// - **Type**: a Rust type used as a class reference, equal by `TypeId`
/// - **Symbol**: unique opaque tokens, equal only to themselves
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::Token;
///
/// struct Database;
///
/// assert_eq!(Token::from("logger"), Token::from(String::from("logger")));
/// assert_eq!(Token::of::<Database>(), Token::of::<Database>());
///
/// let a = Token::symbol("session");
/// let b = Token::symbol("session");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
#[derive(Debug, Clone)]
pub enum Token {
    /// String name
    Name(Cow<'static, str>),
    /// Concrete type key with TypeId and name for diagnostics
    Type(TypeId, &'static str),
    /// Unique symbol with a description for diagnostics
    Symbol(u64, &'static str),
}

impl Token {
    /// Token for the type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Token::Type(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    /// Creates a new symbol, distinct from every other token.
    pub fn symbol(description: &'static str) -> Self {
        Token::Symbol(NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed), description)
    }
}

impl PartialEq for Token {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Token::Name(a), Token::Name(b)) => a == b,
            // TypeId only, the name is diagnostics
            (Token::Type(a, _), Token::Type(b, _)) => a == b,
            (Token::Symbol(a, _), Token::Symbol(b, _)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Token::Name(name) => {
                0u8.hash(state);
                name.hash(state);
            }
            Token::Type(id, _) => {
                1u8.hash(state);
                id.hash(state);
            }
            Token::Symbol(id, _) => {
                2u8.hash(state);
                id.hash(state);
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Name(name) => f.write_str(name),
            Token::Type(_, name) => f.write_str(name),
            Token::Symbol(_, description) => write!(f, "Symbol({})", description),
        }
    }
}

impl From<&'static str> for Token {
    fn from(name: &'static str) -> Self {
        Token::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Token {
    fn from(name: String) -> Self {
        Token::Name(Cow::Owned(name))
    }
}

impl From<&Token> for Token {
    fn from(token: &Token) -> Self {
        token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn kinds_never_collide() {
        let mut set = HashSet::new();
        set.insert(Token::from("u32"));
        set.insert(Token::of::<u32>());
        set.insert(Token::symbol("u32"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn display_uses_readable_names() {
        assert_eq!(Token::from("logger").to_string(), "logger");
        assert_eq!(Token::of::<u32>().to_string(), "u32");
        assert_eq!(Token::symbol("db").to_string(), "Symbol(db)");
    }
}
