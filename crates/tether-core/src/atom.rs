//! Host argument tokens.
//!
//! Hosts pass creation arguments and message arguments as lists of loosely
//! typed tokens. [`Atom`] mirrors that representation: a number, a symbol,
//! or the absent token used when a reference has nothing to point to.

use std::fmt;
use std::sync::Arc;

use tether_utils::{is_tag_text, tag_name};

/// An interned-style host symbol.
///
/// Cloning is cheap (reference counted). Two symbols compare equal when
/// their text is equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Create a symbol from text.
    pub fn new(text: &str) -> Self {
        Self(Arc::from(text))
    }

    /// The symbol text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the empty symbol.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Symbol {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}

/// A host argument token.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// Numeric token. Hosts have a single numeric type; integers travel as floats.
    Float(f64),
    /// Symbolic token.
    Symbol(Symbol),
    /// Absent token (e.g. an unset buffer reference read back by a getter).
    Null,
}

impl Atom {
    /// Construct a symbol atom from text.
    pub fn symbol(text: &str) -> Self {
        Self::Symbol(Symbol::new(text))
    }

    /// Numeric value of the atom.
    ///
    /// Symbols and the absent token read as `0.0`, matching host conventions
    /// for loosely typed argument lists.
    #[inline]
    pub fn as_float(&self) -> f64 {
        match self {
            Self::Float(value) => *value,
            Self::Symbol(_) | Self::Null => 0.0,
        }
    }

    /// Integer value of the atom, truncating toward zero.
    #[inline]
    pub fn as_int(&self) -> i64 {
        self.as_float() as i64
    }

    /// Symbol held by the atom, if any.
    #[inline]
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Returns true if this atom is an attribute tag (`@name`).
    #[inline]
    pub fn is_tag(&self) -> bool {
        matches!(self, Self::Symbol(s) if is_tag_text(s.as_str()))
    }

    /// Tag name without the `@` prefix, or `None` if this is not a tag.
    #[inline]
    pub fn tag_name(&self) -> Option<&str> {
        self.as_symbol().and_then(|s| tag_name(s.as_str()))
    }
}

impl From<f64> for Atom {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Atom {
    fn from(value: f32) -> Self {
        Self::Float(value as f64)
    }
}

impl From<i64> for Atom {
    fn from(value: i64) -> Self {
        Self::Float(value as f64)
    }
}

impl From<&str> for Atom {
    fn from(text: &str) -> Self {
        Self::symbol(text)
    }
}
