//! Case-insensitive symbol keys.
//!
//! MSBuild treats property, item, metadata and task names case-insensitively.
//! Every symbol table in the crate is keyed by [`SymbolKey`] so that `Foo` and
//! `FOO` always land in the same slot, whatever container holds them.

use std::borrow::Borrow;
use std::fmt;

use smol_str::SmolStr;

/// A lower-cased symbol name used as a map key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey(SmolStr);

impl SymbolKey {
    pub fn new(name: &str) -> Self {
        if name.bytes().any(|b| b.is_ascii_uppercase()) || !name.is_ascii() {
            Self(SmolStr::new(name.to_lowercase()))
        } else {
            Self(SmolStr::new(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SymbolKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&SmolStr> for SymbolKey {
    fn from(name: &SmolStr) -> Self {
        Self::new(name)
    }
}

impl Borrow<str> for SymbolKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolKey({:?})", self.0)
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
