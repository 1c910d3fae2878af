//! Foundation types for the MSBuild toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`SymbolKey`] - Case-insensitive symbol identity
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`normalize_path`] - Host path normalization for imports
//!
//! This module has NO dependencies on other crate modules.

mod name;
mod paths;
mod span;

pub use name::SymbolKey;
pub use paths::{is_private_name, normalize_path, resolve_relative};
pub use span::{LineCol, LineIndex, TextRange, TextSize};
