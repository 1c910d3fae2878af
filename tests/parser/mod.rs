//! Parser layer tests
//!
//! Tests for the expression tokenizer and parser:
//! - Token kinds and positions
//! - Property, item and metadata references
//! - Conditions and error positions

pub mod tests_expressions;
pub mod tests_tokenizer;
