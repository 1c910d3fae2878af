//! MSBuild expression parsing.
//!
//! ```text
//! Attribute / element text
//!     ↓
//! Tokenizer (logos)   → condition tokens, quote and paren scanning
//!     ↓
//! ExpressionParser    → arena tree (Expression) with parent back-links
//!     ↓
//! Expression::references() → property / item / metadata usages
//! ```

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod errors;
mod lexer;
mod token_kind;

pub use ast::{ConditionOperator, Expression, ExpressionNode, NodeId, NodeKind, Reference};
pub use errors::{ExpressionError, ExpressionParseError, LexError, LexErrorKind};
pub use lexer::{Token, Tokenizer, tokenize};
pub use parser::{ExpressionOptions, ExpressionParser, parse_condition, parse_expression};
pub use token_kind::TokenKind;
