//! Parser error types
//!
//! - [`LexError`] - the tokenizer met a character it cannot classify
//! - [`ExpressionParseError`] - malformed reference, function or condition
//! - [`ExpressionError`] - either of the above, returned by parser entry points

mod error;

pub use error::{ExpressionError, ExpressionParseError, LexError, LexErrorKind};
