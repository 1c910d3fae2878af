use text_size::TextSize;
use thiserror::Error;

/// What went wrong while lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexErrorKind {
    /// Printable ASCII that is not in the punctuation table.
    #[default]
    InvalidPunctuation,
    /// A character outside printable ASCII.
    InvalidToken,
    /// A quoted string with no closing apostrophe.
    UnterminatedString,
}

/// A tokenizer failure at a specific offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} at position {}", self.describe(), u32::from(self.position))]
pub struct LexError {
    pub kind: LexErrorKind,
    pub ch: Option<char>,
    pub position: TextSize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, ch: Option<char>, position: TextSize) -> Self {
        Self { kind, ch, position }
    }

    fn describe(&self) -> String {
        match (self.kind, self.ch) {
            (LexErrorKind::InvalidPunctuation, Some(ch)) => format!("Invalid punctuation: {ch}"),
            (LexErrorKind::InvalidToken, Some(ch)) => format!("Invalid token: {ch}"),
            (LexErrorKind::UnterminatedString, _) => "Unterminated string".to_string(),
            (_, None) => "Invalid token".to_string(),
        }
    }
}

/// A syntax error in an expression or condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} at position {}", self.message, u32::from(self.position))]
pub struct ExpressionParseError {
    pub message: String,
    /// The text being parsed when the error occurred.
    pub text: String,
    pub position: TextSize,
}

impl ExpressionParseError {
    pub fn new(message: impl Into<String>, text: impl Into<String>, position: TextSize) -> Self {
        Self {
            message: message.into(),
            text: text.into(),
            position,
        }
    }
}

/// Any failure produced while turning text into an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ExpressionParseError),
}

impl ExpressionError {
    /// Offset of the failure, relative to the parsed text.
    pub fn position(&self) -> TextSize {
        match self {
            Self::Lex(e) => e.position,
            Self::Parse(e) => e.position,
        }
    }
}
