//! Token kinds for the condition tokenizer.

/// Every token the condition tokenizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    /// Before the first call to `next_token`.
    Bof,
    /// End of input.
    Eof,
    Number,
    /// A quoted string or a bare identifier.
    String,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    And,
    Or,

    // =========================================================================
    // COMPARISON OPERATORS
    // =========================================================================
    Equal,
    NotEqual,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    LeftParen,
    RightParen,
    Dot,
    Comma,
    Not,
    Item,
    Property,
    Metadata,
    Apostrophe,
    /// `->` in item transforms.
    Transform,

    Invalid,
}

impl TokenKind {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::Less
                | Self::Greater
                | Self::LessOrEqual
                | Self::GreaterOrEqual
        )
    }

    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            Self::LeftParen
                | Self::RightParen
                | Self::Dot
                | Self::Comma
                | Self::Not
                | Self::Item
                | Self::Property
                | Self::Metadata
                | Self::Apostrophe
        )
    }
}
