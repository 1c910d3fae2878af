//! Logos-based condition tokenizer
//!
//! Lexes condition text (`'$(Configuration)' == 'Debug' and Exists('x')`)
//! into a stream of [`Token`]s. The tokenizer is stateful: the parser pulls
//! one token at a time, may put a single token back, and can switch into a
//! raw scan that captures the body of an already-opened `$(`/`@(`/`%(`.

use logos::Logos;
use smol_str::SmolStr;
use text_size::TextSize;

use super::errors::{ExpressionError, ExpressionParseError, LexError, LexErrorKind};
use super::token_kind::TokenKind;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: Option<SmolStr>,
    pub kind: TokenKind,
    pub position: TextSize,
}

impl Token {
    pub fn new(text: Option<&str>, kind: TokenKind, position: TextSize) -> Self {
        Self {
            text: text.map(SmolStr::new),
            kind,
            position,
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// How a quoted string ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteEnd {
    Closed,
    /// The apostrophe was the last character of the input.
    Bare,
}

/// Scan a single-quoted string. If the quoted text starts an item reference,
/// unescaped parentheses are counted so that quotes nested inside the
/// reference's transform do not close the string.
fn lex_quoted(lex: &mut logos::Lexer<'_, RawToken>) -> Result<QuoteEnd, LexErrorKind> {
    let rest = lex.remainder();
    if rest.is_empty() {
        return Ok(QuoteEnd::Bare);
    }

    let is_item_reference = rest.starts_with('@');
    let mut open_parens = 0i32;
    let mut in_literal = false;

    for (idx, ch) in rest.char_indices() {
        if is_item_reference && !in_literal {
            match ch {
                '(' => open_parens += 1,
                ')' => open_parens -= 1,
                _ => {}
            }
        }
        if ch == '\'' {
            if open_parens == 0 {
                lex.bump(idx + 1);
                return Ok(QuoteEnd::Closed);
            }
            in_literal = !in_literal;
        }
    }

    Err(LexErrorKind::UnterminatedString)
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"\p{White_Space}+")]
#[logos(error = LexErrorKind)]
pub enum RawToken {
    // `->` must win over the signed-number rule below
    #[token("->")]
    Transform,

    #[regex(r"[0-9][0-9.]*")]
    #[regex(r"-[0-9.]*")]
    Number,

    #[token("'", lex_quoted)]
    Quoted(QuoteEnd),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,

    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessOrEqual,
    #[token(">=")]
    GreaterOrEqual,
    #[token("==")]
    #[token("=")]
    Equal,

    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("!")]
    Not,
    #[token("@")]
    Item,
    #[token("$")]
    Property,
    #[token("%")]
    Metadata,
}

impl RawToken {
    fn kind(self) -> TokenKind {
        match self {
            Self::Transform => TokenKind::Transform,
            Self::Number => TokenKind::Number,
            Self::Quoted(QuoteEnd::Closed) | Self::Ident => TokenKind::String,
            Self::Quoted(QuoteEnd::Bare) => TokenKind::Apostrophe,
            Self::And => TokenKind::And,
            Self::Or => TokenKind::Or,
            Self::NotEqual => TokenKind::NotEqual,
            Self::LessOrEqual => TokenKind::LessOrEqual,
            Self::GreaterOrEqual => TokenKind::GreaterOrEqual,
            Self::Equal => TokenKind::Equal,
            Self::Less => TokenKind::Less,
            Self::Greater => TokenKind::Greater,
            Self::LeftParen => TokenKind::LeftParen,
            Self::RightParen => TokenKind::RightParen,
            Self::Dot => TokenKind::Dot,
            Self::Comma => TokenKind::Comma,
            Self::Not => TokenKind::Not,
            Self::Item => TokenKind::Item,
            Self::Property => TokenKind::Property,
            Self::Metadata => TokenKind::Metadata,
        }
    }
}

/// Pull-style tokenizer with a one-token putback buffer.
pub struct Tokenizer<'a> {
    input: &'a str,
    lexer: logos::Lexer<'a, RawToken>,
    token: Token,
    putback: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned on the first token of `input`.
    pub fn new(input: &'a str) -> Result<Self, ExpressionError> {
        let mut tokenizer = Self {
            input,
            lexer: RawToken::lexer(input),
            token: Token::new(None, TokenKind::Bof, TextSize::new(0)),
            putback: None,
        };
        tokenizer.next_token()?;
        Ok(tokenizer)
    }

    /// Reset all cursor state and produce the first token of `input`.
    pub fn tokenize(&mut self, input: &'a str) -> Result<(), ExpressionError> {
        self.input = input;
        self.lexer = RawToken::lexer(input);
        self.token = Token::new(None, TokenKind::Bof, TextSize::new(0));
        self.putback = None;
        self.next_token()
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn token_position(&self) -> TextSize {
        self.token.position
    }

    pub fn is_eof(&self) -> bool {
        self.token.kind == TokenKind::Eof
    }

    pub fn is_number(&self) -> bool {
        self.token.kind == TokenKind::Number
    }

    pub fn is_token(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    pub fn is_punctuation(&self) -> bool {
        self.token.kind.is_punctuation()
    }

    /// Make `token` the result of the next `next_token` call.
    ///
    /// Only one token can be pending at a time.
    pub fn putback(&mut self, token: Token) {
        debug_assert!(self.putback.is_none(), "putback called twice");
        self.putback = Some(token);
    }

    /// Check that the current token is `kind`, then advance.
    pub fn expect(&mut self, kind: TokenKind) -> Result<(), ExpressionError> {
        if self.token.kind != kind {
            return Err(ExpressionParseError::new(
                format!(
                    "Expected token type of type: {kind:?}, got {:?} ({})",
                    self.token.kind,
                    self.token.text()
                ),
                self.input,
                self.token.position,
            )
            .into());
        }
        self.next_token()
    }

    /// Advance to the next token.
    pub fn next_token(&mut self) -> Result<(), ExpressionError> {
        if let Some(token) = self.putback.take() {
            self.token = token;
            return Ok(());
        }

        if self.token.kind == TokenKind::Eof {
            return Err(ExpressionParseError::new(
                format!(
                    "Error while parsing condition \"{}\", ended abruptly.",
                    self.input
                ),
                self.input,
                self.token.position,
            )
            .into());
        }

        let Some(raw) = self.lexer.next() else {
            self.token = Token::new(None, TokenKind::Eof, TextSize::new(self.input.len() as u32));
            return Ok(());
        };

        let span = self.lexer.span();
        let position = TextSize::new(span.start as u32);
        let slice = self.lexer.slice();

        self.token = match raw {
            Ok(RawToken::Quoted(QuoteEnd::Closed)) => {
                Token::new(Some(&slice[1..slice.len() - 1]), TokenKind::String, position)
            }
            Ok(raw) => Token::new(Some(slice), raw.kind(), position),
            Err(kind) => return Err(self.lex_error(kind, span.start).into()),
        };
        Ok(())
    }

    /// Capture everything up to the parenthesis that closes the current
    /// nesting level as a single `String` token, without consuming it.
    /// Reaching the end of input yields an `Eof` token instead.
    pub fn scan_for_closing_parens(&mut self, depth: u32) {
        let start = self.input.len() - self.lexer.remainder().len();
        let position = TextSize::new(start as u32);
        let rest = self.lexer.remainder();
        let mut depth = depth as i64;

        for (idx, ch) in rest.char_indices() {
            match ch {
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.token = Token::new(Some(&rest[..idx]), TokenKind::String, position);
                        self.lexer.bump(idx);
                        return;
                    }
                }
                '(' => depth += 1,
                _ => {}
            }
        }

        self.lexer.bump(rest.len());
        self.token = Token::new(None, TokenKind::Eof, position);
    }

    fn lex_error(&self, kind: LexErrorKind, offset: usize) -> LexError {
        let ch = self.input[offset..].chars().next();
        let kind = match (kind, ch) {
            (LexErrorKind::UnterminatedString, _) => LexErrorKind::UnterminatedString,
            (_, Some(c)) if (' '..='\x7f').contains(&c) => LexErrorKind::InvalidPunctuation,
            _ => LexErrorKind::InvalidToken,
        };
        LexError::new(kind, ch, TextSize::new(offset as u32))
    }
}

/// Tokenize an entire string into a Vec, excluding the final `Eof`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokenizer = Tokenizer::new(input)?;
    let mut tokens = Vec::new();
    while !tokenizer.is_eof() {
        tokens.push(tokenizer.token().clone());
        tokenizer.next_token()?;
    }
    Ok(tokens)
}
