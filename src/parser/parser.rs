//! Expression and condition parser.
//!
//! Plain attribute/element text is scanned character by character: literal
//! runs become `Text` nodes and every `$(…)`, `@(…)` and `%(…)` is parsed as
//! a reference. Condition text goes through the [`Tokenizer`]; reference
//! bodies inside conditions are captured with a raw parenthesis scan and
//! handed back to the reference parser.
//!
//! ```text
//! condition  := or
//! or         := and ('or' and)*
//! and        := not ('and' not)*
//! not        := '!' not | relational
//! relational := factor (cmp factor)?
//! factor     := '(' or ')' | number | 'quoted' | ident '(' args ')' | ident
//!             | '$(' property ')' | '@(' item ')' | '%(' metadata ')'
//! property   := name member* | '[' class ']::' name args? member* | 'Registry:' text
//! member     := '.' name args? | '[' args ']'
//! item       := name ('->' ('quoted' | name args))* (',' 'quoted')?
//! metadata   := name ('.' name)?
//! ```

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::ast::{ConditionOperator, Expression, ExpressionBuilder, NodeId, NodeKind};
use super::errors::{ExpressionError, ExpressionParseError};
use super::lexer::Tokenizer;
use super::token_kind::TokenKind;

bitflags::bitflags! {
    /// What syntax is permitted in the text being parsed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExpressionOptions: u8 {
        /// `@(…)` item references.
        const ITEMS = 1 << 0;
        /// `%(…)` metadata references.
        const METADATA = 1 << 1;
        /// Split on top-level `;` into a list.
        const LISTS = 1 << 2;
        /// Parse as a boolean condition.
        const CONDITION = 1 << 3;

        const ITEMS_METADATA_AND_LISTS =
            Self::ITEMS.bits() | Self::METADATA.bits() | Self::LISTS.bits();
    }
}

/// Parse `text` into an expression tree.
///
/// Node ranges are byte offsets into `text`.
pub fn parse_expression(
    text: &str,
    options: ExpressionOptions,
) -> Result<Expression, ExpressionError> {
    ExpressionParser::new(text, options).parse()
}

/// Convenience wrapper for `Condition` attributes.
pub fn parse_condition(text: &str) -> Result<Expression, ExpressionError> {
    parse_expression(
        text,
        ExpressionOptions::CONDITION | ExpressionOptions::ITEMS | ExpressionOptions::METADATA,
    )
}

/// Character cursor over a slice of the source, tracking absolute offsets.
struct Cursor<'s> {
    text: &'s str,
    pos: usize,
    base: u32,
}

impl<'s> Cursor<'s> {
    fn new(text: &'s str, base: u32) -> Self {
        Self { text, pos: 0, base }
    }

    fn rest(&self) -> &'s str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn offset(&self) -> TextSize {
        self.offset_of(self.pos)
    }

    fn offset_of(&self, pos: usize) -> TextSize {
        TextSize::new(self.base + pos as u32)
    }

    fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.offset())
    }

    /// `[A-Za-z_][A-Za-z0-9_-]*`, never swallowing the `-` of `->`.
    fn identifier(&mut self) -> &'s str {
        let start = self.pos;
        if self.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
            self.bump();
            while let Some(c) = self.peek() {
                let continues = c.is_ascii_alphanumeric()
                    || c == '_'
                    || (c == '-' && self.peek_second() != Some('>'));
                if !continues {
                    break;
                }
                self.bump();
            }
        }
        &self.text[start..self.pos]
    }

    fn starts_reference(&self) -> bool {
        matches!(self.peek(), Some('$' | '@' | '%')) && self.peek_second() == Some('(')
    }
}

/// Builds one [`Expression`] from one source text.
pub struct ExpressionParser<'a> {
    source: &'a str,
    options: ExpressionOptions,
    builder: ExpressionBuilder,
}

impl<'a> ExpressionParser<'a> {
    pub fn new(source: &'a str, options: ExpressionOptions) -> Self {
        Self {
            source,
            options,
            builder: ExpressionBuilder::default(),
        }
    }

    pub fn parse(mut self) -> Result<Expression, ExpressionError> {
        let root = if self.options.contains(ExpressionOptions::CONDITION) {
            self.parse_condition()?
        } else {
            let mut cursor = Cursor::new(self.source, 0);
            let lists = self.options.contains(ExpressionOptions::LISTS);
            self.parse_list(&mut cursor, lists)?
        };
        Ok(self.builder.finish(root))
    }

    fn error(&self, message: impl Into<String>, position: TextSize) -> ExpressionError {
        ExpressionParseError::new(message, self.source, position).into()
    }

    fn expect_char(&self, cursor: &mut Cursor<'_>, ch: char) -> Result<(), ExpressionError> {
        if cursor.eat(ch) {
            Ok(())
        } else {
            let found = cursor
                .peek()
                .map_or_else(|| "end of expression".to_string(), |c| format!("'{c}'"));
            Err(self.error(format!("Expected '{ch}', found {found}"), cursor.offset()))
        }
    }

    fn text_node(&mut self, value: &str, quoted: bool, range: TextRange) -> NodeId {
        self.builder.alloc(
            NodeKind::Text {
                value: SmolStr::new(value),
                quoted,
            },
            range,
        )
    }

    // =========================================================================
    // PLAIN TEXT
    // =========================================================================

    fn parse_list(
        &mut self,
        cursor: &mut Cursor<'_>,
        lists: bool,
    ) -> Result<NodeId, ExpressionError> {
        let start = cursor.offset();
        let mut segments = vec![self.parse_concat(cursor, false, lists)?];
        while lists && cursor.eat(';') {
            segments.push(self.parse_concat(cursor, false, lists)?);
        }
        if segments.len() == 1 {
            return Ok(segments[0]);
        }
        Ok(self
            .builder
            .alloc(NodeKind::List(segments), cursor.range_from(start)))
    }

    /// Literal runs and references up to the end of the cursor, or to a
    /// top-level `;` when splitting lists.
    fn parse_concat(
        &mut self,
        cursor: &mut Cursor<'_>,
        quoted: bool,
        lists: bool,
    ) -> Result<NodeId, ExpressionError> {
        let start = cursor.offset();
        let mut parts = Vec::new();
        let mut text_start = cursor.pos;

        while let Some(ch) = cursor.peek() {
            if lists && ch == ';' {
                break;
            }
            if cursor.starts_reference() {
                if text_start < cursor.pos {
                    let range = TextRange::new(cursor.offset_of(text_start), cursor.offset());
                    let value = &cursor.text[text_start..cursor.pos];
                    parts.push(self.text_node(value, quoted, range));
                }
                parts.push(self.parse_reference(cursor)?);
                text_start = cursor.pos;
                continue;
            }
            cursor.bump();
        }

        if text_start < cursor.pos || parts.is_empty() {
            let range = TextRange::new(cursor.offset_of(text_start), cursor.offset());
            let value = &cursor.text[text_start..cursor.pos];
            parts.push(self.text_node(value, quoted, range));
        }

        if parts.len() == 1 {
            return Ok(parts[0]);
        }
        Ok(self
            .builder
            .alloc(NodeKind::Concat(parts), cursor.range_from(start)))
    }

    // =========================================================================
    // REFERENCES
    // =========================================================================

    fn parse_reference(&mut self, cursor: &mut Cursor<'_>) -> Result<NodeId, ExpressionError> {
        let start = cursor.offset();
        let sigil = cursor.bump();
        self.expect_char(cursor, '(')?;
        match sigil {
            Some('$') => self.parse_property(cursor, start),
            Some('@') => self.parse_item(cursor, start),
            Some('%') => self.parse_metadata(cursor, start),
            _ => Err(self.error("Expected '$(', '@(' or '%('", start)),
        }
    }

    fn parse_property(
        &mut self,
        cursor: &mut Cursor<'_>,
        start: TextSize,
    ) -> Result<NodeId, ExpressionError> {
        cursor.skip_whitespace();

        let body = if cursor.peek() == Some('[') {
            self.parse_static_invocation(cursor)?
        } else if cursor
            .rest()
            .get(..9)
            .is_some_and(|p| p.eq_ignore_ascii_case("registry:"))
        {
            self.parse_registry_value(cursor)?
        } else {
            let name_start = cursor.offset();
            let name = cursor.identifier();
            if name.is_empty() {
                return Err(self.error("Expected property name", name_start));
            }
            let target = self.builder.alloc(
                NodeKind::PropertyName(SmolStr::new(name)),
                cursor.range_from(name_start),
            );
            self.parse_member_chain(cursor, target)?
        };

        cursor.skip_whitespace();
        self.expect_char(cursor, ')')?;
        Ok(self
            .builder
            .alloc(NodeKind::Property { body }, cursor.range_from(start)))
    }

    fn parse_registry_value(&mut self, cursor: &mut Cursor<'_>) -> Result<NodeId, ExpressionError> {
        let start = cursor.offset();
        cursor.pos += "Registry:".len();
        let value_start = cursor.pos;
        while cursor.peek().is_some_and(|c| c != ')') {
            cursor.bump();
        }
        let value = cursor.text[value_start..cursor.pos].trim_end();
        Ok(self.builder.alloc(
            NodeKind::PropertyRegistryValue(SmolStr::new(value)),
            cursor.range_from(start),
        ))
    }

    /// `[Namespace.Type]::Member(args)`
    fn parse_static_invocation(
        &mut self,
        cursor: &mut Cursor<'_>,
    ) -> Result<NodeId, ExpressionError> {
        let start = cursor.offset();
        cursor.bump();
        let name_start = cursor.pos;
        while cursor.peek().is_some_and(|c| c != ']') {
            cursor.bump();
        }
        let class_name = cursor.text[name_start..cursor.pos].trim();
        if class_name.is_empty() {
            return Err(self.error("Expected class name", cursor.offset()));
        }
        self.expect_char(cursor, ']')?;
        let class = self.builder.alloc(
            NodeKind::ClassReference(SmolStr::new(class_name)),
            cursor.range_from(start),
        );

        cursor.skip_whitespace();
        if !cursor.eat_str("::") {
            return Err(self.error("Expected '::' after class reference", cursor.offset()));
        }
        cursor.skip_whitespace();
        let function = self.parse_function_name(cursor)?;
        cursor.skip_whitespace();
        let arguments = if cursor.peek() == Some('(') {
            Some(self.parse_arguments(cursor, '(', ')')?)
        } else {
            None
        };
        let invocation = self.alloc_invocation(class, Some(function), arguments, start, cursor)?;
        self.parse_member_chain(cursor, invocation)
    }

    /// `.Member`, `.Method(args)` and `[index]` suffixes.
    fn parse_member_chain(
        &mut self,
        cursor: &mut Cursor<'_>,
        mut target: NodeId,
    ) -> Result<NodeId, ExpressionError> {
        let start = self.builder.range(target).start();
        loop {
            cursor.skip_whitespace();
            match cursor.peek() {
                Some('.') => {
                    cursor.bump();
                    cursor.skip_whitespace();
                    let function = self.parse_function_name(cursor)?;
                    cursor.skip_whitespace();
                    let arguments = if cursor.peek() == Some('(') {
                        Some(self.parse_arguments(cursor, '(', ')')?)
                    } else {
                        None
                    };
                    target =
                        self.alloc_invocation(target, Some(function), arguments, start, cursor)?;
                }
                Some('[') => {
                    let arguments = self.parse_arguments(cursor, '[', ']')?;
                    target = self.alloc_invocation(target, None, Some(arguments), start, cursor)?;
                }
                _ => return Ok(target),
            }
        }
    }

    fn alloc_invocation(
        &mut self,
        target: NodeId,
        function: Option<NodeId>,
        arguments: Option<NodeId>,
        start: TextSize,
        cursor: &Cursor<'_>,
    ) -> Result<NodeId, ExpressionError> {
        if function.is_none() && arguments.is_none() {
            return Err(self.error(
                "Property function requires a function name or arguments",
                start,
            ));
        }
        Ok(self.builder.alloc(
            NodeKind::PropertyFunctionInvocation {
                target,
                function,
                arguments,
            },
            cursor.range_from(start),
        ))
    }

    fn parse_function_name(&mut self, cursor: &mut Cursor<'_>) -> Result<NodeId, ExpressionError> {
        let start = cursor.offset();
        let name = cursor.identifier();
        if name.is_empty() {
            return Err(self.error("Expected function name", start));
        }
        Ok(self.builder.alloc(
            NodeKind::FunctionName(SmolStr::new(name)),
            cursor.range_from(start),
        ))
    }

    fn parse_arguments(
        &mut self,
        cursor: &mut Cursor<'_>,
        open: char,
        close: char,
    ) -> Result<NodeId, ExpressionError> {
        let start = cursor.offset();
        self.expect_char(cursor, open)?;
        let mut arguments = Vec::new();

        cursor.skip_whitespace();
        if !cursor.eat(close) {
            loop {
                cursor.skip_whitespace();
                arguments.push(self.parse_argument(cursor)?);
                cursor.skip_whitespace();
                if cursor.eat(',') {
                    continue;
                }
                if cursor.eat(close) {
                    break;
                }
                return Err(self.error(format!("Expected ',' or '{close}'"), cursor.offset()));
            }
        }

        Ok(self
            .builder
            .alloc(NodeKind::ArgumentList(arguments), cursor.range_from(start)))
    }

    fn parse_argument(&mut self, cursor: &mut Cursor<'_>) -> Result<NodeId, ExpressionError> {
        let start = cursor.offset();
        match cursor.peek() {
            None => Err(self.error("Unexpected end of expression", start)),
            Some(quote @ ('\'' | '"' | '`')) => self.parse_quoted(cursor, quote),
            Some(_) if cursor.starts_reference() => self.parse_reference(cursor),
            Some(c) if c.is_ascii_digit() || c == '-' => {
                cursor.bump();
                while cursor.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
                    cursor.bump();
                }
                let range = cursor.range_from(start);
                let value = &self.source[range];
                Ok(self
                    .builder
                    .alloc(NodeKind::Number(SmolStr::new(value)), range))
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let word = cursor.identifier();
                let range = cursor.range_from(start);
                Ok(self.text_node(word, false, range))
            }
            Some(c) => Err(self.error(
                format!("Unexpected character '{c}' in argument list"),
                start,
            )),
        }
    }

    /// A quoted literal; its content may contain references.
    fn parse_quoted(
        &mut self,
        cursor: &mut Cursor<'_>,
        quote: char,
    ) -> Result<NodeId, ExpressionError> {
        let start = cursor.offset();
        cursor.bump();
        let Some(len) = cursor.rest().find(quote) else {
            return Err(self.error("Unterminated string", start));
        };
        let inner_base = u32::from(cursor.offset());
        let inner = &cursor.rest()[..len];
        let mut inner_cursor = Cursor::new(inner, inner_base);
        let node = self.parse_concat(&mut inner_cursor, true, false)?;
        cursor.pos += len + quote.len_utf8();
        Ok(node)
    }

    fn parse_item(
        &mut self,
        cursor: &mut Cursor<'_>,
        start: TextSize,
    ) -> Result<NodeId, ExpressionError> {
        if !self.options.contains(ExpressionOptions::ITEMS) {
            return Err(self.error("Item references are not allowed in this context", start));
        }

        cursor.skip_whitespace();
        let name_start = cursor.offset();
        let name = cursor.identifier();
        if name.is_empty() {
            return Err(self.error("Expected item name", name_start));
        }

        let mut transform: Option<NodeId> = None;
        loop {
            cursor.skip_whitespace();
            if !cursor.eat_str("->") {
                break;
            }
            cursor.skip_whitespace();
            let transform_start = transform
                .map(|t| self.builder.range(t).start())
                .unwrap_or_else(|| cursor.offset());
            match cursor.peek() {
                Some(quote @ ('\'' | '"' | '`')) => {
                    if transform.is_some() {
                        return Err(self.error(
                            "A quoted transform cannot follow another transform",
                            cursor.offset(),
                        ));
                    }
                    let saved = self.options;
                    self.options |= ExpressionOptions::METADATA;
                    let parsed = self.parse_quoted(cursor, quote);
                    self.options = saved;
                    transform = Some(parsed?);
                }
                _ => {
                    let function = self.parse_function_name(cursor)?;
                    cursor.skip_whitespace();
                    let arguments = self.parse_arguments(cursor, '(', ')')?;
                    transform = Some(self.builder.alloc(
                        NodeKind::ItemFunctionInvocation {
                            target: transform,
                            function,
                            arguments,
                        },
                        cursor.range_from(transform_start),
                    ));
                }
            }
        }

        cursor.skip_whitespace();
        let separator = if cursor.eat(',') {
            cursor.skip_whitespace();
            match cursor.peek() {
                Some(quote @ ('\'' | '"' | '`')) => Some(self.parse_quoted(cursor, quote)?),
                _ => return Err(self.error("Expected quoted separator", cursor.offset())),
            }
        } else {
            None
        };

        cursor.skip_whitespace();
        self.expect_char(cursor, ')')?;
        Ok(self.builder.alloc(
            NodeKind::Item {
                name: SmolStr::new(name),
                transform,
                separator,
            },
            cursor.range_from(start),
        ))
    }

    fn parse_metadata(
        &mut self,
        cursor: &mut Cursor<'_>,
        start: TextSize,
    ) -> Result<NodeId, ExpressionError> {
        if !self.options.contains(ExpressionOptions::METADATA) {
            return Err(self.error("Metadata references are not allowed in this context", start));
        }

        cursor.skip_whitespace();
        let first_start = cursor.offset();
        let first = cursor.identifier();
        if first.is_empty() {
            return Err(self.error("Expected metadata name", first_start));
        }
        cursor.skip_whitespace();

        let (item, name) = if cursor.eat('.') {
            cursor.skip_whitespace();
            let second_start = cursor.offset();
            let second = cursor.identifier();
            if second.is_empty() {
                return Err(self.error("Expected metadata name", second_start));
            }
            (Some(SmolStr::new(first)), SmolStr::new(second))
        } else {
            (None, SmolStr::new(first))
        };

        cursor.skip_whitespace();
        self.expect_char(cursor, ')')?;
        Ok(self
            .builder
            .alloc(NodeKind::Metadata { item, name }, cursor.range_from(start)))
    }

    // =========================================================================
    // CONDITIONS
    // =========================================================================

    fn parse_condition(&mut self) -> Result<NodeId, ExpressionError> {
        let source = self.source;
        let mut tokens = Tokenizer::new(source)?;
        if tokens.is_eof() {
            let empty = TextRange::empty(TextSize::new(0));
            return Ok(self.text_node("", false, empty));
        }

        let root = self.parse_or(&mut tokens)?;
        if !tokens.is_eof() {
            let token = tokens.token();
            return Err(self.error(
                format!("Unexpected token {:?} ({})", token.kind, token.text()),
                token.position,
            ));
        }
        Ok(root)
    }

    fn binary(&mut self, op: ConditionOperator, left: NodeId, right: NodeId) -> NodeId {
        let range = self.builder.range(left).cover(self.builder.range(right));
        self.builder.alloc(NodeKind::Binary { op, left, right }, range)
    }

    fn parse_or(&mut self, tokens: &mut Tokenizer<'_>) -> Result<NodeId, ExpressionError> {
        let mut left = self.parse_and(tokens)?;
        while tokens.is_token(TokenKind::Or) {
            tokens.next_token()?;
            let right = self.parse_and(tokens)?;
            left = self.binary(ConditionOperator::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self, tokens: &mut Tokenizer<'_>) -> Result<NodeId, ExpressionError> {
        let mut left = self.parse_not(tokens)?;
        while tokens.is_token(TokenKind::And) {
            tokens.next_token()?;
            let right = self.parse_not(tokens)?;
            left = self.binary(ConditionOperator::And, left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self, tokens: &mut Tokenizer<'_>) -> Result<NodeId, ExpressionError> {
        if tokens.is_token(TokenKind::Not) {
            let start = tokens.token_position();
            tokens.next_token()?;
            let operand = self.parse_not(tokens)?;
            let range = TextRange::new(start, self.builder.range(operand).end());
            return Ok(self.builder.alloc(NodeKind::Not(operand), range));
        }
        self.parse_relational(tokens)
    }

    fn parse_relational(&mut self, tokens: &mut Tokenizer<'_>) -> Result<NodeId, ExpressionError> {
        let left = self.parse_factor(tokens)?;
        let op = match tokens.token().kind {
            TokenKind::Equal => ConditionOperator::Equal,
            TokenKind::NotEqual => ConditionOperator::NotEqual,
            TokenKind::Less => ConditionOperator::Less,
            TokenKind::LessOrEqual => ConditionOperator::LessOrEqual,
            TokenKind::Greater => ConditionOperator::Greater,
            TokenKind::GreaterOrEqual => ConditionOperator::GreaterOrEqual,
            _ => return Ok(left),
        };
        tokens.next_token()?;
        let right = self.parse_factor(tokens)?;
        Ok(self.binary(op, left, right))
    }

    fn parse_factor(&mut self, tokens: &mut Tokenizer<'_>) -> Result<NodeId, ExpressionError> {
        let token = tokens.token().clone();
        let start = token.position;
        let token_range = TextRange::at(start, TextSize::of(token.text()));

        match token.kind {
            TokenKind::LeftParen => {
                tokens.next_token()?;
                let inner = self.parse_or(tokens)?;
                tokens.expect(TokenKind::RightParen)?;
                Ok(inner)
            }
            TokenKind::Number => {
                tokens.next_token()?;
                Ok(self
                    .builder
                    .alloc(NodeKind::Number(SmolStr::new(token.text())), token_range))
            }
            TokenKind::String => {
                let quoted = self.source.as_bytes().get(usize::from(start)) == Some(&b'\'');
                tokens.next_token()?;
                if quoted {
                    let mut cursor = Cursor::new(token.text(), u32::from(start) + 1);
                    return self.parse_concat(&mut cursor, true, false);
                }
                if tokens.is_token(TokenKind::LeftParen) {
                    let name = self
                        .builder
                        .alloc(NodeKind::FunctionName(SmolStr::new(token.text())), token_range);
                    let arguments = self.parse_condition_arguments(tokens)?;
                    let range = TextRange::new(start, self.builder.range(arguments).end());
                    return Ok(self
                        .builder
                        .alloc(NodeKind::ConditionFunction { name, arguments }, range));
                }
                Ok(self.text_node(token.text(), false, token_range))
            }
            TokenKind::Property | TokenKind::Item | TokenKind::Metadata => {
                tokens.next_token()?;
                if !tokens.is_token(TokenKind::LeftParen) {
                    return Err(self.error(
                        format!("Expected '(' after '{}'", token.text()),
                        tokens.token_position(),
                    ));
                }
                tokens.scan_for_closing_parens(1);
                if tokens.is_eof() {
                    return Err(self.error("Unterminated reference", start));
                }
                let body = tokens.token().clone();
                let end = usize::from(body.position) + body.text().len() + 1;
                let source = self.source;
                let slice = &source[usize::from(start)..end];
                let mut cursor = Cursor::new(slice, u32::from(start));
                let node = self.parse_reference(&mut cursor)?;
                tokens.next_token()?;
                tokens.expect(TokenKind::RightParen)?;
                Ok(node)
            }
            _ => Err(self.error(
                format!("Unexpected token {:?} ({})", token.kind, token.text()),
                start,
            )),
        }
    }

    /// `( factor (',' factor)* )` after a condition function name.
    fn parse_condition_arguments(
        &mut self,
        tokens: &mut Tokenizer<'_>,
    ) -> Result<NodeId, ExpressionError> {
        let start = tokens.token_position();
        tokens.expect(TokenKind::LeftParen)?;
        let mut arguments = Vec::new();

        if !tokens.is_token(TokenKind::RightParen) {
            loop {
                arguments.push(self.parse_factor(tokens)?);
                if tokens.is_token(TokenKind::Comma) {
                    tokens.next_token()?;
                    continue;
                }
                break;
            }
        }

        let end = tokens.token_position() + TextSize::from(1);
        tokens.expect(TokenKind::RightParen)?;
        Ok(self
            .builder
            .alloc(NodeKind::ArgumentList(arguments), TextRange::new(start, end)))
    }
}
