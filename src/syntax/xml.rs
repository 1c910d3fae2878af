//! XML document tree with source spans.
//!
//! Built on `quick_xml::Reader`. Elements are stored in a flat arena
//! addressed by [`ElementId`] so side tables (schema annotations, resolved
//! imports) can key on them without touching the tree. Parsing never fails:
//! the first well-formedness error is recorded and everything read up to
//! that point is kept.

use std::fmt;

use quick_xml::Reader;
use quick_xml::events::Event;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::base::LineIndex;

/// Index of an element within its [`XDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A possibly prefixed XML name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XName {
    pub prefix: Option<SmolStr>,
    pub local: SmolStr,
}

impl XName {
    pub fn parse(full: &str) -> Self {
        match full.split_once(':') {
            Some((prefix, local)) => Self {
                prefix: Some(SmolStr::new(prefix)),
                local: SmolStr::new(local),
            },
            None => Self {
                prefix: None,
                local: SmolStr::new(full),
            },
        }
    }

    pub fn has_prefix(&self) -> bool {
        self.prefix.is_some()
    }
}

impl fmt::Display for XName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// Maps offsets in an unescaped value back to document offsets.
///
/// Anchors are recorded wherever the two drift apart: after each entity
/// reference and at the start of each text or CDATA segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetMap {
    /// `(value offset, document offset)`, sorted by value offset.
    anchors: Vec<(TextSize, TextSize)>,
}

impl OffsetMap {
    fn push(&mut self, value: usize, document: usize) {
        self.anchors.push((offset(value), offset(document)));
    }

    fn map(&self, value: TextSize, anchor: usize) -> TextSize {
        match self.anchors.get(anchor) {
            Some(&(from, to)) => to + (value - from),
            None => value,
        }
    }

    /// Document offset of a position at the start of a span.
    pub fn to_document(&self, value: TextSize) -> TextSize {
        let anchor = self.anchors.partition_point(|&(from, _)| from <= value);
        self.map(value, anchor.saturating_sub(1))
    }

    /// Document offset of a position at the end of a span. At a segment
    /// boundary this stays with the segment that ends there.
    pub fn end_to_document(&self, value: TextSize) -> TextSize {
        let anchor = self.anchors.partition_point(|&(from, _)| from < value);
        self.map(value, anchor.saturating_sub(1))
    }

    pub fn range_to_document(&self, range: TextRange) -> TextRange {
        let start = self.to_document(range.start());
        let end = self.end_to_document(range.end()).max(start);
        TextRange::new(start, end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XAttribute {
    pub name: XName,
    /// Unescaped value.
    pub value: String,
    /// `name="value"`
    pub range: TextRange,
    /// The value between the quotes, as written.
    pub value_range: TextRange,
    pub value_map: OffsetMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XElement {
    pub name: XName,
    /// From `<` of the start tag to `>` of the end tag.
    pub range: TextRange,
    pub name_range: TextRange,
    pub attributes: Vec<XAttribute>,
    pub children: Vec<ElementId>,
    pub parent: Option<ElementId>,
    /// Concatenated unescaped character data directly inside the element.
    pub text: Option<String>,
    pub text_range: Option<TextRange>,
    /// Offsets in `text` to document offsets.
    pub text_map: OffsetMap,
    pub self_closing: bool,
}

impl XElement {
    /// Attribute lookup by local name, ignoring ASCII case.
    pub fn attribute(&self, name: &str) -> Option<&XAttribute> {
        self.attributes
            .iter()
            .find(|a| !a.name.has_prefix() && a.name.local.eq_ignore_ascii_case(name))
    }

    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attribute(name).map(|a| a.value.as_str())
    }

    /// Trimmed text content, if any.
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlError {
    pub message: String,
    pub range: TextRange,
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XDocument {
    text: String,
    elements: Vec<XElement>,
    root: Option<ElementId>,
    errors: Vec<XmlError>,
}

impl XDocument {
    pub fn parse(text: &str) -> Self {
        let mut builder = DocumentBuilder::new(text);
        builder.run();
        builder.finish()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.text)
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    pub fn root_element(&self) -> Option<&XElement> {
        self.root.map(|id| self.element(id))
    }

    pub fn element(&self, id: ElementId) -> &XElement {
        &self.elements[id.index()]
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &XElement)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(idx, element)| (ElementId(idx as u32), element))
    }

    pub fn children(&self, id: ElementId) -> impl Iterator<Item = (ElementId, &XElement)> {
        self.element(id)
            .children
            .iter()
            .map(move |&child| (child, self.element(child)))
    }

    pub fn errors(&self) -> &[XmlError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The deepest element whose range contains `offset`.
    pub fn find_at_offset(&self, offset: TextSize) -> Option<ElementId> {
        let mut current = self.root?;
        if !self.element(current).range.contains_inclusive(offset) {
            return None;
        }
        'descend: loop {
            for &child in &self.element(current).children {
                if self.element(child).range.contains_inclusive(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// Element names from the root down to `id`.
    pub fn path_to(&self, id: ElementId) -> Vec<&str> {
        let mut path = vec![self.element(id).name.local.as_str()];
        let mut current = self.element(id).parent;
        while let Some(parent) = current {
            path.push(self.element(parent).name.local.as_str());
            current = self.element(parent).parent;
        }
        path.reverse();
        path
    }
}

// ============================================================================
// BUILDER
// ============================================================================

struct DocumentBuilder<'a> {
    source: &'a str,
    elements: Vec<XElement>,
    stack: Vec<ElementId>,
    root: Option<ElementId>,
    errors: Vec<XmlError>,
}

impl<'a> DocumentBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            elements: Vec::new(),
            stack: Vec::new(),
            root: None,
            errors: Vec::new(),
        }
    }

    fn run(&mut self) {
        let mut reader = Reader::from_str(self.source);
        reader.config_mut().trim_text(false);

        loop {
            let start = reader.buffer_position() as usize;
            let event = reader.read_event();
            let end = reader.buffer_position() as usize;

            match event {
                Ok(Event::Start(_)) => {
                    if let Some(id) = self.open_element(start, end, false) {
                        self.stack.push(id);
                    }
                }
                Ok(Event::Empty(_)) => {
                    self.open_element(start, end, true);
                }
                Ok(Event::End(_)) => {
                    if let Some(id) = self.stack.pop() {
                        let element = &mut self.elements[id.index()];
                        element.range = TextRange::new(element.range.start(), offset(end));
                    }
                }
                Ok(Event::Text(_)) => self.append_text(start, end, false),
                Ok(Event::CData(_)) => self.append_text(start, end, true),
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    let position = reader.error_position() as usize;
                    self.error(err.to_string(), position, position);
                    break;
                }
            }

            if !self.errors.is_empty() {
                break;
            }
        }

        if self.errors.is_empty() {
            if let Some(&open) = self.stack.last() {
                let name = self.elements[open.index()].name.to_string();
                let len = self.source.len();
                self.error(format!("Unexpected end of document, '{name}' is not closed"), len, len);
            }
        }

        // Unclosed elements extend to the end of what was read.
        let len = offset(self.source.len());
        for id in self.stack.drain(..) {
            let element = &mut self.elements[id.index()];
            element.range = TextRange::new(element.range.start(), len);
        }
    }

    fn finish(self) -> XDocument {
        XDocument {
            text: self.source.to_string(),
            elements: self.elements,
            root: self.root,
            errors: self.errors,
        }
    }

    fn error(&mut self, message: String, start: usize, end: usize) {
        tracing::debug!(%message, start, "xml syntax error");
        self.errors.push(XmlError {
            message,
            range: TextRange::new(offset(start), offset(end.max(start))),
        });
    }

    fn open_element(&mut self, start: usize, end: usize, self_closing: bool) -> Option<ElementId> {
        let raw = &self.source[start..end];
        let tag = match scan_start_tag(raw, start) {
            Ok(tag) => tag,
            Err((message, position)) => {
                self.error(message, position, position);
                return None;
            }
        };

        let parent = self.stack.last().copied();
        if parent.is_none() && self.root.is_some() {
            self.error("Multiple root elements".to_string(), start, end);
            return None;
        }

        let id = ElementId(self.elements.len() as u32);
        self.elements.push(XElement {
            name: XName::parse(tag.name),
            range: TextRange::new(offset(start), offset(end)),
            name_range: tag.name_range,
            attributes: tag.attributes,
            children: Vec::new(),
            parent,
            text: None,
            text_range: None,
            text_map: OffsetMap::default(),
            self_closing,
        });

        match parent {
            Some(parent) => self.elements[parent.index()].children.push(id),
            None => self.root = Some(id),
        }

        for (message, position) in tag.errors {
            self.error(message, position, position);
        }
        Some(id)
    }

    /// Append the character data at `start..end` to the open element.
    fn append_text(&mut self, start: usize, end: usize, cdata: bool) {
        let (content_start, content_end) = if cdata {
            (start + "<![CDATA[".len(), end.saturating_sub("]]>".len()))
        } else {
            (start, end)
        };
        let source = self.source;
        let raw = source.get(content_start..content_end).unwrap_or_default();

        let Some(&current) = self.stack.last() else {
            if !cdata {
                let mut scratch = String::new();
                let mut map = OffsetMap::default();
                if let Err(message) = unescape_mapped(raw, content_start, &mut scratch, &mut map) {
                    self.error(message, start, end);
                }
            }
            return;
        };

        let element = &mut self.elements[current.index()];
        let text = element.text.get_or_insert_with(String::new);
        let result = if cdata {
            element.text_map.push(text.len(), content_start);
            text.push_str(raw);
            Ok(())
        } else {
            unescape_mapped(raw, content_start, text, &mut element.text_map)
        };
        let range = TextRange::new(offset(start), offset(end));
        element.text_range = Some(match element.text_range {
            Some(existing) => existing.cover(range),
            None => range,
        });
        if let Err(message) = result {
            self.error(message, start, end);
        }
    }
}

fn offset(pos: usize) -> TextSize {
    TextSize::new(pos as u32)
}

/// Unescape `raw` (which starts at document offset `base`) onto `out`,
/// recording an anchor in `map` at the start and after every entity.
fn unescape_mapped(
    raw: &str,
    base: usize,
    out: &mut String,
    map: &mut OffsetMap,
) -> Result<(), String> {
    map.push(out.len(), base);
    let mut pos = 0;
    while let Some(found) = raw[pos..].find('&') {
        let amp = pos + found;
        out.push_str(&raw[pos..amp]);
        let end = raw[amp..].find(';').map_or(raw.len(), |semi| amp + semi + 1);
        let value = quick_xml::escape::unescape(&raw[amp..end]).map_err(|err| err.to_string())?;
        out.push_str(&value);
        pos = end;
        map.push(out.len(), base + pos);
    }
    out.push_str(&raw[pos..]);
    Ok(())
}

struct StartTag<'s> {
    name: &'s str,
    name_range: TextRange,
    attributes: Vec<XAttribute>,
    errors: Vec<(String, usize)>,
}

/// Split a raw start tag (`<Name a="1" b='2'>` or `<Name/>`) into its name
/// and attributes, keeping absolute offsets. `quick_xml` does not expose
/// attribute positions.
fn scan_start_tag(raw: &str, base: usize) -> Result<StartTag<'_>, (String, usize)> {
    let bytes = raw.as_bytes();
    let is_space = |b: u8| b.is_ascii_whitespace();
    let is_name_end = |b: u8| b.is_ascii_whitespace() || matches!(b, b'/' | b'>' | b'=');

    let mut pos = 1;
    let name_start = pos;
    while pos < bytes.len() && !is_name_end(bytes[pos]) {
        pos += 1;
    }
    let name = &raw[name_start..pos];
    if name.is_empty() {
        return Err(("Expected element name".to_string(), base + name_start));
    }

    let mut attributes = Vec::new();
    let mut errors = Vec::new();

    loop {
        while pos < bytes.len() && is_space(bytes[pos]) {
            pos += 1;
        }
        if pos >= bytes.len() || matches!(bytes[pos], b'/' | b'>') {
            break;
        }

        let attr_start = pos;
        while pos < bytes.len() && !is_name_end(bytes[pos]) {
            pos += 1;
        }
        let attr_name = &raw[attr_start..pos];
        while pos < bytes.len() && is_space(bytes[pos]) {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b'=') {
            errors.push((format!("Expected '=' after attribute '{attr_name}'"), base + pos));
            break;
        }
        pos += 1;
        while pos < bytes.len() && is_space(bytes[pos]) {
            pos += 1;
        }
        let quote = match bytes.get(pos) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => {
                errors.push((
                    format!("Expected quoted value for attribute '{attr_name}'"),
                    base + pos,
                ));
                break;
            }
        };
        pos += 1;
        let value_start = pos;
        while pos < bytes.len() && bytes[pos] != quote {
            pos += 1;
        }
        if pos >= bytes.len() {
            let message = format!("Unterminated value for attribute '{attr_name}'");
            errors.push((message, base + value_start));
            break;
        }
        let raw_value = &raw[value_start..pos];
        pos += 1;

        let mut value = String::new();
        let mut value_map = OffsetMap::default();
        let value_base = base + value_start;
        if let Err(message) = unescape_mapped(raw_value, value_base, &mut value, &mut value_map) {
            errors.push((message, base + value_start));
            value = raw_value.to_string();
            value_map = OffsetMap::default();
            value_map.push(0, base + value_start);
        }

        if attributes
            .iter()
            .any(|a: &XAttribute| a.name.to_string() == attr_name)
        {
            errors.push((format!("Duplicate attribute '{attr_name}'"), base + attr_start));
        }

        attributes.push(XAttribute {
            name: XName::parse(attr_name),
            value,
            range: TextRange::new(offset(base + attr_start), offset(base + pos)),
            value_range: TextRange::new(offset(base + value_start), offset(base + pos - 1)),
            value_map,
        });
    }

    Ok(StartTag {
        name,
        name_range: TextRange::at(offset(base + name_start), offset(name.len())),
        attributes,
        errors,
    })
}
