//! Schema-aware document traversal.
//!
//! [`DocumentWalker`] visits every element of an [`XDocument`] top-down,
//! resolving each element's kind against its parent's descriptor. Kinds are
//! recorded in an annotation side table, attribute and text values are
//! parsed as expressions, and typed hooks on [`MsBuildVisitor`] are invoked
//! for the elements that declare symbols.

use rustc_hash::FxHashMap;
use text_size::TextRange;

use super::diagnostics::DiagnosticCollector;
use crate::parser::{ExpressionOptions, Reference, parse_expression};
use crate::schema::{MsBuildElement, MsBuildKind, Schema};
use crate::syntax::{ElementId, OffsetMap, XAttribute, XDocument, XElement};

/// Visitor hooks for MSBuild documents.
///
/// Implement this trait to collect information while a [`DocumentWalker`]
/// runs. Default implementations are no-ops.
pub trait MsBuildVisitor {
    /// Every recognized element, before the typed hook.
    fn visit_element(&mut self, _id: ElementId, _element: &XElement, _kind: &MsBuildElement) {}
    fn visit_unknown(&mut self, _id: ElementId, _element: &XElement) {}
    /// `Item` and `ItemDefinition` elements.
    fn visit_item(&mut self, _id: ElementId, _element: &XElement, _kind: &MsBuildElement) {}
    /// Metadata elements, with the item element that contains them.
    fn visit_metadata(&mut self, _item: &XElement, _element: &XElement) {}
    fn visit_property(&mut self, _id: ElementId, _element: &XElement) {}
    fn visit_task(&mut self, _id: ElementId, _element: &XElement, _kind: &MsBuildElement) {}
    fn visit_target(&mut self, _id: ElementId, _element: &XElement) {}
    fn visit_import(&mut self, _id: ElementId, _element: &XElement) {}
    /// A reference found in an attribute or text value. The range is in
    /// document offsets. `enclosing_item` is the name of the item element
    /// the value belongs to, if any.
    fn visit_reference(&mut self, _reference: &Reference, _enclosing_item: Option<&str>) {}
}

/// What one walk produced besides the visitor's own state.
#[derive(Debug, Default)]
pub struct WalkResult {
    pub annotations: FxHashMap<ElementId, MsBuildKind>,
    pub diagnostics: DiagnosticCollector,
}

/// Parse options for an attribute value.
pub fn attribute_options(kind: MsBuildKind, attribute: &str) -> ExpressionOptions {
    if attribute.eq_ignore_ascii_case("Condition") {
        ExpressionOptions::CONDITION | ExpressionOptions::ITEMS | ExpressionOptions::METADATA
    } else if matches!(kind, MsBuildKind::Import | MsBuildKind::Project)
        && (attribute.eq_ignore_ascii_case("Project") || attribute.eq_ignore_ascii_case("Sdk"))
    {
        ExpressionOptions::empty()
    } else {
        ExpressionOptions::ITEMS_METADATA_AND_LISTS
    }
}

/// Walks one document against a schema.
pub struct DocumentWalker<'a> {
    schema: &'a Schema,
    document: &'a XDocument,
    result: WalkResult,
}

impl<'a> DocumentWalker<'a> {
    pub fn new(schema: &'a Schema, document: &'a XDocument) -> Self {
        Self {
            schema,
            document,
            result: WalkResult::default(),
        }
    }

    pub fn run<V: MsBuildVisitor>(mut self, visitor: &mut V) -> WalkResult {
        for error in self.document.errors() {
            self.result
                .diagnostics
                .xml_syntax(&error.message, error.range);
        }

        if let Some(root) = self.document.root() {
            self.walk(visitor, root, None, None);
        }
        self.result
    }

    fn walk<V: MsBuildVisitor>(
        &mut self,
        visitor: &mut V,
        id: ElementId,
        parent: Option<&'static MsBuildElement>,
        enclosing_item: Option<ElementId>,
    ) {
        let document = self.document;
        let element = document.element(id);

        // Elements from other namespaces are not part of the build.
        if element.name.has_prefix() {
            return;
        }

        let Some(kind) = self.schema.resolve(&element.name.local, parent) else {
            tracing::trace!(name = %element.name, "unknown element");
            self.result
                .diagnostics
                .unknown_element(&element.name.local, element.name_range);
            visitor.visit_unknown(id, element);
            return;
        };

        tracing::trace!(name = %element.name, kind = %kind.kind, "element");
        self.result.annotations.insert(id, kind.kind);
        self.validate_attributes(element, kind);

        let enclosing_item = match kind.kind {
            MsBuildKind::Item | MsBuildKind::ItemDefinition => Some(id),
            _ => enclosing_item,
        };
        let item_name = enclosing_item.map(|item| document.element(item).name.local.as_str());

        visitor.visit_element(id, element, kind);
        match kind.kind {
            MsBuildKind::Item | MsBuildKind::ItemDefinition => {
                visitor.visit_item(id, element, kind)
            }
            MsBuildKind::Metadata => {
                if let Some(item) = enclosing_item {
                    visitor.visit_metadata(document.element(item), element);
                }
            }
            MsBuildKind::Property => visitor.visit_property(id, element),
            MsBuildKind::Task => visitor.visit_task(id, element, kind),
            MsBuildKind::Target => visitor.visit_target(id, element),
            MsBuildKind::Import => visitor.visit_import(id, element),
            _ => {}
        }

        for attribute in &element.attributes {
            if is_foreign_attribute(attribute) {
                continue;
            }
            let options = attribute_options(kind.kind, &attribute.name.local);
            self.parse_value(
                visitor,
                &attribute.value,
                &attribute.value_map,
                attribute.value_range,
                options,
                item_name,
            );
        }

        if kind.is_special {
            return;
        }

        if matches!(kind.kind, MsBuildKind::Property | MsBuildKind::Metadata) {
            if let (Some(text), Some(range)) = (&element.text, element.text_range) {
                self.parse_value(
                    visitor,
                    text,
                    &element.text_map,
                    range,
                    ExpressionOptions::ITEMS_METADATA_AND_LISTS,
                    item_name,
                );
            }
        }

        for &child in &element.children {
            self.walk(visitor, child, Some(kind), enclosing_item);
        }
    }

    fn validate_attributes(&mut self, element: &XElement, kind: &MsBuildElement) {
        if kind.allows_custom_attributes {
            return;
        }
        for attribute in &element.attributes {
            if is_foreign_attribute(attribute) || kind.has_attribute(&attribute.name.local) {
                continue;
            }
            self.result.diagnostics.unknown_attribute(
                &element.name.local,
                &attribute.name.local,
                attribute.range,
            );
        }
    }

    fn parse_value<V: MsBuildVisitor>(
        &mut self,
        visitor: &mut V,
        value: &str,
        map: &OffsetMap,
        range: TextRange,
        options: ExpressionOptions,
        enclosing_item: Option<&str>,
    ) {
        if value.is_empty() {
            return;
        }
        match parse_expression(value, options) {
            Ok(expression) => {
                for reference in expression.references() {
                    let reference = reference.map_range(|range| map.range_to_document(range));
                    visitor.visit_reference(&reference, enclosing_item);
                }
            }
            Err(err) => {
                tracing::debug!(%err, "invalid expression");
                let at = map.to_document(err.position());
                self.result.diagnostics.invalid_expression(&err, at, range);
            }
        }
    }
}

fn is_foreign_attribute(attribute: &XAttribute) -> bool {
    attribute.name.has_prefix() || attribute.name.local == "xmlns"
}
