//! Completion support: element paths, inferred children and attributes, and
//! expression triggers.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::hir::{ResolveContext, SymbolInfo};
use crate::schema::{MsBuildElement, MsBuildKind, Schema};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Element,
    Attribute,
    Item,
    Property,
    Metadata,
    Task,
    TaskParameter,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Element => 7,        // Class
            CompletionKind::Attribute => 5,      // Field
            CompletionKind::Item => 18,          // Reference
            CompletionKind::Property => 10,      // Property
            CompletionKind::Metadata => 5,       // Field
            CompletionKind::Task => 3,           // Function
            CompletionKind::TaskParameter => 6,  // Variable
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            documentation: None,
            sort_priority: 100,
        }
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    fn from_symbol(symbol: &impl SymbolInfo, kind: CompletionKind) -> Self {
        let item = Self::new(symbol.name(), kind);
        match symbol.description() {
            Some(doc) => item.with_documentation(doc),
            None => item,
        }
    }
}

// ============================================================================
// ELEMENT PATHS
// ============================================================================

/// The schema position described by a path of element names.
#[derive(Clone, Debug)]
pub struct ElementPath {
    /// Element names from the root, as written.
    pub names: Vec<SmolStr>,
    pub element: &'static MsBuildElement,
    /// Trailing attribute name, if the path ends at an attribute.
    pub attribute: Option<SmolStr>,
}

impl ElementPath {
    pub fn kind(&self) -> MsBuildKind {
        self.element.kind
    }

    pub fn child_kind(&self) -> Option<MsBuildKind> {
        self.element.child_kind
    }

    pub fn builtin_attributes(&self) -> &'static [&'static str] {
        self.element.attributes
    }

    pub fn builtin_children(&self) -> Vec<&'static str> {
        self.element.child_names().collect()
    }

    /// The innermost element name.
    pub fn name(&self) -> &str {
        self.names.last().map(SmolStr::as_str).unwrap_or("")
    }

    /// The enclosing element name, e.g. the item for a metadata element.
    pub fn parent_name(&self) -> Option<&str> {
        let len = self.names.len();
        (len >= 2).then(|| self.names[len - 2].as_str())
    }
}

/// Resolve `path` (element names from the root) against `schema`.
///
/// Returns `None` if any element is unknown or sits inside a special
/// element.
pub fn resolve_element_path<S: AsRef<str>>(
    schema: &Schema,
    path: &[S],
    attribute: Option<&str>,
) -> Option<ElementPath> {
    let element = schema.resolve_path(path)?;
    Some(ElementPath {
        names: path.iter().map(|name| SmolStr::new(name.as_ref())).collect(),
        element,
        attribute: attribute.map(SmolStr::new),
    })
}

/// Child elements valid under `path`: schema children plus the context's
/// symbols for open-ended children.
pub fn inferred_children(context: &ResolveContext, path: &ElementPath) -> Vec<CompletionItem> {
    let mut completions: Vec<CompletionItem> = path
        .builtin_children()
        .into_iter()
        .map(|name| CompletionItem::new(name, CompletionKind::Element).with_priority(10))
        .collect();

    match path.kind() {
        MsBuildKind::ItemGroup => completions.extend(
            context
                .items()
                .values()
                .map(|item| CompletionItem::from_symbol(item, CompletionKind::Item)),
        ),
        MsBuildKind::PropertyGroup => completions.extend(
            context
                .properties(false)
                .values()
                .map(|property| CompletionItem::from_symbol(property, CompletionKind::Property)),
        ),
        MsBuildKind::Target => completions.extend(
            context
                .tasks()
                .values()
                .map(|task| CompletionItem::from_symbol(task, CompletionKind::Task)),
        ),
        MsBuildKind::Item | MsBuildKind::ItemDefinition => completions.extend(
            context
                .item_metadata(path.name(), false)
                .iter()
                .map(|metadata| CompletionItem::from_symbol(metadata, CompletionKind::Metadata)),
        ),
        _ => {}
    }
    completions
}

/// Attributes valid on the element at `path`: builtin attributes, then item
/// metadata or task parameters.
pub fn inferred_attributes(context: &ResolveContext, path: &ElementPath) -> Vec<CompletionItem> {
    let mut completions: Vec<CompletionItem> = path
        .builtin_attributes()
        .iter()
        .map(|&name| CompletionItem::new(name, CompletionKind::Attribute).with_priority(10))
        .collect();

    match path.kind() {
        MsBuildKind::Item | MsBuildKind::ItemDefinition => completions.extend(
            context
                .item_metadata(path.name(), false)
                .iter()
                .map(|metadata| CompletionItem::from_symbol(metadata, CompletionKind::Metadata)),
        ),
        MsBuildKind::Task => {
            if let Some(task) = context.task(path.name()) {
                completions.extend(task.parameters.values().map(|parameter| {
                    CompletionItem::new(parameter.as_str(), CompletionKind::TaskParameter)
                }));
            }
        }
        _ => {}
    }
    completions
}

// ============================================================================
// EXPRESSION TRIGGERS
// ============================================================================

/// An open reference immediately before the caret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpressionTrigger {
    /// `$(Pre`
    Property { prefix: SmolStr },
    /// `@(Pre`
    Item { prefix: SmolStr },
    /// `%(Pre` or `%(Item.Pre`
    Metadata {
        item: Option<SmolStr>,
        prefix: SmolStr,
    },
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Detect `$(`, `@(` or `%(` before the caret, followed only by a partial
/// name.
pub fn expression_trigger(text_before_caret: &str) -> Option<ExpressionTrigger> {
    let open = text_before_caret.rfind('(')?;
    let sigil = text_before_caret[..open].chars().next_back()?;
    let typed = &text_before_caret[open + 1..];

    match sigil {
        '$' if typed.chars().all(is_name_char) => Some(ExpressionTrigger::Property {
            prefix: SmolStr::new(typed),
        }),
        '@' if typed.chars().all(is_name_char) => Some(ExpressionTrigger::Item {
            prefix: SmolStr::new(typed),
        }),
        '%' => {
            let (item, prefix) = match typed.split_once('.') {
                Some((item, prefix)) => (Some(item), prefix),
                None => (None, typed),
            };
            let valid = item.is_none_or(|item| !item.is_empty() && item.chars().all(is_name_char))
                && prefix.chars().all(is_name_char);
            valid.then(|| ExpressionTrigger::Metadata {
                item: item.map(SmolStr::new),
                prefix: SmolStr::new(prefix),
            })
        }
        _ => None,
    }
}

/// Symbols matching an expression trigger, filtered by its prefix.
///
/// Unqualified metadata completes against `enclosing_item` when given.
pub fn expression_completions(
    context: &ResolveContext,
    trigger: &ExpressionTrigger,
    enclosing_item: Option<&str>,
) -> Vec<CompletionItem> {
    let matches = |name: &str, prefix: &str| {
        name.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };

    match trigger {
        ExpressionTrigger::Property { prefix } => context
            .properties(true)
            .values()
            .filter(|p| matches(&p.name, prefix))
            .map(|p| {
                let priority = if p.well_known { 50 } else { 10 };
                CompletionItem::from_symbol(p, CompletionKind::Property).with_priority(priority)
            })
            .collect(),
        ExpressionTrigger::Item { prefix } => context
            .items()
            .values()
            .filter(|i| matches(&i.name, prefix))
            .map(|i| CompletionItem::from_symbol(i, CompletionKind::Item))
            .collect(),
        ExpressionTrigger::Metadata { item, prefix } => {
            let Some(item) = item.as_deref().or(enclosing_item) else {
                return Vec::new();
            };
            context
                .item_metadata(item, true)
                .iter()
                .filter(|m| matches(&m.name, prefix))
                .map(|m| {
                    let priority = if m.well_known { 50 } else { 10 };
                    CompletionItem::from_symbol(m, CompletionKind::Metadata).with_priority(priority)
                })
                .collect()
        }
    }
}
