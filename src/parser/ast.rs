//! Expression syntax tree.
//!
//! Nodes live in a flat arena owned by [`Expression`]. A parent owns its
//! children through [`NodeId`] slots; each child keeps a non-owning back-index
//! to its parent, assigned once when the parent is allocated. Children are
//! always allocated before their parent, so the arena is in post-order.

use smol_str::SmolStr;
use text_size::TextRange;

/// Index of a node within its [`Expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Binary operators of the condition grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionOperator {
    And,
    Or,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl ConditionOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Literal text. `quoted` is set for quoted literals in conditions and
    /// function arguments.
    Text { value: SmolStr, quoted: bool },
    Number(SmolStr),

    // =========================================================================
    // PROPERTIES
    // =========================================================================
    /// `$( body )`
    Property { body: NodeId },
    PropertyName(SmolStr),
    /// `$(Registry:HKEY_LOCAL_MACHINE\Software@Value)`
    PropertyRegistryValue(SmolStr),
    /// `[System.IO.Path]` in a static property function call.
    ClassReference(SmolStr),
    /// A member access (`function` only), an indexer (`arguments` only), or a
    /// method call (both).
    PropertyFunctionInvocation {
        target: NodeId,
        function: Option<NodeId>,
        arguments: Option<NodeId>,
    },
    FunctionName(SmolStr),
    ArgumentList(Vec<NodeId>),

    // =========================================================================
    // ITEMS AND METADATA
    // =========================================================================
    /// `@(name->'transform', 'separator')`
    Item {
        name: SmolStr,
        transform: Option<NodeId>,
        separator: Option<NodeId>,
    },
    /// `->Function(args)` applied to an item list; `target` is the previous
    /// transform in a chain.
    ItemFunctionInvocation {
        target: Option<NodeId>,
        function: NodeId,
        arguments: NodeId,
    },
    /// `%(item.name)` or `%(name)`
    Metadata { item: Option<SmolStr>, name: SmolStr },

    // =========================================================================
    // CONTAINERS
    // =========================================================================
    Concat(Vec<NodeId>),
    /// Semicolon separated list.
    List(Vec<NodeId>),

    // =========================================================================
    // CONDITIONS
    // =========================================================================
    Not(NodeId),
    Binary {
        op: ConditionOperator,
        left: NodeId,
        right: NodeId,
    },
    /// `Exists('path')`, `HasTrailingSlash('$(Dir)')`
    ConditionFunction { name: NodeId, arguments: NodeId },
}

impl NodeKind {
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Self::Text { .. }
            | Self::Number(_)
            | Self::PropertyName(_)
            | Self::PropertyRegistryValue(_)
            | Self::ClassReference(_)
            | Self::FunctionName(_)
            | Self::Metadata { .. } => Vec::new(),
            Self::Property { body } | Self::Not(body) => vec![*body],
            Self::PropertyFunctionInvocation {
                target,
                function,
                arguments,
            } => std::iter::once(*target)
                .chain(*function)
                .chain(*arguments)
                .collect(),
            Self::ArgumentList(items) | Self::Concat(items) | Self::List(items) => items.clone(),
            Self::Item {
                transform,
                separator,
                ..
            } => transform.iter().chain(separator.iter()).copied().collect(),
            Self::ItemFunctionInvocation {
                target,
                function,
                arguments,
            } => target.iter().copied().chain([*function, *arguments]).collect(),
            Self::Binary { left, right, .. } => vec![*left, *right],
            Self::ConditionFunction { name, arguments } => vec![*name, *arguments],
        }
    }

    /// `$(Foo.Length)`: a function name without an argument list.
    pub fn is_property_access(&self) -> bool {
        matches!(
            self,
            Self::PropertyFunctionInvocation {
                function: Some(_),
                arguments: None,
                ..
            }
        )
    }

    /// `$(Foo[0])`: an argument list without a function name.
    pub fn is_indexer(&self) -> bool {
        matches!(
            self,
            Self::PropertyFunctionInvocation {
                function: None,
                arguments: Some(_),
                ..
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionNode {
    pub kind: NodeKind,
    pub range: TextRange,
    parent: Option<NodeId>,
}

impl ExpressionNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// A symbol reference found in an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Property {
        name: SmolStr,
        range: TextRange,
    },
    Item {
        name: SmolStr,
        range: TextRange,
    },
    Metadata {
        item: Option<SmolStr>,
        name: SmolStr,
        range: TextRange,
    },
}

impl Reference {
    pub fn name(&self) -> &str {
        match self {
            Self::Property { name, .. } | Self::Item { name, .. } | Self::Metadata { name, .. } => {
                name
            }
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            Self::Property { range, .. }
            | Self::Item { range, .. }
            | Self::Metadata { range, .. } => *range,
        }
    }

    /// The same reference with its range passed through `map`, for moving
    /// value-relative ranges into a containing document.
    pub fn map_range(&self, map: impl FnOnce(TextRange) -> TextRange) -> Reference {
        let mut mapped = self.clone();
        match &mut mapped {
            Self::Property { range, .. }
            | Self::Item { range, .. }
            | Self::Metadata { range, .. } => *range = map(*range),
        }
        mapped
    }
}

/// A parsed expression: node arena plus root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    nodes: Vec<ExpressionNode>,
    root: NodeId,
}

impl Expression {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &ExpressionNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.node(id).range
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).kind.children()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in allocation (post-) order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ExpressionNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx as u32), node))
    }

    /// Walk from `id` up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Every property, item and metadata reference, in source order.
    pub fn references(&self) -> Vec<Reference> {
        let mut references: Vec<Reference> = self
            .nodes
            .iter()
            .filter_map(|node| match &node.kind {
                NodeKind::PropertyName(name) => Some(Reference::Property {
                    name: name.clone(),
                    range: node.range,
                }),
                NodeKind::Item { name, .. } => Some(Reference::Item {
                    name: name.clone(),
                    range: node.range,
                }),
                NodeKind::Metadata { item, name } => Some(Reference::Metadata {
                    item: item.clone(),
                    name: name.clone(),
                    range: node.range,
                }),
                _ => None,
            })
            .collect();
        references.sort_by_key(|r| r.range().start());
        references
    }

    /// The deepest node whose range contains `offset`.
    pub fn node_at_offset(&self, offset: text_size::TextSize) -> Option<NodeId> {
        let mut current = self.root;
        if !self.range(current).contains_inclusive(offset) {
            return None;
        }
        'descend: loop {
            for child in self.children(current) {
                if self.range(child).contains_inclusive(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }
}

/// Allocates nodes bottom-up and links children to their parent.
#[derive(Debug, Default)]
pub(crate) struct ExpressionBuilder {
    nodes: Vec<ExpressionNode>,
}

impl ExpressionBuilder {
    pub(crate) fn alloc(&mut self, kind: NodeKind, range: TextRange) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for child in kind.children() {
            let slot = &mut self.nodes[child.index()];
            debug_assert!(slot.parent.is_none(), "node {child:?} already has a parent");
            slot.parent = Some(id);
        }
        self.nodes.push(ExpressionNode {
            kind,
            range,
            parent: None,
        });
        id
    }

    pub(crate) fn range(&self, id: NodeId) -> TextRange {
        self.nodes[id.index()].range
    }

    pub(crate) fn finish(self, root: NodeId) -> Expression {
        Expression {
            nodes: self.nodes,
            root,
        }
    }
}
