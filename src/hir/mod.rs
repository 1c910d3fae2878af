//! High-level IR (HIR): the resolved semantic model of a project file.
//!
//! ## Key Types
//!
//! - [`Resolver`] - Resolves a document and its imports into a generation
//! - [`ResolveContext`] - One immutable generation with merged symbol views
//! - [`ParsedImport`] - An imported file, shared across generations while unchanged
//! - [`SymbolMap`] - Case-insensitive symbol table
//! - [`Builtins`] - Well-known properties and metadata per tools version
//! - [`MsBuildVisitor`] / [`DocumentWalker`] - Schema-aware traversal
//!
//! ## Resolution
//!
//! ```text
//! XDocument                 ← parsed project text
//!     │
//!     ▼
//! DocumentWalker            ← element kinds, expression references
//!     │
//!     ▼
//! FileSymbols               ← items / properties / tasks / import sites
//!     │
//!     ▼
//! ResolveContext            ← + imports (cached by mtime), merged views
//! ```

mod builtins;
mod diagnostics;
mod eval;
mod resolve;
mod symbols;
mod visitor;

pub use builtins::Builtins;
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind, Severity, codes};
pub use eval::{EvaluationError, ImportEvaluationContext, is_wildcard};
pub use resolve::{
    FileSymbols, ImportSite, ImportTarget, ParsedImport, ResolveContext, ResolveError, Resolver,
};
pub use symbols::{
    ItemInfo, MetadataInfo, PropertyInfo, SymbolInfo, SymbolKind, SymbolMap, TaskInfo,
};
pub use visitor::{DocumentWalker, MsBuildVisitor, WalkResult, attribute_options};
