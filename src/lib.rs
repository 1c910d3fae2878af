//! # msbuild-base
//!
//! Core library for MSBuild project files: expression parsing, schema-aware
//! document walking and incremental symbol resolution across imports.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → DocumentHost, element paths, completion triggers
//!   ↓
//! hir       → Symbols, builtins, visitor, resolve context, diagnostics
//!   ↓
//! project   → File system service, runtime information
//!   ↓
//! schema    → MSBuild element kinds and descriptors
//!   ↓
//! syntax    → XML documents with source spans
//!   ↓
//! parser    → Logos tokenizer, expression AST and parser
//!   ↓
//! base      → Primitives (SymbolKey, TextRange, LineIndex, paths)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → schema → project → hir → ide)
// ============================================================================

/// Foundation types: SymbolKey, TextRange, LineIndex, path normalization
pub mod base;

/// Parser: Logos tokenizer, expression AST, expression and condition parser
pub mod parser;

/// Syntax: XML document tree with spans
pub mod syntax;

/// Schema: element kinds, attributes and children
pub mod schema;

/// Project environment: file access, runtime information, tools versions
pub mod project;

/// High-level IR: symbol tables and per-generation resolution
pub mod hir;

/// IDE features: background resolution host and completion support
pub mod ide;

// Re-export foundation types
pub use base::{LineCol, LineIndex, SymbolKey, TextRange, TextSize};
