//! IDE features: high-level APIs for editor integrations.
//!
//! ## Design Principles
//!
//! 1. **Snapshots**: readers get an `Arc<ResolveContext>` that never changes
//! 2. **No LSP types**: uses our own types, converted at the LSP boundary
//! 3. **Composable**: built on top of HIR queries
//!
//! ## Usage
//!
//! ```ignore
//! use msbuild::ide::{DocumentHost, expression_trigger, expression_completions};
//!
//! let host = DocumentHost::new("/src/app.csproj", resolver);
//! host.update(text);
//!
//! if let (Some(ctx), Some(trigger)) = (host.current(), expression_trigger("$(Out")) {
//!     let items = expression_completions(&ctx, &trigger, None);
//! }
//! ```

mod completion;
mod host;

pub use completion::{
    CompletionItem, CompletionKind, ElementPath, ExpressionTrigger, expression_completions,
    expression_trigger, inferred_attributes, inferred_children, resolve_element_path,
};
pub use host::{DocumentHost, UpdateOutcome};
