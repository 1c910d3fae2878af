//! MSBuild schema lookup.
//!
//! Element names are resolved relative to the kind of their parent, so the
//! same tag can mean different things in different places: `Output` is a
//! task output under a task but a task invocation directly under a target,
//! and `Task` is a task body under `UsingTask`.

mod element;
mod kind;

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

pub use element::MsBuildElement;
pub use kind::MsBuildKind;

static STANDARD: LazyLock<Schema> = LazyLock::new(|| Schema::new(element::ELEMENTS));

/// Element descriptors indexed by kind.
#[derive(Debug)]
pub struct Schema {
    elements: FxHashMap<MsBuildKind, &'static MsBuildElement>,
}

impl Schema {
    fn new(elements: &'static [MsBuildElement]) -> Self {
        Self {
            elements: elements.iter().map(|e| (e.kind, e)).collect(),
        }
    }

    /// The built-in MSBuild schema.
    pub fn standard() -> &'static Schema {
        &STANDARD
    }

    pub fn get(&self, kind: MsBuildKind) -> Option<&'static MsBuildElement> {
        self.elements.get(&kind).copied()
    }

    /// Resolve an element's local name given its parent's descriptor.
    ///
    /// At the document root only `Project` is recognized. Children of special
    /// elements are never resolved.
    pub fn resolve(
        &self,
        name: &str,
        parent: Option<&MsBuildElement>,
    ) -> Option<&'static MsBuildElement> {
        let kind = match parent {
            None => (name == "Project").then_some(MsBuildKind::Project)?,
            Some(parent) if parent.is_special => return None,
            Some(parent) => parent.child(name)?,
        };
        self.get(kind)
    }

    /// Resolve a path of element names from the document root.
    pub fn resolve_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&'static MsBuildElement> {
        let mut current = None;
        for name in path {
            current = Some(self.resolve(name.as_ref(), current)?);
        }
        current
    }
}
