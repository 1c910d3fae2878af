//! Symbol types and case-insensitive symbol tables.
//!
//! Every table is keyed by [`SymbolKey`], so two symbols whose names differ
//! only by case are the same symbol. The first spelling seen is the one kept
//! for display.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::SymbolKey;
use crate::schema::MsBuildKind;

/// The kind of symbol a table entry describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Item,
    Metadata,
    Property,
    Task,
    TaskParameter,
}

impl SymbolKind {
    /// The pseudo-kind used for references to this symbol.
    pub fn reference_kind(self) -> MsBuildKind {
        match self {
            SymbolKind::Item => MsBuildKind::ItemReference,
            SymbolKind::Metadata => MsBuildKind::MetadataReference,
            SymbolKind::Property => MsBuildKind::PropertyReference,
            SymbolKind::Task => MsBuildKind::Task,
            SymbolKind::TaskParameter => MsBuildKind::TaskParameter,
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            SymbolKind::Item => "item",
            SymbolKind::Metadata => "metadata",
            SymbolKind::Property => "property",
            SymbolKind::Task => "task",
            SymbolKind::TaskParameter => "task parameter",
        }
    }
}

/// Common surface of all symbol infos.
pub trait SymbolInfo {
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn kind(&self) -> SymbolKind;

    fn key(&self) -> SymbolKey {
        SymbolKey::new(self.name())
    }
}

// ============================================================================
// SYMBOL MAP
// ============================================================================

/// Insertion-ordered map from case-insensitive name to `T`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolMap<T> {
    entries: IndexMap<SymbolKey, T>,
}

impl<T> Default for SymbolMap<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T> SymbolMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&SymbolKey::new(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&SymbolKey::new(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&SymbolKey::new(name))
    }

    /// Insert, replacing any entry whose name matches ignoring case.
    pub fn insert(&mut self, name: &str, value: T) -> Option<T> {
        self.entries.insert(SymbolKey::new(name), value)
    }

    pub fn get_or_insert_with(&mut self, name: &str, make: impl FnOnce() -> T) -> &mut T {
        self.entries
            .entry(SymbolKey::new(name))
            .or_insert_with(make)
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.entries.shift_remove(&SymbolKey::new(name))
    }

    pub fn keys(&self) -> impl Iterator<Item = &SymbolKey> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SymbolKey, &T)> {
        self.entries.iter()
    }
}

impl<'a, T> IntoIterator for &'a SymbolMap<T> {
    type Item = (&'a SymbolKey, &'a T);
    type IntoIter = indexmap::map::Iter<'a, SymbolKey, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// SYMBOL INFOS
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: SmolStr,
    pub description: Option<SmolStr>,
    /// Defined by MSBuild itself.
    pub well_known: bool,
    /// May not be assigned by project files.
    pub reserved: bool,
}

impl PropertyInfo {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            well_known: false,
            reserved: false,
        }
    }

    pub fn builtin(name: &str, description: &str, reserved: bool) -> Self {
        Self {
            name: SmolStr::new(name),
            description: Some(SmolStr::new(description)),
            well_known: true,
            reserved,
        }
    }
}

impl SymbolInfo for PropertyInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn kind(&self) -> SymbolKind {
        SymbolKind::Property
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataInfo {
    pub name: SmolStr,
    pub description: Option<SmolStr>,
    /// Available on every item (`FullPath`, `Filename`, ...).
    pub well_known: bool,
}

impl MetadataInfo {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            well_known: false,
        }
    }

    pub fn builtin(name: &str, description: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            description: Some(SmolStr::new(description)),
            well_known: true,
        }
    }
}

impl SymbolInfo for MetadataInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn kind(&self) -> SymbolKind {
        SymbolKind::Metadata
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemInfo {
    pub name: SmolStr,
    pub description: Option<SmolStr>,
    pub metadata: SymbolMap<MetadataInfo>,
}

impl ItemInfo {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            metadata: SymbolMap::new(),
        }
    }

    /// Record metadata `name`; returns false if it was already known.
    pub fn add_metadata(&mut self, name: &str) -> bool {
        if self.metadata.contains(name) {
            return false;
        }
        self.metadata.insert(name, MetadataInfo::new(name));
        true
    }

    /// Union in metadata from another view of the same item.
    pub fn merge_from(&mut self, other: &ItemInfo) {
        for metadata in other.metadata.values() {
            if !self.metadata.contains(&metadata.name) {
                self.metadata.insert(&metadata.name, metadata.clone());
            }
        }
        if self.description.is_none() {
            self.description = other.description.clone();
        }
    }
}

impl SymbolInfo for ItemInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn kind(&self) -> SymbolKind {
        SymbolKind::Item
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskInfo {
    pub name: SmolStr,
    pub description: Option<SmolStr>,
    /// Parameter names, keyed case-insensitively.
    pub parameters: SymbolMap<SmolStr>,
}

impl TaskInfo {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: SymbolMap::new(),
        }
    }

    pub fn add_parameter(&mut self, name: &str) -> bool {
        if self.parameters.contains(name) {
            return false;
        }
        self.parameters.insert(name, SmolStr::new(name));
        true
    }

    pub fn merge_from(&mut self, other: &TaskInfo) {
        for parameter in other.parameters.values() {
            self.add_parameter(parameter);
        }
    }
}

impl SymbolInfo for TaskInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn kind(&self) -> SymbolKind {
        SymbolKind::Task
    }
}
