//! Element and symbol kinds.

use std::fmt;

/// What an XML element (or an expression symbol) means to MSBuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MsBuildKind {
    Choose,
    Import,
    ImportGroup,
    Item,
    ItemDefinitionGroup,
    ItemDefinition,
    ItemGroup,
    Metadata,
    OnError,
    Otherwise,
    Output,
    Parameter,
    ParameterGroup,
    Project,
    ProjectExtensions,
    Property,
    PropertyGroup,
    Target,
    Task,
    TaskBody,
    UsingTask,
    When,

    // Symbols referenced from expressions rather than declared by elements.
    ItemReference,
    PropertyReference,
    MetadataReference,
    TaskParameter,
}

impl MsBuildKind {
    pub const ELEMENT_KINDS: &'static [MsBuildKind] = &[
        Self::Choose,
        Self::Import,
        Self::ImportGroup,
        Self::Item,
        Self::ItemDefinitionGroup,
        Self::ItemDefinition,
        Self::ItemGroup,
        Self::Metadata,
        Self::OnError,
        Self::Otherwise,
        Self::Output,
        Self::Parameter,
        Self::ParameterGroup,
        Self::Project,
        Self::ProjectExtensions,
        Self::Property,
        Self::PropertyGroup,
        Self::Target,
        Self::Task,
        Self::TaskBody,
        Self::UsingTask,
        Self::When,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Choose => "Choose",
            Self::Import => "Import",
            Self::ImportGroup => "ImportGroup",
            Self::Item => "Item",
            Self::ItemDefinitionGroup => "ItemDefinitionGroup",
            Self::ItemDefinition => "ItemDefinition",
            Self::ItemGroup => "ItemGroup",
            Self::Metadata => "Metadata",
            Self::OnError => "OnError",
            Self::Otherwise => "Otherwise",
            Self::Output => "Output",
            Self::Parameter => "Parameter",
            Self::ParameterGroup => "ParameterGroup",
            Self::Project => "Project",
            Self::ProjectExtensions => "ProjectExtensions",
            Self::Property => "Property",
            Self::PropertyGroup => "PropertyGroup",
            Self::Target => "Target",
            Self::Task => "Task",
            Self::TaskBody => "TaskBody",
            Self::UsingTask => "UsingTask",
            Self::When => "When",
            Self::ItemReference => "ItemReference",
            Self::PropertyReference => "PropertyReference",
            Self::MetadataReference => "MetadataReference",
            Self::TaskParameter => "TaskParameter",
        }
    }

    /// Pseudo-kinds for symbols found in expressions.
    pub fn is_reference(self) -> bool {
        matches!(
            self,
            Self::ItemReference
                | Self::PropertyReference
                | Self::MetadataReference
                | Self::TaskParameter
        )
    }

    /// Kinds whose element name is user-chosen (the name is the symbol).
    pub fn is_named_by_element(self) -> bool {
        matches!(
            self,
            Self::Item | Self::ItemDefinition | Self::Metadata | Self::Property | Self::Task
        )
    }
}

impl fmt::Display for MsBuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
