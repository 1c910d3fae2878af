//! Element descriptors: built-in attributes, children and child kinds.

use super::kind::MsBuildKind;

/// Schema information for one element kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsBuildElement {
    pub kind: MsBuildKind,
    /// Built-in attribute names valid on the element.
    pub attributes: &'static [&'static str],
    /// Explicitly named children and the kind each resolves to.
    pub children: &'static [(&'static str, MsBuildKind)],
    /// Kind of any other child (e.g. every child of `PropertyGroup` is a
    /// `Property`).
    pub child_kind: Option<MsBuildKind>,
    /// Children are opaque data and are not walked.
    pub is_special: bool,
    /// Attributes outside `attributes` are symbols rather than errors
    /// (metadata on items, parameters on tasks).
    pub allows_custom_attributes: bool,
}

impl MsBuildElement {
    const fn new(kind: MsBuildKind) -> Self {
        Self {
            kind,
            attributes: CONDITION_LABEL,
            children: &[],
            child_kind: None,
            is_special: false,
            allows_custom_attributes: false,
        }
    }

    const fn attributes(mut self, attributes: &'static [&'static str]) -> Self {
        self.attributes = attributes;
        self
    }

    const fn children(mut self, children: &'static [(&'static str, MsBuildKind)]) -> Self {
        self.children = children;
        self
    }

    const fn child_kind(mut self, kind: MsBuildKind) -> Self {
        self.child_kind = Some(kind);
        self
    }

    const fn special(mut self) -> Self {
        self.is_special = true;
        self
    }

    const fn custom_attributes(mut self) -> Self {
        self.allows_custom_attributes = true;
        self
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Kind of a child named `name`, if the element permits it.
    pub fn child(&self, name: &str) -> Option<MsBuildKind> {
        self.children
            .iter()
            .find(|(child, _)| *child == name)
            .map(|(_, kind)| *kind)
            .or(self.child_kind)
    }

    /// Names valid as children, excluding the open-ended child kind.
    pub fn child_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.children.iter().map(|(name, _)| *name)
    }
}

const CONDITION_LABEL: &[&str] = &["Condition", "Label"];

use super::kind::MsBuildKind as K;

pub(crate) const ELEMENTS: &[MsBuildElement] = &[
    MsBuildElement::new(K::Project)
        .attributes(&[
            "DefaultTargets",
            "InitialTargets",
            "ToolsVersion",
            "TreatAsLocalProperty",
            "xmlns",
            "Sdk",
        ])
        .children(&[
            ("Choose", K::Choose),
            ("Import", K::Import),
            ("ImportGroup", K::ImportGroup),
            ("ItemDefinitionGroup", K::ItemDefinitionGroup),
            ("ItemGroup", K::ItemGroup),
            ("ProjectExtensions", K::ProjectExtensions),
            ("PropertyGroup", K::PropertyGroup),
            ("Target", K::Target),
            ("UsingTask", K::UsingTask),
        ]),
    MsBuildElement::new(K::Choose)
        .attributes(&[])
        .children(&[("When", K::When), ("Otherwise", K::Otherwise)]),
    MsBuildElement::new(K::When)
        .attributes(&["Condition"])
        .children(&[
            ("Choose", K::Choose),
            ("ItemGroup", K::ItemGroup),
            ("PropertyGroup", K::PropertyGroup),
        ]),
    MsBuildElement::new(K::Otherwise)
        .attributes(&[])
        .children(&[
            ("Choose", K::Choose),
            ("ItemGroup", K::ItemGroup),
            ("PropertyGroup", K::PropertyGroup),
        ]),
    MsBuildElement::new(K::Import).attributes(&[
        "Condition",
        "Project",
        "Label",
        "Sdk",
        "Version",
        "MinimumVersion",
    ]),
    MsBuildElement::new(K::ImportGroup).children(&[("Import", K::Import)]),
    MsBuildElement::new(K::ItemGroup).child_kind(K::Item),
    MsBuildElement::new(K::Item)
        .attributes(&[
            "Condition",
            "Exclude",
            "Include",
            "Remove",
            "Update",
            "KeepMetadata",
            "RemoveMetadata",
            "KeepDuplicates",
            "Label",
        ])
        .child_kind(K::Metadata)
        .custom_attributes(),
    MsBuildElement::new(K::ItemDefinitionGroup).child_kind(K::ItemDefinition),
    MsBuildElement::new(K::ItemDefinition)
        .child_kind(K::Metadata)
        .custom_attributes(),
    MsBuildElement::new(K::Metadata).attributes(&["Condition"]),
    MsBuildElement::new(K::PropertyGroup).child_kind(K::Property),
    MsBuildElement::new(K::Property).attributes(&["Condition"]),
    MsBuildElement::new(K::Target)
        .attributes(&[
            "AfterTargets",
            "BeforeTargets",
            "Condition",
            "DependsOnTargets",
            "Inputs",
            "KeepDuplicateOutputs",
            "Label",
            "Name",
            "Outputs",
            "Returns",
        ])
        .children(&[
            ("OnError", K::OnError),
            ("ItemGroup", K::ItemGroup),
            ("PropertyGroup", K::PropertyGroup),
        ])
        .child_kind(K::Task),
    MsBuildElement::new(K::OnError).attributes(&["Condition", "ExecuteTargets", "Label"]),
    MsBuildElement::new(K::Task)
        .attributes(&["Condition", "ContinueOnError", "Architecture", "Runtime"])
        .children(&[("Output", K::Output)])
        .custom_attributes(),
    MsBuildElement::new(K::Output).attributes(&[
        "Condition",
        "ItemName",
        "PropertyName",
        "TaskParameter",
    ]),
    MsBuildElement::new(K::UsingTask)
        .attributes(&[
            "AssemblyName",
            "AssemblyFile",
            "TaskName",
            "TaskFactory",
            "Condition",
            "Architecture",
            "Runtime",
        ])
        .children(&[("ParameterGroup", K::ParameterGroup), ("Task", K::TaskBody)]),
    MsBuildElement::new(K::ParameterGroup)
        .attributes(&[])
        .child_kind(K::Parameter),
    MsBuildElement::new(K::Parameter).attributes(&["Output", "ParameterType", "Required"]),
    MsBuildElement::new(K::TaskBody)
        .attributes(&["Evaluate"])
        .special(),
    MsBuildElement::new(K::ProjectExtensions)
        .attributes(&[])
        .special(),
];
