//! Well-known properties and metadata, scoped by tools version.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::symbols::{MetadataInfo, PropertyInfo, SymbolMap};
use crate::project::ToolsVersion;

// ============================================================================
// TABLES
// ============================================================================

use crate::project::ToolsVersion as V;

/// (name, description, reserved, since)
const PROPERTIES: &[(&str, &str, bool, ToolsVersion)] = &[
    ("MSBuildBinPath", "Absolute path of the MSBuild bin directory", true, V::V2_0),
    ("MSBuildExtensionsPath", "Absolute path of the MSBuild extensions directory", false, V::V2_0),
    ("MSBuildExtensionsPath32", "Path of the 32-bit MSBuild extensions directory", false, V::V3_5),
    ("MSBuildExtensionsPath64", "Path of the 64-bit MSBuild extensions directory", false, V::V4_0),
    ("MSBuildLastTaskResult", "Whether the previous task completed without errors", true, V::V4_0),
    ("MSBuildNodeCount", "Maximum number of concurrent build nodes", true, V::V3_5),
    ("MSBuildProgramFiles32", "Location of the 32-bit program files folder", true, V::V4_0),
    ("MSBuildProjectDefaultTargets", "The project's DefaultTargets attribute", true, V::V2_0),
    ("MSBuildProjectDirectory", "Directory of the project file", true, V::V2_0),
    ("MSBuildProjectDirectoryNoRoot", "Project directory without the root", true, V::V2_0),
    ("MSBuildProjectExtension", "Extension of the project file", true, V::V2_0),
    ("MSBuildProjectFile", "File name of the project file", true, V::V2_0),
    ("MSBuildProjectFullPath", "Absolute path of the project file", true, V::V2_0),
    ("MSBuildProjectName", "File name of the project without extension", true, V::V2_0),
    ("MSBuildRuntimeType", "Runtime hosting MSBuild (Full, Core or Mono)", true, V::V15_0),
    ("MSBuildStartupDirectory", "Directory MSBuild was invoked from", true, V::V3_5),
    ("MSBuildThisFile", "File name of the file containing the reference", true, V::V4_0),
    ("MSBuildThisFileDirectory", "Directory of the file containing the reference", true, V::V4_0),
    ("MSBuildThisFileDirectoryNoRoot", "Directory of this file without the root", true, V::V4_0),
    ("MSBuildThisFileExtension", "Extension of the file containing the reference", true, V::V4_0),
    ("MSBuildThisFileFullPath", "Absolute path of the current file", true, V::V4_0),
    ("MSBuildThisFileName", "Name of the current file without extension", true, V::V4_0),
    ("MSBuildToolsPath", "Directory of the MSBuild tools for the tools version", true, V::V3_5),
    ("MSBuildToolsVersion", "Tools version used to build the project", true, V::V3_5),
];

/// (name, description, since)
const METADATA: &[(&str, &str, ToolsVersion)] = &[
    ("AccessedTime", "Time the item was last accessed", V::V2_0),
    ("CreatedTime", "Time the item was created", V::V2_0),
    ("DefiningProjectDirectory", "Directory of the project that defined the item", V::V4_0),
    ("DefiningProjectExtension", "Extension of the project that defined the item", V::V4_0),
    ("DefiningProjectFullPath", "Absolute path of the project that defined the item", V::V4_0),
    ("DefiningProjectName", "Name of the project that defined the item", V::V4_0),
    ("Directory", "Directory of the item, without the root", V::V2_0),
    ("Extension", "File name extension of the item", V::V2_0),
    ("Filename", "File name of the item without extension", V::V2_0),
    ("FullPath", "Absolute path of the item", V::V2_0),
    ("Identity", "The item specification as written", V::V2_0),
    ("ModifiedTime", "Time the item was last modified", V::V2_0),
    ("RecursiveDir", "Directory matched by a recursive wildcard", V::V2_0),
    ("RelativeDir", "Directory of the item as written", V::V2_0),
    ("RootDir", "Root directory of the item", V::V2_0),
];

static BUILTINS: LazyLock<FxHashMap<ToolsVersion, Builtins>> = LazyLock::new(|| {
    ToolsVersion::ALL
        .iter()
        .map(|&version| (version, Builtins::build(version)))
        .collect()
});

/// The builtin symbol set for one tools version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builtins {
    pub tools_version: ToolsVersion,
    pub properties: SymbolMap<PropertyInfo>,
    pub metadata: SymbolMap<MetadataInfo>,
}

impl Builtins {
    fn build(tools_version: ToolsVersion) -> Self {
        let mut properties = SymbolMap::new();
        for &(name, description, reserved, since) in PROPERTIES {
            if tools_version.supports(since) {
                properties.insert(name, PropertyInfo::builtin(name, description, reserved));
            }
        }

        let mut metadata = SymbolMap::new();
        for &(name, description, since) in METADATA {
            if tools_version.supports(since) {
                metadata.insert(name, MetadataInfo::builtin(name, description));
            }
        }

        Self {
            tools_version,
            properties,
            metadata,
        }
    }

    pub fn for_tools_version(version: ToolsVersion) -> &'static Builtins {
        &BUILTINS[&version]
    }

    pub fn is_property(&self, name: &str) -> bool {
        self.properties.contains(name)
    }

    pub fn is_metadata(&self, name: &str) -> bool {
        self.metadata.contains(name)
    }
}
