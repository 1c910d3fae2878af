//! Runtime information and resolution options.

use std::path::PathBuf;
use std::time::Duration;

use super::tools_version::ToolsVersion;

/// Properties whose values are the extension search paths.
pub const EXTENSION_PATH_PROPERTIES: &[&str] = &[
    "MSBuildExtensionsPath",
    "MSBuildExtensionsPath32",
    "MSBuildExtensionsPath64",
];

/// Where the MSBuild installation lives.
///
/// Only these paths are substituted when evaluating import paths.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuntimeInformation {
    pub tools_version: ToolsVersion,
    pub bin_path: PathBuf,
    pub tools_path: PathBuf,
    /// Candidate directories for the `MSBuildExtensionsPath` family, tried in
    /// order.
    pub extension_paths: Vec<PathBuf>,
    /// Directory containing `<Sdk>/Sdk/Sdk.props`; SDK imports are skipped
    /// when unset.
    pub sdks_path: Option<PathBuf>,
}

impl Default for RuntimeInformation {
    fn default() -> Self {
        Self {
            tools_version: ToolsVersion::V15_0,
            bin_path: PathBuf::from("/usr/lib/mono/msbuild/15.0/bin"),
            tools_path: PathBuf::from("/usr/lib/mono/msbuild/15.0/bin"),
            extension_paths: vec![PathBuf::from("/usr/lib/mono/xbuild")],
            sdks_path: None,
        }
    }
}

impl RuntimeInformation {
    pub fn with_tools_version(mut self, tools_version: ToolsVersion) -> Self {
        self.tools_version = tools_version;
        self
    }

    pub fn with_bin_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bin_path = path.into();
        self
    }

    pub fn with_tools_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tools_path = path.into();
        self
    }

    pub fn with_extension_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.extension_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sdks_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sdks_path = Some(path.into());
        self
    }

    /// Search paths for one of [`EXTENSION_PATH_PROPERTIES`].
    pub fn search_paths(&self, property: &str) -> Option<&[PathBuf]> {
        EXTENSION_PATH_PROPERTIES
            .iter()
            .any(|p| p.eq_ignore_ascii_case(property))
            .then_some(self.extension_paths.as_slice())
    }

    /// `<sdks>/<name>/Sdk` for an SDK reference.
    pub fn sdk_directory(&self, name: &str) -> Option<PathBuf> {
        let name = name.split('/').next().unwrap_or(name).trim();
        if name.is_empty() {
            return None;
        }
        self.sdks_path
            .as_deref()
            .map(|sdks| sdks.join(name).join("Sdk"))
    }
}

/// Options for one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolveOptions {
    /// Show `_`-prefixed symbols from imports in merged views.
    pub show_private_symbols: bool,
    /// Minimum time between background resolutions of one document.
    pub debounce: Duration,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            show_private_symbols: false,
            debounce: Duration::from_millis(500),
        }
    }
}
