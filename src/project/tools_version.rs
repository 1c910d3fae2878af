//! The `ToolsVersion` attribute of a project.

use std::fmt;

/// The `ToolsVersion` a project declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolsVersion {
    /// No (or an unrecognized) `ToolsVersion`; the newest builtins apply.
    #[default]
    Unspecified,
    V2_0,
    V3_5,
    V4_0,
    V12_0,
    V14_0,
    V15_0,
    Current,
}

impl ToolsVersion {
    pub const ALL: &'static [ToolsVersion] = &[
        Self::Unspecified,
        Self::V2_0,
        Self::V3_5,
        Self::V4_0,
        Self::V12_0,
        Self::V14_0,
        Self::V15_0,
        Self::Current,
    ];

    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "2.0" => Self::V2_0,
            "3.5" => Self::V3_5,
            "4.0" => Self::V4_0,
            "12.0" => Self::V12_0,
            "14.0" => Self::V14_0,
            "15.0" => Self::V15_0,
            v if v.eq_ignore_ascii_case("current") => Self::Current,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::V2_0 => "2.0",
            Self::V3_5 => "3.5",
            Self::V4_0 => "4.0",
            Self::V12_0 => "12.0",
            Self::V14_0 => "14.0",
            Self::V15_0 => "15.0",
            Self::Current => "Current",
        }
    }

    /// Whether a builtin introduced in `since` is available.
    pub fn supports(self, since: ToolsVersion) -> bool {
        self == Self::Unspecified || self >= since
    }
}

impl fmt::Display for ToolsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
