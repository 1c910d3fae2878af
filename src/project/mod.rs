//! Project environment: file access and runtime configuration.

mod config;
mod file_system;
mod tools_version;

pub use config::{EXTENSION_PATH_PROPERTIES, ResolveOptions, RuntimeInformation};
pub use file_system::{FileSystem, MemoryFileSystem, RealFileSystem};
pub use tools_version::ToolsVersion;
