//! Minimal evaluation of import paths.
//!
//! Only the properties describing the MSBuild installation and the file
//! being evaluated are bound. Any other property evaluates to the empty
//! string; property functions and registry values cannot be evaluated.

use std::path::Path;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::base::SymbolKey;
use crate::parser::{
    Expression, ExpressionError, ExpressionOptions, NodeId, NodeKind, parse_expression,
};
use crate::project::{EXTENSION_PATH_PROPERTIES, RuntimeInformation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Expression(#[from] ExpressionError),
    #[error("property functions are not evaluated")]
    PropertyFunction,
    #[error("registry values are not evaluated")]
    RegistryValue,
    #[error("'{0}' cannot be evaluated in an import path")]
    Unsupported(String),
}

/// Property values available to import paths.
#[derive(Debug, Clone, Default)]
pub struct ImportEvaluationContext {
    values: FxHashMap<SymbolKey, String>,
    /// Properties with several candidate values, tried in order.
    search_paths: FxHashMap<SymbolKey, Vec<String>>,
}

impl ImportEvaluationContext {
    pub fn new(runtime: &RuntimeInformation) -> Self {
        let mut ctx = Self::default();
        ctx.set_property("MSBuildBinPath", &runtime.bin_path.to_string_lossy());
        ctx.set_property("MSBuildToolsPath", &runtime.tools_path.to_string_lossy());
        ctx.set_property("MSBuildToolsVersion", runtime.tools_version.as_str());

        let extension_paths: Vec<String> = runtime
            .extension_paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        for property in EXTENSION_PATH_PROPERTIES {
            if let Some(first) = extension_paths.first() {
                ctx.set_property(property, first);
            }
            if extension_paths.len() > 1 {
                ctx.search_paths
                    .insert(SymbolKey::new(property), extension_paths.clone());
            }
        }
        ctx
    }

    pub fn set_property(&mut self, name: &str, value: &str) {
        self.values.insert(SymbolKey::new(name), value.to_string());
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.values.get(&SymbolKey::new(name)).map(String::as_str)
    }

    /// Bind the `MSBuildProject*` family for the project being resolved.
    pub fn with_project(mut self, project: &Path) -> Self {
        for (name, value) in file_properties(project) {
            self.set_property(&format!("MSBuildProject{name}"), &value);
        }
        self
    }

    /// Bind the `MSBuildThisFile*` family for the file containing the
    /// import.
    pub fn for_file(&self, file: &Path) -> Self {
        let mut ctx = self.clone();
        for (name, value) in file_properties(file) {
            let name = if name == "File" {
                "MSBuildThisFile".to_string()
            } else {
                format!("MSBuildThisFile{name}")
            };
            ctx.set_property(&name, &value);
        }
        ctx
    }

    /// Evaluate `text` into candidate paths, in search order.
    pub fn evaluate(&self, text: &str) -> Result<Vec<String>, EvaluationError> {
        let expression = parse_expression(text, ExpressionOptions::empty())?;
        let mut candidates = vec![String::new()];
        self.evaluate_node(text, &expression, expression.root(), &mut candidates)?;
        Ok(candidates)
    }

    fn evaluate_node(
        &self,
        text: &str,
        expression: &Expression,
        id: NodeId,
        candidates: &mut Vec<String>,
    ) -> Result<(), EvaluationError> {
        match expression.kind(id) {
            NodeKind::Text { value, .. } | NodeKind::Number(value) => {
                for candidate in candidates.iter_mut() {
                    candidate.push_str(value);
                }
            }
            NodeKind::Concat(parts) | NodeKind::List(parts) => {
                for &part in parts {
                    self.evaluate_node(text, expression, part, candidates)?;
                }
            }
            NodeKind::Property { body } => match expression.kind(*body) {
                NodeKind::PropertyName(name) => self.substitute(name, candidates),
                NodeKind::PropertyRegistryValue(_) => return Err(EvaluationError::RegistryValue),
                _ => return Err(EvaluationError::PropertyFunction),
            },
            _ => {
                let source = &text[expression.range(id)];
                return Err(EvaluationError::Unsupported(source.to_string()));
            }
        }
        Ok(())
    }

    fn substitute(&self, name: &str, candidates: &mut Vec<String>) {
        let key = SymbolKey::new(name);
        if let Some(paths) = self.search_paths.get(&key) {
            *candidates = candidates
                .iter()
                .flat_map(|prefix| paths.iter().map(move |p| format!("{prefix}{p}")))
                .collect();
            return;
        }
        let value = self.values.get(&key).map(String::as_str).unwrap_or("");
        for candidate in candidates.iter_mut() {
            candidate.push_str(value);
        }
    }
}

/// `(suffix, value)` pairs for the `Directory`, `File`, `Name`, ... family.
fn file_properties(file: &Path) -> Vec<(&'static str, String)> {
    let directory = file
        .parent()
        .map(|p| {
            let mut dir = p.to_string_lossy().into_owned();
            if !dir.ends_with(std::path::MAIN_SEPARATOR) {
                dir.push(std::path::MAIN_SEPARATOR);
            }
            dir
        })
        .unwrap_or_default();
    let no_root = directory
        .trim_start_matches(std::path::MAIN_SEPARATOR)
        .to_string();
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    vec![
        ("Directory", directory),
        ("DirectoryNoRoot", no_root),
        ("File", file_name),
        ("FullPath", file.to_string_lossy().into_owned()),
        ("Name", stem),
        ("Extension", extension),
    ]
}

/// Whether an evaluated path contains wildcards.
pub fn is_wildcard(path: &str) -> bool {
    path.contains(['*', '?'])
}
