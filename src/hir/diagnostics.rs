//! Diagnostics: problems found while walking and resolving a document.
//!
//! Nothing found here is fatal: every problem becomes a [`Diagnostic`]
//! attached to a span of the document it was found in, and resolution of the
//! rest of the document continues.

use std::sync::Arc;

use text_size::{TextRange, TextSize};

use crate::parser::ExpressionError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// What went wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    UnknownElement,
    UnknownAttribute,
    InvalidExpression,
    XmlSyntax,
    EmptyImportValue,
    UnresolvedImport,
}

impl DiagnosticKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::UnknownElement => codes::UNKNOWN_ELEMENT,
            Self::UnknownAttribute => codes::UNKNOWN_ATTRIBUTE,
            Self::InvalidExpression => codes::INVALID_EXPRESSION,
            Self::XmlSyntax => codes::XML_SYNTAX,
            Self::EmptyImportValue => codes::EMPTY_IMPORT_VALUE,
            Self::UnresolvedImport => codes::UNRESOLVED_IMPORT,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::UnknownElement
            | Self::UnknownAttribute
            | Self::InvalidExpression
            | Self::XmlSyntax => Severity::Error,
            Self::EmptyImportValue | Self::UnresolvedImport => Severity::Warning,
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: &'static str,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Byte range in the document the diagnostic belongs to.
    pub range: TextRange,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            code: kind.code(),
            message: message.into(),
            range,
        }
    }

    /// Override the default severity for the kind.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Error Code Ranges
///
/// - **E0001-E0099**: Schema and syntax errors
/// - **W0001-W0099**: Import warnings
pub mod codes {
    /// Element not valid in its parent.
    pub const UNKNOWN_ELEMENT: &str = "E0001";
    /// Attribute not valid on its element.
    pub const UNKNOWN_ATTRIBUTE: &str = "E0002";
    /// Malformed expression or condition.
    pub const INVALID_EXPRESSION: &str = "E0003";
    /// Malformed XML.
    pub const XML_SYNTAX: &str = "E0004";

    /// Import with an empty `Project` attribute.
    pub const EMPTY_IMPORT_VALUE: &str = "W0001";
    /// Import that could not be evaluated or found.
    pub const UNRESOLVED_IMPORT: &str = "W0002";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics for one document.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn unknown_element(&mut self, name: &str, range: TextRange) {
        self.add(Diagnostic::new(
            DiagnosticKind::UnknownElement,
            range,
            format!("Unknown element '{name}'"),
        ));
    }

    pub fn unknown_attribute(&mut self, element: &str, name: &str, range: TextRange) {
        self.add(Diagnostic::new(
            DiagnosticKind::UnknownAttribute,
            range,
            format!("Unknown attribute '{name}' on element '{element}'"),
        ));
    }

    /// `at` is the document offset of the error; the diagnostic runs from
    /// there to the end of `value_range`, the span of the parsed text.
    pub fn invalid_expression(
        &mut self,
        error: &ExpressionError,
        at: TextSize,
        value_range: TextRange,
    ) {
        let at = at.clamp(value_range.start(), value_range.end());
        self.add(Diagnostic::new(
            DiagnosticKind::InvalidExpression,
            TextRange::new(at, value_range.end()),
            error.to_string(),
        ));
    }

    pub fn xml_syntax(&mut self, message: &str, range: TextRange) {
        self.add(Diagnostic::new(DiagnosticKind::XmlSyntax, range, message.to_string()));
    }

    pub fn empty_import(&mut self, range: TextRange) {
        self.add(Diagnostic::new(
            DiagnosticKind::EmptyImportValue,
            range,
            "Import has an empty 'Project' value",
        ));
    }

    pub fn unresolved_import(&mut self, message: impl Into<Arc<str>>, range: TextRange) {
        self.add(Diagnostic::new(DiagnosticKind::UnresolvedImport, range, message));
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
