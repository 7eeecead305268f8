//! Reify Diagnostics - error messages for member type resolution.
//!
//! This crate provides:
//!
//! - `Diagnostic` - the diagnostic value with code, severity, message and subject
//! - `DiagnosticSeverity` - Error, Note and Help levels
//! - `ErrorCodeRegistry` - registry of standardized error codes
//! - Terminal rendering with color support (see [`render`])
//!
//! # Example
//!
//! ```rust
//! use reify_diagnostics::{Diagnostic, DiagnosticSeverity};
//!
//! let diagnostic = Diagnostic::error("E2001", "cannot resolve type variable `T`")
//!     .with_subject("Box<String>")
//!     .with_child(Diagnostic::note("`T` is parameter #0 of `Crate`"));
//!
//! assert_eq!(diagnostic.severity, DiagnosticSeverity::Error);
//! assert_eq!(diagnostic.code, Some("E2001".to_string()));
//! ```

pub mod render;

use std::collections::BTreeMap;
use thiserror::Error;

/// The severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiagnosticSeverity {
    /// A failure that aborts resolution.
    #[default]
    Error,
    /// Informational note, usually attached to another diagnostic.
    Note,
    /// A suggestion for fixing an issue.
    Help,
}

impl DiagnosticSeverity {
    /// Returns the text prefix for this severity level.
    pub fn prefix(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Note => "note",
            DiagnosticSeverity::Help => "help",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DiagnosticSeverity::Error)
    }
}

/// A diagnostic (error, note, or help message).
///
/// Type expressions carry no source locations, so instead of spans a
/// diagnostic names its `subject`: the expression or member it is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The error code (e.g., "E2001").
    pub code: Option<String>,
    /// The severity level.
    pub severity: DiagnosticSeverity,
    /// The main message.
    pub message: String,
    /// What the diagnostic is about, e.g. `Box<String>` or `List<?>`.
    pub subject: Option<String>,
    /// Child diagnostics (notes and helps attached to this diagnostic).
    pub children: Vec<Diagnostic>,
}

impl Diagnostic {
    fn new(severity: DiagnosticSeverity, code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            subject: None,
            children: Vec::new(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, Some(code.into()), message)
    }

    /// Creates a note diagnostic (usually attached to another diagnostic).
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Note, None, message)
    }

    /// Creates a help diagnostic.
    pub fn help(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Help, None, message)
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a child diagnostic (note or help).
    pub fn with_child(mut self, child: Diagnostic) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the documentation URL for this diagnostic.
    pub fn docs_url(&self, base_url: &str) -> Option<String> {
        self.code.as_ref().map(|code| format!("{}/{}", base_url, code))
    }

    /// The category of this diagnostic's code, if it has a valid one.
    pub fn category(&self) -> Option<ErrorCategory> {
        self.code.as_deref().and_then(ErrorCategory::from_code)
    }
}

/// Error categories for the error code registry.
///
/// Error codes follow the pattern EXXXX where the first digit indicates
/// the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// E1XXX: Type shape errors (unsupported expressions)
    Shape,
    /// E2XXX: Binding errors (unresolvable type variables)
    Binding,
}

impl ErrorCategory {
    /// Creates a category from an error code.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        if chars.next()? != 'E' || code.len() != 5 {
            return None;
        }
        if !code[1..].chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        match chars.next()? {
            '1' => Some(ErrorCategory::Shape),
            '2' => Some(ErrorCategory::Binding),
            _ => None,
        }
    }
}

/// Information about a registered error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCodeInfo {
    /// The error code (e.g., "E1001").
    pub code: String,
    /// The category this error belongs to.
    pub category: ErrorCategory,
    /// A brief description of this error.
    pub description: String,
}

impl ErrorCodeInfo {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Option<Self> {
        let code = code.into();
        let category = ErrorCategory::from_code(&code)?;
        Some(Self {
            code,
            category,
            description: description.into(),
        })
    }
}

/// Code for a declared type that is not one of the four supported shapes.
pub const UNSUPPORTED_TYPE_EXPRESSION: &str = "E1001";
/// Code for a type variable with no matching argument in its context.
pub const UNRESOLVABLE_TYPE_VARIABLE: &str = "E2001";

/// Registry of all known error codes.
#[derive(Debug, Default)]
pub struct ErrorCodeRegistry {
    codes: BTreeMap<String, ErrorCodeInfo>,
}

impl ErrorCodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the standard resolution error codes.
    pub fn with_standard_codes() -> Self {
        let mut registry = Self::new();
        registry.register(UNSUPPORTED_TYPE_EXPRESSION, "unsupported type expression");
        registry.register(UNRESOLVABLE_TYPE_VARIABLE, "unresolvable type variable");
        registry
    }

    /// Registers a new error code. Returns `false` for a malformed code.
    pub fn register(&mut self, code: impl Into<String>, description: impl Into<String>) -> bool {
        let code = code.into();
        match ErrorCodeInfo::new(code.clone(), description) {
            Some(info) => {
                self.codes.insert(code, info);
                true
            }
            None => false,
        }
    }

    /// Looks up a code, failing for unknown ones.
    pub fn lookup(&self, code: &str) -> DiagnosticResult<&ErrorCodeInfo> {
        self.codes
            .get(code)
            .ok_or_else(|| DiagnosticError::InvalidErrorCode(code.to_string()))
    }
}

/// Result type for diagnostic operations.
pub type DiagnosticResult<T> = Result<T, DiagnosticError>;

/// Errors that can occur during diagnostic operations.
#[derive(Debug, Error)]
pub enum DiagnosticError {
    /// An unknown error code was used.
    #[error("invalid error code: {0}")]
    InvalidErrorCode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diagnostic_severity() {
        assert_eq!(DiagnosticSeverity::Error.prefix(), "error");
        assert_eq!(DiagnosticSeverity::Help.prefix(), "help");
        assert!(DiagnosticSeverity::Error.is_error());
        assert!(!DiagnosticSeverity::Note.is_error());
    }

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::error("E2001", "cannot resolve type variable `T`");
        assert_eq!(diag.severity, DiagnosticSeverity::Error);
        assert_eq!(diag.code, Some("E2001".to_string()));
        assert_eq!(diag.category(), Some(ErrorCategory::Binding));
        assert!(diag.subject.is_none());
        assert!(diag.children.is_empty());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(ErrorCategory::from_code("E1001"), Some(ErrorCategory::Shape));
        assert_eq!(ErrorCategory::from_code("E2001"), Some(ErrorCategory::Binding));
        assert_eq!(ErrorCategory::from_code("E3001"), None);
        assert_eq!(ErrorCategory::from_code("E20x1"), None);
        assert_eq!(ErrorCategory::from_code("invalid"), None);
    }

    #[test]
    fn test_error_registry() {
        let registry = ErrorCodeRegistry::with_standard_codes();

        let info = registry.lookup(UNRESOLVABLE_TYPE_VARIABLE).unwrap();
        assert_eq!(info.description, "unresolvable type variable");
        assert_eq!(info.category, ErrorCategory::Binding);
        assert_eq!(
            registry.lookup(UNSUPPORTED_TYPE_EXPRESSION).unwrap().category,
            ErrorCategory::Shape
        );

        assert!(matches!(
            registry.lookup("E1999"),
            Err(DiagnosticError::InvalidErrorCode(_))
        ));
    }

    #[test]
    fn test_register_rejects_malformed_codes() {
        let mut registry = ErrorCodeRegistry::new();
        assert!(!registry.register("X0001", "bad"));
        assert!(registry.lookup("X0001").is_err());
        assert!(registry.register("E1002", "wildcard bound"));
        assert!(registry.lookup("E1002").is_ok());
    }

    #[test]
    fn test_docs_url() {
        let diag = Diagnostic::error("E1001", "unsupported type expression");
        let url = diag.docs_url("https://docs.example/errors");
        assert_eq!(url, Some("https://docs.example/errors/E1001".to_string()));
        assert_eq!(Diagnostic::note("plain").docs_url("https://docs.example/errors"), None);
    }
}
