//! The core diagnostic type for the Zoetrope error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, labeled source spans, and help text.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A rich diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[E101]: node label is never closed
///   --> input.zoe:3:8
///    |
///  3 | api[API Gateway -> db
///    |    ^ label opened here
///    |
///    = help: close the label with `]`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use zoetrope_parser::error::{Diagnostic, ErrorCode};
    /// # use zoetrope_parser::Span;
    ///
    /// let diag = Diagnostic::error("expected `->` after node term")
    ///     .with_code(ErrorCode::E100)
    ///     .with_label(Span::new(8..9), "unexpected input");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E100]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_diagnostic_defaults() {
        let diag = Diagnostic::error("boom");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "boom");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_builder_chain() {
        let diag = Diagnostic::error("node label is never closed")
            .with_code(ErrorCode::E101)
            .with_label(Span::new(3..4), "label opened here")
            .with_secondary_label(Span::new(0..3), "in this node term")
            .with_help("close the label with `]`");

        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(!diag.labels()[1].is_primary());
        assert_eq!(diag.help(), Some("close the label with `]`"));
    }

    #[test]
    fn test_display_with_and_without_code() {
        let with_code = Diagnostic::error("unexpected character").with_code(ErrorCode::E001);
        assert_eq!(with_code.to_string(), "error[E001]: unexpected character");

        let without = Diagnostic::warning("isolated node");
        assert_eq!(without.to_string(), "warning: isolated node");
    }
}
