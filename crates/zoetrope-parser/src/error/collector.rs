//! Accumulates diagnostics across parsing so that one bad line does not
//! hide problems on the lines after it.

use crate::error::{Diagnostic, ParseError};

/// Collects diagnostics during a parse run.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns true if any collected diagnostic is an error.
    pub(crate) fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity().is_error())
    }

    /// Finish the run: return `value` if no errors were collected,
    /// otherwise all diagnostics wrapped in a [`ParseError`].
    pub(crate) fn finish<T>(self, value: T) -> Result<T, ParseError> {
        if self.has_errors() {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_without_errors_returns_value() {
        let collector = DiagnosticCollector::new();
        assert_eq!(collector.finish(42).unwrap(), 42);
    }

    #[test]
    fn test_warnings_do_not_fail_the_parse() {
        let mut collector = DiagnosticCollector::new();
        collector.push(Diagnostic::warning("isolated node"));
        assert!(!collector.has_errors());
        assert!(collector.finish(()).is_ok());
    }

    #[test]
    fn test_errors_fail_the_parse_with_all_diagnostics() {
        let mut collector = DiagnosticCollector::new();
        collector.push(Diagnostic::warning("isolated node"));
        collector.push(Diagnostic::error("unexpected character"));
        collector.push(Diagnostic::error("missing edge target"));

        let err = collector.finish(()).unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
    }
}
