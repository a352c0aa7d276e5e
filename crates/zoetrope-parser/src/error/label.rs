//! Labeled source spans for diagnostic messages.
//!
//! A label associates a message with a span in the source code. Primary
//! labels mark the main location of a diagnostic; secondary labels provide
//! supporting context such as "label opened here".

use crate::span::Span;

/// A labeled span in source code.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label marking the main location of a diagnostic.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label providing additional context.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_and_secondary_labels() {
        let primary = Label::primary(Span::new(4..8), "here");
        assert!(primary.is_primary());
        assert_eq!(primary.span().start(), 4);
        assert_eq!(primary.message(), "here");

        let secondary = Label::secondary(Span::new(0..2), "opened here");
        assert!(!secondary.is_primary());
    }
}
