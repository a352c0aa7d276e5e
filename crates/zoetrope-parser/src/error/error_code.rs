//! Error codes for the Zoetrope diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexical errors
//! - `E1xx` - Statement errors
//! - `E2xx` - Header/validation errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexical Errors (E0xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A character was encountered that cannot start a node identifier.
    /// Identifiers use letters, digits, and underscores.
    E001,

    // =========================================================================
    // Statement Errors (E1xx)
    // =========================================================================
    /// Expected an arrow.
    ///
    /// After a node term, only `->` (or the end of the line) may follow.
    E100,

    /// Unclosed node label.
    ///
    /// A `[` opened a node label that is never closed before the end of
    /// the line.
    E101,

    /// Missing edge target.
    ///
    /// An `->` arrow has no node term after it.
    E102,

    // =========================================================================
    // Header Errors (E2xx)
    // =========================================================================
    /// Missing `graph` header.
    ///
    /// Diagram source must open with a `graph` header line before any
    /// node or edge statements.
    E200,

    /// Unknown flow direction.
    ///
    /// The `graph` header names a direction that is not `TD`, `TB`, or `LR`.
    E201,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
