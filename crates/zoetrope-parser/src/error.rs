//! Error and diagnostic system for the Zoetrope parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, labeled source
//! locations, and help text. Multiple diagnostics are wrapped in
//! [`ParseError`] for returning from the parsing lifecycle.
//!
//! # Example
//!
//! ```
//! # use zoetrope_parser::error::{Diagnostic, ErrorCode};
//! # use zoetrope_parser::Span;
//!
//! let span = Span::new(12..13);
//!
//! let diag = Diagnostic::error("node label is never closed")
//!     .with_code(ErrorCode::E101)
//!     .with_label(span, "label opened here")
//!     .with_help("close the label with `]`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
