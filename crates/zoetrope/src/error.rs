//! Error types for Zoetrope pipeline operations.
//!
//! This module provides the main error type [`ZoetropeError`] which wraps
//! the failure modes of the compile and export pipeline.

use std::io;

use thiserror::Error;

use zoetrope_parser::error::ParseError;

/// The main error type for Zoetrope pipeline operations.
///
/// # Diagnostic Variants
///
/// The `Compile` variant carries structured diagnostics with source code
/// spans, suitable for rich error reporting. The remaining variants are
/// plain failures without source locations.
#[derive(Debug, Error)]
pub enum ZoetropeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Compile { err: ParseError, src: String },

    #[error("no diagram to export")]
    NoDiagram,

    #[error("Encode error: {0}")]
    Encode(Box<dyn std::error::Error + Send + Sync>),
}

impl ZoetropeError {
    /// Create a new `Compile` error with the associated source code.
    pub fn new_compile_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Compile {
            err,
            src: src.into(),
        }
    }
}

impl From<crate::export::EncodeError> for ZoetropeError {
    fn from(error: crate::export::EncodeError) -> Self {
        Self::Encode(Box::new(error))
    }
}

impl From<crate::engine::CompileError> for ZoetropeError {
    fn from(error: crate::engine::CompileError) -> Self {
        let (err, src) = error.into_parts();
        Self::Compile { err, src }
    }
}
