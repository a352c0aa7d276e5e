//! The layout engine seam.
//!
//! The pipeline never compiles diagram source itself: it hands the cleaned
//! text to a [`DiagramEngine`] and receives either a positioned
//! [`Scene`](zoetrope_core::scene::Scene) or a structured [`CompileError`].
//! The bundled [`GraphEngine`] implements the seam for the Zoetrope graph
//! language; alternative engines only need to satisfy this trait.

mod graph;

pub use graph::GraphEngine;

use std::future::Future;

use thiserror::Error;

use zoetrope_core::scene::Scene;
use zoetrope_parser::error::ParseError;

/// A structured compile failure from a diagram engine.
///
/// Carries the engine's diagnostics together with the source text they
/// refer to, so callers can render labeled spans.
#[derive(Debug, Error)]
#[error("{err}")]
pub struct CompileError {
    err: ParseError,
    src: String,
}

impl CompileError {
    /// Create a compile error from engine diagnostics and the compiled
    /// source.
    pub fn new(err: ParseError, src: impl Into<String>) -> Self {
        Self {
            err,
            src: src.into(),
        }
    }

    /// The engine's diagnostics.
    pub fn diagnostics(&self) -> &ParseError {
        &self.err
    }

    /// The source text the diagnostics refer to.
    pub fn source_text(&self) -> &str {
        &self.src
    }

    /// Splits the error into diagnostics and source text.
    pub fn into_parts(self) -> (ParseError, String) {
        (self.err, self.src)
    }
}

/// An engine that compiles diagram source into a scene.
///
/// `compile_id` is unique per compile attempt; engines may use it to
/// namespace caches or internal element ids. Implementations must convert
/// every failure into a [`CompileError`] rather than panicking across the
/// seam.
pub trait DiagramEngine: Send + Sync + 'static {
    /// Compile `source` into a scene.
    fn compile(
        &self,
        compile_id: &str,
        source: &str,
    ) -> impl Future<Output = Result<Scene, CompileError>> + Send;
}
