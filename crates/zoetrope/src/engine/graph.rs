//! The bundled engine for the Zoetrope graph language.

use log::{debug, trace};

use zoetrope_core::scene::{Palette, Scene};

use crate::{engine::CompileError, layout};

/// Compiles Zoetrope graph source by parsing it into a semantic graph and
/// running the layered layout over it.
#[derive(Debug, Clone, Default)]
pub struct GraphEngine {
    palette: Palette,
}

impl GraphEngine {
    /// Creates an engine with the default authored palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine drawing scenes with a custom palette.
    pub fn with_palette(palette: Palette) -> Self {
        Self { palette }
    }
}

impl super::DiagramEngine for GraphEngine {
    async fn compile(&self, compile_id: &str, source: &str) -> Result<Scene, CompileError> {
        trace!(compile_id; "Graph engine compiling");

        let graph =
            zoetrope_parser::parse(source).map_err(|err| CompileError::new(err, source))?;

        let scene = layout::layered(&graph, &self.palette);
        debug!(
            compile_id,
            nodes = scene.node_count(),
            edges = scene.edge_count();
            "Graph engine produced scene"
        );
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DiagramEngine;

    #[tokio::test]
    async fn test_compile_produces_positioned_scene() {
        let engine = GraphEngine::new();
        let scene = engine
            .compile("zoetrope-diagram-1", "graph:\nA->B")
            .await
            .unwrap();

        assert_eq!(scene.node_count(), 2);
        assert_eq!(scene.edge_count(), 1);
    }

    #[tokio::test]
    async fn test_compile_failure_carries_source() {
        let engine = GraphEngine::new();
        let err = engine
            .compile("zoetrope-diagram-2", "graph:\na[broken")
            .await
            .unwrap_err();

        assert_eq!(err.source_text(), "graph:\na[broken");
        assert!(!err.diagnostics().diagnostics().is_empty());
    }
}
