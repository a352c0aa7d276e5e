//! Normalization in front of the layout engine.
//!
//! The adapter strips a conventional fenced-code wrapper so the engine
//! never sees fence syntax, and stamps each attempt with a compile
//! identifier derived from an internal render counter. That counter is
//! deliberately distinct from the render session id: it namespaces the
//! engine's own caching, while session ids order commits.

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use zoetrope_core::scene::Scene;

use crate::engine::{CompileError, DiagramEngine};

/// Drives a [`DiagramEngine`] with cleaned source and unique compile ids.
#[derive(Debug)]
pub struct CompilerAdapter<E> {
    engine: E,
    render_count: AtomicU64,
}

impl<E: DiagramEngine> CompilerAdapter<E> {
    /// Wraps an engine.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            render_count: AtomicU64::new(0),
        }
    }

    /// Compile one source snapshot.
    ///
    /// # Errors
    ///
    /// Returns the engine's [`CompileError`] unchanged; the adapter adds no
    /// failure modes of its own.
    pub async fn compile(&self, source: &str) -> Result<Scene, CompileError> {
        let cleaned = strip_fences(source);
        let attempt = self.render_count.fetch_add(1, Ordering::Relaxed) + 1;
        let compile_id = format!("zoetrope-diagram-{attempt}");

        debug!(compile_id = compile_id.as_str(); "Compiling diagram source");
        self.engine.compile(&compile_id, cleaned).await
    }
}

/// Strips a leading and trailing fenced-code marker line, if present.
///
/// Pasted diagram source often arrives wrapped in a Markdown fence
/// (```` ```zoetrope ... ``` ````); the engine must never see the fence
/// syntax. Unfenced source passes through untouched.
pub fn strip_fences(source: &str) -> &str {
    let mut text = source.trim();

    if text.starts_with("```") {
        // Drop the whole opening fence line, including any info string.
        text = match text.split_once('\n') {
            Some((_, body)) => body,
            None => "",
        };
    }

    if let Some(body) = text.trim_end().strip_suffix("```") {
        // Only a fence on its own line closes the block.
        let body = body.trim_end_matches([' ', '\t']);
        if body.is_empty() || body.ends_with('\n') {
            text = body;
        }
    }

    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfenced_source_passes_through() {
        assert_eq!(strip_fences("graph:\nA->B"), "graph:\nA->B");
    }

    #[test]
    fn test_fence_with_info_string_is_stripped() {
        let fenced = "```zoetrope\ngraph:\nA->B\n```";
        assert_eq!(strip_fences(fenced), "graph:\nA->B");
    }

    #[test]
    fn test_bare_fence_is_stripped() {
        let fenced = "```\ngraph:\nA->B\n```\n";
        assert_eq!(strip_fences(fenced), "graph:\nA->B");
    }

    #[test]
    fn test_opening_fence_only() {
        assert_eq!(strip_fences("```graph\ngraph:\nA->B"), "graph:\nA->B");
    }

    #[test]
    fn test_backticks_inside_a_line_are_kept() {
        // A trailing ``` that is not on its own line is diagram text.
        assert_eq!(strip_fences("graph:\nA->b```"), "graph:\nA->b```");
    }

    #[test]
    fn test_fence_only_input_becomes_empty() {
        assert_eq!(strip_fences("```"), "");
        assert_eq!(strip_fences("```\n```"), "");
    }

    #[tokio::test]
    async fn test_adapter_issues_distinct_compile_ids() {
        use std::sync::{Arc, Mutex};

        use zoetrope_core::scene::Scene;

        use crate::engine::DiagramEngine;

        #[derive(Clone, Default)]
        struct RecordingEngine {
            seen: Arc<Mutex<Vec<String>>>,
        }

        impl DiagramEngine for RecordingEngine {
            async fn compile(
                &self,
                compile_id: &str,
                _source: &str,
            ) -> Result<Scene, crate::engine::CompileError> {
                self.seen.lock().unwrap().push(compile_id.to_string());
                Ok(Scene::default())
            }
        }

        let engine = RecordingEngine::default();
        let seen = Arc::clone(&engine.seen);
        let adapter = CompilerAdapter::new(engine);

        adapter.compile("graph:").await.unwrap();
        adapter.compile("graph:").await.unwrap();

        let ids = seen.lock().unwrap();
        assert_eq!(&*ids, &["zoetrope-diagram-1", "zoetrope-diagram-2"]);
    }
}
